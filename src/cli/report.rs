// 実行レポート（JSON出力）

use crate::command::CommandTask;
use crate::core::{BatchSummary, PoolError, PoolResult, TaskOutcome};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// タスク1件分のレポート
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskReport {
    pub index: usize,
    pub command: String,
    pub success: bool,
    pub exit_code: Option<i32>,
    pub error: Option<String>,
}

/// バッチ全体のレポート
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub summary: BatchSummary,
    pub tasks: Vec<TaskReport>,
}

impl RunReport {
    /// タスク列と結果列（同じ並び）からレポートを作成
    pub fn build(
        started_at: DateTime<Utc>,
        finished_at: DateTime<Utc>,
        summary: BatchSummary,
        tasks: &[std::sync::Arc<CommandTask>],
        outcomes: &[TaskOutcome],
    ) -> Self {
        let tasks = tasks
            .iter()
            .zip(outcomes)
            .enumerate()
            .map(|(index, (task, outcome))| TaskReport {
                index,
                command: task.command_line(),
                success: outcome.is_ok(),
                exit_code: task.last_output().and_then(|output| output.status.code()),
                error: outcome.as_ref().err().map(|error| format!("{error:#}")),
            })
            .collect();

        Self {
            started_at,
            finished_at,
            summary,
            tasks,
        }
    }

    /// JSON としてファイルに書き出す
    pub fn write_to(&self, path: &Path) -> PoolResult<()> {
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| PoolError::report(path, anyhow::Error::new(e)))?;
        std::fs::write(path, json).map_err(|e| PoolError::report(path, anyhow::Error::new(e)))
    }
}
