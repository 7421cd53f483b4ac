// バッチ実行に関連するデータ型定義

use serde::{Deserialize, Serialize};

/// 1タスクの結果。`Ok(())` は成功（空のエントリ）を表す
pub type TaskOutcome = anyhow::Result<()>;

/// バッチ全体のサマリー
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchSummary {
    pub total_tasks: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub workers: usize,
    pub elapsed_ms: u64,
    /// 失敗したタスクのインデックス（昇順）
    pub failed_indices: Vec<usize>,
}

impl BatchSummary {
    /// 結果リストからサマリーを作成
    pub fn from_outcomes(outcomes: &[TaskOutcome], workers: usize, elapsed_ms: u64) -> Self {
        let failed_indices: Vec<usize> = failures(outcomes).map(|(index, _)| index).collect();
        Self {
            total_tasks: outcomes.len(),
            succeeded: outcomes.len() - failed_indices.len(),
            failed: failed_indices.len(),
            workers,
            elapsed_ms,
            failed_indices,
        }
    }

    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}

/// 結果リストとサマリーの組
#[derive(Debug)]
pub struct BatchRun {
    pub outcomes: Vec<TaskOutcome>,
    pub summary: BatchSummary,
}

impl BatchRun {
    /// 失敗したタスクをインデックス付きで列挙
    pub fn failures(&self) -> impl Iterator<Item = (usize, &anyhow::Error)> {
        failures(&self.outcomes)
    }
}

/// 結果リストから失敗したエントリを (インデックス, エラー) で列挙
pub fn failures(outcomes: &[TaskOutcome]) -> impl Iterator<Item = (usize, &anyhow::Error)> {
    outcomes
        .iter()
        .enumerate()
        .filter_map(|(index, outcome)| outcome.as_ref().err().map(|error| (index, error)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_outcomes() -> Vec<TaskOutcome> {
        vec![
            Ok(()),
            Err(anyhow::anyhow!("boom")),
            Ok(()),
            Err(anyhow::anyhow!("bang")),
        ]
    }

    #[test]
    fn test_batch_summary_from_outcomes() {
        let outcomes = sample_outcomes();
        let summary = BatchSummary::from_outcomes(&outcomes, 2, 15);

        assert_eq!(summary.total_tasks, 4);
        assert_eq!(summary.succeeded, 2);
        assert_eq!(summary.failed, 2);
        assert_eq!(summary.workers, 2);
        assert_eq!(summary.elapsed_ms, 15);
        assert_eq!(summary.failed_indices, vec![1, 3]);
        assert!(!summary.is_success());
    }

    #[test]
    fn test_batch_summary_empty() {
        let summary = BatchSummary::from_outcomes(&[], 4, 0);

        assert_eq!(summary.total_tasks, 0);
        assert!(summary.is_success());
        assert!(summary.failed_indices.is_empty());
    }

    #[test]
    fn test_failures_keep_original_index() {
        let outcomes = sample_outcomes();
        let failed: Vec<(usize, String)> = failures(&outcomes)
            .map(|(index, error)| (index, error.to_string()))
            .collect();

        assert_eq!(failed, vec![(1, "boom".to_string()), (3, "bang".to_string())]);
    }

    #[test]
    fn test_batch_summary_serialization() {
        let summary = BatchSummary::from_outcomes(&sample_outcomes(), 2, 10);
        let json = serde_json::to_string(&summary).unwrap();

        assert!(json.contains("\"failed_indices\":[1,3]"));
    }
}
