// 進捗報告の具象実装

use super::traits::ProgressReporter;
use async_trait::async_trait;

/// コンソール出力による進捗報告実装
#[derive(Debug, Default, Clone)]
pub struct ConsoleProgressReporter {
    quiet: bool,
}

impl ConsoleProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn quiet() -> Self {
        Self { quiet: true }
    }
}

#[async_trait]
impl ProgressReporter for ConsoleProgressReporter {
    async fn report_started(&self, total_tasks: usize, workers: usize) {
        if !self.quiet {
            println!("🚀 Starting {total_tasks} tasks with {workers} workers...");
        }
    }

    async fn report_progress(&self, completed: usize, total: usize) {
        if !self.quiet && (completed % 10 == 0 || completed == total) {
            let percentage = (completed as f64 / total as f64) * 100.0;
            println!("📊 Progress: {completed}/{total} ({percentage:.1}%)");
        }
    }

    async fn report_error(&self, index: usize, error: &str) {
        if !self.quiet {
            eprintln!("❌ Task #{index} failed: {error}");
        }
    }

    async fn report_completed(&self, succeeded: usize, failed: usize) {
        if !self.quiet {
            println!("✅ Completed! Succeeded: {succeeded}, Failed: {failed}");
        }
    }
}

/// 何もしない進捗報告実装（ライブラリ利用・ベンチマーク用）
#[derive(Debug, Default, Clone)]
pub struct NoOpProgressReporter;

impl NoOpProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for NoOpProgressReporter {
    async fn report_started(&self, _total_tasks: usize, _workers: usize) {}

    async fn report_progress(&self, _completed: usize, _total: usize) {}

    async fn report_error(&self, _index: usize, _error: &str) {}

    async fn report_completed(&self, _succeeded: usize, _failed: usize) {}
}

/// tracing イベントとして進捗を出力する実装
#[derive(Debug, Default, Clone)]
pub struct TracingProgressReporter;

impl TracingProgressReporter {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ProgressReporter for TracingProgressReporter {
    async fn report_started(&self, total_tasks: usize, workers: usize) {
        tracing::info!(total_tasks, workers, "batch started");
    }

    async fn report_progress(&self, completed: usize, total: usize) {
        tracing::debug!(completed, total, "batch progress");
    }

    async fn report_error(&self, index: usize, error: &str) {
        tracing::warn!(task = index, error, "task failed");
    }

    async fn report_completed(&self, succeeded: usize, failed: usize) {
        tracing::info!(succeeded, failed, "batch completed");
    }
}
