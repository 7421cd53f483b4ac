// 進捗報告のトレイト定義

/// 進捗報告を抽象化するトレイト
#[async_trait::async_trait]
pub trait ProgressReporter: Send + Sync {
    /// バッチ開始時の報告
    async fn report_started(&self, total_tasks: usize, workers: usize);

    /// 進捗状況の報告
    async fn report_progress(&self, completed: usize, total: usize);

    /// タスク失敗時の報告
    async fn report_error(&self, index: usize, error: &str);

    /// バッチ完了時の報告
    async fn report_completed(&self, succeeded: usize, failed: usize);
}
