// テスト用の進捗報告モック実装

use super::traits::ProgressReporter;
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
pub struct MockProgressReporter {
    pub started_calls: Arc<Mutex<Vec<(usize, usize)>>>,
    pub progress_calls: Arc<Mutex<Vec<(usize, usize)>>>,
    pub error_calls: Arc<Mutex<Vec<(usize, String)>>>,
    pub completed_called: Arc<Mutex<Option<(usize, usize)>>>,
}

impl MockProgressReporter {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait::async_trait]
impl ProgressReporter for MockProgressReporter {
    async fn report_started(&self, total_tasks: usize, workers: usize) {
        self.started_calls.lock().unwrap().push((total_tasks, workers));
    }

    async fn report_progress(&self, completed: usize, total: usize) {
        self.progress_calls.lock().unwrap().push((completed, total));
    }

    async fn report_error(&self, index: usize, error: &str) {
        self.error_calls
            .lock()
            .unwrap()
            .push((index, error.to_string()));
    }

    async fn report_completed(&self, succeeded: usize, failed: usize) {
        *self.completed_called.lock().unwrap() = Some((succeeded, failed));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_progress_reporter_trait() {
        let reporter = MockProgressReporter::new();

        reporter.report_started(4, 2).await;
        reporter.report_progress(1, 4).await;
        reporter.report_error(2, "boom").await;
        reporter.report_completed(3, 1).await;

        assert_eq!(*reporter.started_calls.lock().unwrap(), vec![(4, 2)]);
        assert_eq!(*reporter.progress_calls.lock().unwrap(), vec![(1, 4)]);
        assert_eq!(
            *reporter.error_calls.lock().unwrap(),
            vec![(2, "boom".to_string())]
        );
        assert_eq!(*reporter.completed_called.lock().unwrap(), Some((3, 1)));
    }
}
