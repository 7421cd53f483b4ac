// Collector - 結果をインデックスのスロットに書き込む

use super::reporting::ProgressReporter;
use crate::core::TaskOutcome;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Collector: 事前に確保したスロットへインデックス順に結果を書き込む
///
/// スロットへの書き込みはこのタスクだけが行う。全ての送信側がドロップされると
/// スロット列を返す。`None` のスロットは結果が届かなかったことを表す。
pub fn spawn_result_collector<R>(
    mut result_rx: mpsc::Receiver<(usize, TaskOutcome)>,
    total_tasks: usize,
    reporter: Option<Arc<R>>,
) -> tokio::task::JoinHandle<Vec<Option<TaskOutcome>>>
where
    R: ProgressReporter + ?Sized + 'static,
{
    tokio::spawn(async move {
        let mut slots: Vec<Option<TaskOutcome>> = (0..total_tasks).map(|_| None).collect();
        let mut completed = 0;

        while let Some((index, outcome)) = result_rx.recv().await {
            if let (Some(reporter), Err(error)) = (&reporter, &outcome) {
                reporter.report_error(index, &format!("{error:#}")).await;
            }

            slots[index] = Some(outcome);
            completed += 1;

            if let Some(reporter) = &reporter {
                reporter.report_progress(completed, total_tasks).await;
            }
        }

        slots
    })
}
