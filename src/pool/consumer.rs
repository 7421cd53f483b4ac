// Consumer - 共有キューからタスクを取り出して実行するワーカー

use crate::core::TaskOutcome;
use crate::task::Task;
use std::sync::Arc;
use tokio::sync::{mpsc, Mutex};

/// ワーカー間で共有するタスク列
pub type SharedTasks<T> = Arc<Vec<Arc<T>>>;

/// 単一ワーカー。キューが閉じるまでインデックスを取り出して実行し、
/// 実行したタスク数を返す
pub fn spawn_single_consumer<T>(
    worker_id: usize,
    tasks: SharedTasks<T>,
    work_rx: Arc<Mutex<mpsc::Receiver<usize>>>,
    result_tx: mpsc::Sender<(usize, TaskOutcome)>,
) -> tokio::task::JoinHandle<usize>
where
    T: Task + ?Sized + 'static,
{
    tokio::spawn(async move {
        let mut executed = 0;
        loop {
            // 次のインデックスを取得（ロックは受信の間だけ保持）
            let index = {
                let mut rx = work_rx.lock().await;
                match rx.recv().await {
                    Some(index) => index,
                    None => break,
                }
            };

            tracing::debug!(worker_id, task = index, "task dispatched");
            let outcome = tasks[index].run().await;
            executed += 1;
            tracing::debug!(worker_id, task = index, success = outcome.is_ok(), "task completed");

            if result_tx.send((index, outcome)).await.is_err() {
                // 結果チャンネルが閉じられた場合は終了
                break;
            }
        }
        tracing::debug!(worker_id, executed, "worker exiting");
        executed
    })
}

/// Consumers: 固定数のワーカーを起動する
pub fn spawn_consumers<T>(
    tasks: SharedTasks<T>,
    work_rx: mpsc::Receiver<usize>,
    result_tx: mpsc::Sender<(usize, TaskOutcome)>,
    worker_count: usize,
) -> Vec<tokio::task::JoinHandle<usize>>
where
    T: Task + ?Sized + 'static,
{
    let work_rx = Arc::new(Mutex::new(work_rx));

    (0..worker_count)
        .map(|worker_id| {
            spawn_single_consumer(
                worker_id,
                tasks.clone(),
                work_rx.clone(),
                result_tx.clone(),
            )
        })
        .collect()
}
