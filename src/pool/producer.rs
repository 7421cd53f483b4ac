// Producer - タスクインデックスの配信

use tokio::sync::mpsc;

/// Producer: 0..total のインデックスを昇順で配信し、配信した件数を返す
///
/// 終了時に送信側をドロップするので、キューが閉じたことがワーカーに伝わる。
pub fn spawn_producer(total: usize, work_tx: mpsc::Sender<usize>) -> tokio::task::JoinHandle<usize> {
    tokio::spawn(async move {
        let mut dispatched = 0;
        for index in 0..total {
            if work_tx.send(index).await.is_err() {
                // 受信側が全て終了した
                break;
            }
            dispatched += 1;
        }
        dispatched
    })
}
