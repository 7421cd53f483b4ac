// タスク抽象化のトレイト定義

use anyhow::Result;
use async_trait::async_trait;
use mockall::automock;
use std::sync::Arc;

/// プールで実行できる作業単位
///
/// 「完了まで実行して成功か失敗かを返す」という1つの能力だけを要求する。
/// プールはタスクの内部状態を読まないし変更もしない（`&self` のみ）。
///
/// # ブロッキング
///
/// `run` は非同期コンテキストで poll されるため、中で同期的にブロック
/// してはいけない（`std::thread::sleep` や `std::process::Command::output` など）。
/// ブロックするとランタイムのスレッドを占有し、他のワーカーが進めなくなる。
/// 同期処理は [`BlockingTask`](super::BlockingTask) で包むこと。
#[automock]
#[async_trait]
pub trait Task: Send + Sync {
    /// タスクを完了まで実行する
    async fn run(&self) -> Result<()>;
}

/// 実行対象のタスクリスト。インデックスが結果リストとの対応になる
pub type TaskList = Vec<Arc<dyn Task>>;

// Task for Box<dyn Task>
#[async_trait]
impl Task for Box<dyn Task> {
    async fn run(&self) -> Result<()> {
        self.as_ref().run().await
    }
}

#[async_trait]
impl<T> Task for Arc<T>
where
    T: Task + ?Sized,
{
    async fn run(&self) -> Result<()> {
        self.as_ref().run().await
    }
}

/// 同種のタスク列を `TaskList` に変換する
pub fn into_task_list<T>(tasks: Vec<T>) -> TaskList
where
    T: Task + 'static,
{
    tasks
        .into_iter()
        .map(|task| Arc::new(task) as Arc<dyn Task>)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_task_reports_success() {
        let mut task = MockTask::new();
        task.expect_run().times(1).returning(|| Ok(()));

        assert!(task.run().await.is_ok());
    }

    #[tokio::test]
    async fn test_mock_task_reports_error() {
        let mut task = MockTask::new();
        task.expect_run()
            .times(1)
            .returning(|| Err(anyhow::anyhow!("boom")));

        let error = task.run().await.unwrap_err();
        assert_eq!(error.to_string(), "boom");
    }

    #[tokio::test]
    async fn test_boxed_task_forwards_run() {
        let mut mock = MockTask::new();
        mock.expect_run().times(1).returning(|| Ok(()));
        let boxed: Box<dyn Task> = Box::new(mock);

        assert!(boxed.run().await.is_ok());
    }

    #[tokio::test]
    async fn test_into_task_list_preserves_order() {
        let tasks: Vec<MockTask> = (0..3)
            .map(|i| {
                let mut mock = MockTask::new();
                mock.expect_run().returning(move || {
                    if i == 1 {
                        Err(anyhow::anyhow!("task {i}"))
                    } else {
                        Ok(())
                    }
                });
                mock
            })
            .collect();

        let list = into_task_list(tasks);
        assert_eq!(list.len(), 3);
        assert!(list[0].run().await.is_ok());
        assert_eq!(list[1].run().await.unwrap_err().to_string(), "task 1");
        assert!(list[2].run().await.is_ok());
    }
}
