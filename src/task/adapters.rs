// コマンド以外の作業をタスクとして扱うためのアダプタ

use super::traits::Task;
use anyhow::Result;
use async_trait::async_trait;
use std::future::Future;
use std::sync::Arc;

/// 同期クロージャをタスクとして扱うアダプタ
///
/// クロージャは tokio のブロッキングスレッドプールで実行されるため、
/// 中でブロックしてもワーカーを止めない。
pub struct BlockingTask<F> {
    func: Arc<F>,
}

impl<F> BlockingTask<F>
where
    F: Fn() -> Result<()> + Send + Sync + 'static,
{
    pub fn new(func: F) -> Self {
        Self {
            func: Arc::new(func),
        }
    }
}

#[async_trait]
impl<F> Task for BlockingTask<F>
where
    F: Fn() -> Result<()> + Send + Sync + 'static,
{
    async fn run(&self) -> Result<()> {
        let func = Arc::clone(&self.func);
        match tokio::task::spawn_blocking(move || func()).await {
            Ok(outcome) => outcome,
            // クロージャ内のパニックは回復しない
            Err(join_error) if join_error.is_panic() => {
                std::panic::resume_unwind(join_error.into_panic())
            }
            Err(join_error) => Err(anyhow::anyhow!("ブロッキングタスクが中断されました: {join_error}")),
        }
    }
}

/// 非同期クロージャをタスクとして扱うアダプタ
pub struct FnTask<F> {
    func: F,
}

impl<F, Fut> FnTask<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send,
{
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

#[async_trait]
impl<F, Fut> Task for FnTask<F>
where
    F: Fn() -> Fut + Send + Sync,
    Fut: Future<Output = Result<()>> + Send,
{
    async fn run(&self) -> Result<()> {
        (self.func)().await
    }
}
