// 統合テスト用のスタブタスク

#![allow(dead_code)]

use async_trait::async_trait;
use cmd_pool::Task;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// 呼び出し回数を数えるタスク
#[derive(Default)]
pub struct CountingTask {
    pub calls: AtomicUsize,
}

impl CountingTask {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Task for CountingTask {
    async fn run(&self) -> anyhow::Result<()> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::task::yield_now().await;
        Ok(())
    }
}

/// 決まったメッセージで成功または失敗するタスク
pub struct ScriptedTask {
    pub failure: Option<String>,
}

impl ScriptedTask {
    pub fn succeed() -> Self {
        Self { failure: None }
    }

    pub fn fail(message: &str) -> Self {
        Self {
            failure: Some(message.to_string()),
        }
    }
}

#[async_trait]
impl Task for ScriptedTask {
    async fn run(&self) -> anyhow::Result<()> {
        match &self.failure {
            Some(message) => Err(anyhow::anyhow!("{message}")),
            None => Ok(()),
        }
    }
}

/// 一定時間スリープするタスク
pub struct SleepTask {
    pub duration: Duration,
}

#[async_trait]
impl Task for SleepTask {
    async fn run(&self) -> anyhow::Result<()> {
        tokio::time::sleep(self.duration).await;
        Ok(())
    }
}

/// 同時に実行中のタスク数の最大値を記録する
#[derive(Default)]
pub struct ConcurrencyProbe {
    active: AtomicUsize,
    max_active: AtomicUsize,
}

impl ConcurrencyProbe {
    pub fn max_active(&self) -> usize {
        self.max_active.load(Ordering::SeqCst)
    }
}

/// 実行中に ConcurrencyProbe のカウンタを上げ下げするタスク
pub struct ProbeTask {
    pub probe: Arc<ConcurrencyProbe>,
    pub hold: Duration,
}

#[async_trait]
impl Task for ProbeTask {
    async fn run(&self) -> anyhow::Result<()> {
        let now_active = self.probe.active.fetch_add(1, Ordering::SeqCst) + 1;
        self.probe.max_active.fetch_max(now_active, Ordering::SeqCst);
        tokio::time::sleep(self.hold).await;
        self.probe.active.fetch_sub(1, Ordering::SeqCst);
        Ok(())
    }
}

pub fn counting_tasks(count: usize) -> Vec<Arc<CountingTask>> {
    (0..count).map(|_| Arc::new(CountingTask::default())).collect()
}

pub fn probe_tasks(probe: &Arc<ConcurrencyProbe>, count: usize, hold: Duration) -> Vec<Arc<ProbeTask>> {
    (0..count)
        .map(|_| {
            Arc::new(ProbeTask {
                probe: probe.clone(),
                hold,
            })
        })
        .collect()
}
