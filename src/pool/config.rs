// プールの設定管理
//
// 既定のワーカー数（呼び出し側が1未満を渡したときに使う値）を
// 実行環境から暗黙に読むのではなく、設定として注入できるようにしている。

use crate::core::{PoolError, PoolResult};

/// ワーカー数の環境変数
pub const WORKERS_ENV: &str = "CMD_POOL_WORKERS";
/// 配信キュー容量の環境変数
pub const QUEUE_CAPACITY_ENV: &str = "CMD_POOL_QUEUE_CAPACITY";

/// プールの設定を抽象化するトレイト
pub trait PoolConfig: Send + Sync {
    /// 呼び出し側が1未満のワーカー数を渡したときに使うワーカー数
    fn default_worker_count(&self) -> usize;

    /// 配信キューの容量
    fn queue_capacity(&self, workers: usize) -> usize {
        workers
    }

    /// 進捗報告を有効にするかどうか
    fn enable_progress_reporting(&self) -> bool;
}

/// 要求されたワーカー数を実効値に変換する（常に1以上）
pub fn resolve_workers<C: PoolConfig + ?Sized>(config: &C, requested: isize) -> usize {
    if requested < 1 {
        config.default_worker_count().max(1)
    } else {
        requested as usize
    }
}

/// デフォルト設定実装
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DefaultPoolConfig {
    default_workers: usize,
    queue_capacity: Option<usize>,
    enable_progress: bool,
}

impl DefaultPoolConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// 既定のワーカー数を注入する
    pub fn with_default_workers(mut self, workers: usize) -> Self {
        self.default_workers = workers.max(1);
        self
    }

    /// 配信キューの容量を固定する（未指定ならワーカー数と同じ）
    pub fn with_queue_capacity(mut self, capacity: usize) -> Self {
        self.queue_capacity = Some(capacity.max(1));
        self
    }

    pub fn with_progress_reporting(mut self, enable: bool) -> Self {
        self.enable_progress = enable;
        self
    }

    /// 環境変数から設定を読み込む
    pub fn from_env() -> PoolResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 任意の参照関数から設定を読み込む
    pub fn from_lookup<F>(lookup: F) -> PoolResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(value) = lookup(WORKERS_ENV) {
            config.default_workers = parse_positive(WORKERS_ENV, &value)?;
        }
        if let Some(value) = lookup(QUEUE_CAPACITY_ENV) {
            config.queue_capacity = Some(parse_positive(QUEUE_CAPACITY_ENV, &value)?);
        }

        Ok(config)
    }
}

fn parse_positive(key: &str, value: &str) -> PoolResult<usize> {
    match value.trim().parse::<usize>() {
        Ok(parsed) if parsed > 0 => Ok(parsed),
        _ => Err(PoolError::configuration(format!(
            "{key} は1以上の整数である必要があります: '{value}'"
        ))),
    }
}

impl Default for DefaultPoolConfig {
    fn default() -> Self {
        Self {
            default_workers: num_cpus::get().max(1),
            queue_capacity: None,
            enable_progress: true,
        }
    }
}

impl PoolConfig for DefaultPoolConfig {
    fn default_worker_count(&self) -> usize {
        self.default_workers
    }

    fn queue_capacity(&self, workers: usize) -> usize {
        self.queue_capacity.unwrap_or(workers).max(1)
    }

    fn enable_progress_reporting(&self) -> bool {
        self.enable_progress
    }
}
