// ワーカープール
// Producer-Consumer パターンによる並列実行
//
// producer  - タスクインデックスを昇順に配信
// consumer  - 共有キューから取り出して実行するワーカー
// collector - 結果をインデックスのスロットへ書き込む
// engine    - 上記を組み立てる WorkerPool

pub mod collector;
pub mod config;
pub mod consumer;
pub mod engine;
pub mod producer;
pub mod reporting;

// 公開API
pub use config::{resolve_workers, DefaultPoolConfig, PoolConfig};
pub use engine::WorkerPool;
pub use reporting::{
    ConsoleProgressReporter, NoOpProgressReporter, ProgressReporter, TracingProgressReporter,
};
