// 進捗報告と監視機能

pub mod implementations;
pub mod traits;

#[cfg(test)]
pub mod test_mocks;

// 公開API
pub use implementations::{ConsoleProgressReporter, NoOpProgressReporter, TracingProgressReporter};
pub use traits::*;

// テストモック（テスト時のみ）
#[cfg(test)]
pub use test_mocks::*;
