// テストユーティリティとスタブタスク

pub mod mocks;

// 公開API
#[allow(unused_imports)]
pub use mocks::*;
