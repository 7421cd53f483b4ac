// コアモジュール
// エラー型とデータ構造の定義

pub mod error;
pub mod types;

// 公開API
pub use error::*;
pub use types::*;
