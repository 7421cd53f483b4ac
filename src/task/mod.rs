// タスク抽象化
//
// プールが受け付けるのは「run して成功/失敗を返す」能力を持つ任意の値。
// 外部プロセスは command モジュールの CommandTask、それ以外は adapters を使う。

pub mod adapters;
pub mod traits;

// 公開API
pub use adapters::{BlockingTask, FnTask};
pub use traits::*;
