// 外部プロセスのラッパー
//
// プロセスの起動・入出力バッファの接続・終了状態からのエラー合成を担当する。
// プールから見ると Task を実装した値の一つに過ぎない。

pub mod output;
pub mod task;

// 公開API
pub use output::{CommandOutput, StderrPolicy};
pub use task::{CommandTask, RunningCommand};

use crate::task::{into_task_list, TaskList};

/// CommandTask の列を TaskList に変換する
pub fn command_list(commands: Vec<CommandTask>) -> TaskList {
    into_task_list(commands)
}

/// 標準ライブラリの Command の列を TaskList に変換する
pub fn std_command_list(commands: &[std::process::Command]) -> TaskList {
    into_task_list(commands.iter().map(CommandTask::from).collect())
}
