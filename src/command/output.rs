// 捕捉した出力と、それをエラーに変換するポリシー

use crate::core::CommandError;
use serde::{Deserialize, Serialize};
use std::process::ExitStatus;

/// 終了したプロセスの捕捉出力
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.status.success()
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            status: output.status,
            stdout: output.stdout,
            stderr: output.stderr,
        }
    }
}

/// 標準エラー出力をどう扱うか
///
/// `run` と `start` + `wait` のどちらの経路でも同じ判定を使う。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum StderrPolicy {
    /// 正常終了でも標準エラー出力が空でなければ失敗とする
    #[default]
    Escalate,
    /// 起動失敗と非ゼロ終了だけを失敗とする
    Ignore,
}

impl StderrPolicy {
    /// 出力を判定して、失敗ならエラーを合成する
    pub fn check(&self, command: &str, output: &CommandOutput) -> Result<(), CommandError> {
        if !output.success() {
            return Err(CommandError::exit(command, output.status, output.stderr_lossy()));
        }

        match self {
            Self::Escalate if !output.stderr.is_empty() => {
                Err(CommandError::diagnostic(command, output.stderr_lossy()))
            }
            _ => Ok(()),
        }
    }
}
