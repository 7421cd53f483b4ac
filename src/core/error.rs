// Custom error types for the command pool
// プール周辺とコマンド実行のエラー型定義

use std::path::PathBuf;
use std::process::ExitStatus;
use thiserror::Error;

/// プール周辺（設定・CLI・ランタイム）のエラー型
///
/// `run_many` 自体は失敗しない。タスクのエラーは結果スロットに入るため、
/// この型が使われるのはプールの外側の操作だけ。
#[derive(Error, Debug)]
pub enum PoolError {
    #[error("設定エラー: {message}")]
    ConfigurationError { message: String },

    #[error("バリデーションエラー: {field} - {reason}")]
    ValidationError { field: String, reason: String },

    #[error("ジョブファイルエラー: {} - {source}", .path.display())]
    JobFileError {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("レポート出力エラー: {} - {source}", .path.display())]
    ReportError {
        path: PathBuf,
        #[source]
        source: anyhow::Error,
    },

    #[error("ランタイムエラー: {source}")]
    RuntimeError {
        #[source]
        source: std::io::Error,
    },
}

impl PoolError {
    /// 設定エラーの作成
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::ConfigurationError {
            message: message.into(),
        }
    }

    /// バリデーションエラーの作成
    pub fn validation(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ValidationError {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// ジョブファイルエラーの作成
    pub fn job_file(path: impl Into<PathBuf>, source: anyhow::Error) -> Self {
        Self::JobFileError {
            path: path.into(),
            source,
        }
    }

    /// レポート出力エラーの作成
    pub fn report(path: impl Into<PathBuf>, source: anyhow::Error) -> Self {
        Self::ReportError {
            path: path.into(),
            source,
        }
    }

    /// ランタイムエラーの作成
    pub fn runtime(source: std::io::Error) -> Self {
        Self::RuntimeError { source }
    }

    /// 利用者の入力を直せば解決するエラーかどうか
    pub fn is_user_error(&self) -> bool {
        match self {
            Self::ConfigurationError { .. }
            | Self::ValidationError { .. }
            | Self::JobFileError { .. } => true,
            Self::ReportError { .. } | Self::RuntimeError { .. } => false,
        }
    }
}

/// 外部コマンド実行時のエラー型
///
/// タスクの結果スロットには `anyhow::Error` として格納されるので、
/// 呼び出し側は `downcast_ref::<CommandError>()` で種別を取り出せる。
#[derive(Error, Debug)]
pub enum CommandError {
    #[error("コマンド起動エラー: '{command}' - {source}")]
    StartError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("コマンド入出力エラー: '{command}' - {source}")]
    IoError {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("コマンド実行エラー: '{command}' - {status}{}", stderr_suffix(.stderr))]
    ExitError {
        command: String,
        status: ExitStatus,
        stderr: String,
    },

    #[error("コマンド診断出力: '{command}'{}", stderr_suffix(.stderr))]
    DiagnosticError { command: String, stderr: String },
}

impl CommandError {
    /// 起動エラーの作成
    pub fn start(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::StartError {
            command: command.into(),
            source,
        }
    }

    /// 入出力エラーの作成
    pub fn io(command: impl Into<String>, source: std::io::Error) -> Self {
        Self::IoError {
            command: command.into(),
            source,
        }
    }

    /// 異常終了エラーの作成
    pub fn exit(command: impl Into<String>, status: ExitStatus, stderr: impl Into<String>) -> Self {
        Self::ExitError {
            command: command.into(),
            status,
            stderr: stderr.into(),
        }
    }

    /// 診断出力エラーの作成
    pub fn diagnostic(command: impl Into<String>, stderr: impl Into<String>) -> Self {
        Self::DiagnosticError {
            command: command.into(),
            stderr: stderr.into(),
        }
    }

    /// エラーの原因となったコマンドライン
    pub fn command(&self) -> &str {
        match self {
            Self::StartError { command, .. }
            | Self::IoError { command, .. }
            | Self::ExitError { command, .. }
            | Self::DiagnosticError { command, .. } => command,
        }
    }

    /// 捕捉された標準エラー出力（あれば）
    pub fn stderr(&self) -> Option<&str> {
        match self {
            Self::ExitError { stderr, .. } | Self::DiagnosticError { stderr, .. } => {
                Some(stderr.as_str())
            }
            _ => None,
        }
    }
}

fn stderr_suffix(stderr: &str) -> String {
    if stderr.trim().is_empty() {
        String::new()
    } else {
        format!("\n\n{}", stderr.trim_end())
    }
}

/// プール周辺の結果型
pub type PoolResult<T> = std::result::Result<T, PoolError>;
