// CommandTask - 外部プロセスを1つ実行するタスク

use super::output::{CommandOutput, StderrPolicy};
use crate::core::CommandError;
use crate::task::Task;
use async_trait::async_trait;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::sync::Mutex;
use tokio::io::AsyncWriteExt;
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;

/// 外部プロセスの起動情報と、最後に捕捉した出力を持つタスク
///
/// 標準入力・標準出力・標準エラー出力はすべてバッファに接続される。
/// `run` のたびに新しいプロセスを起動し、出力は `last_output` で参照できる。
#[derive(Debug)]
pub struct CommandTask {
    program: OsString,
    args: Vec<OsString>,
    envs: Vec<(OsString, Option<OsString>)>,
    current_dir: Option<PathBuf>,
    stdin: Option<Vec<u8>>,
    stderr_policy: StderrPolicy,
    last_output: Mutex<Option<CommandOutput>>,
}

impl CommandTask {
    /// プログラム名と引数からタスクを作成
    pub fn new<I, S>(program: impl AsRef<OsStr>, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        Self {
            program: program.as_ref().to_os_string(),
            args: args.into_iter().map(|arg| arg.as_ref().to_os_string()).collect(),
            envs: Vec::new(),
            current_dir: None,
            stdin: None,
            stderr_policy: StderrPolicy::default(),
            last_output: Mutex::new(None),
        }
    }

    pub fn with_stdin(mut self, input: impl Into<Vec<u8>>) -> Self {
        self.stdin = Some(input.into());
        self
    }

    pub fn with_env(mut self, key: impl AsRef<OsStr>, value: impl AsRef<OsStr>) -> Self {
        self.envs
            .push((key.as_ref().to_os_string(), Some(value.as_ref().to_os_string())));
        self
    }

    pub fn with_current_dir(mut self, dir: impl AsRef<Path>) -> Self {
        self.current_dir = Some(dir.as_ref().to_path_buf());
        self
    }

    pub fn with_stderr_policy(mut self, policy: StderrPolicy) -> Self {
        self.stderr_policy = policy;
        self
    }

    pub fn stderr_policy(&self) -> StderrPolicy {
        self.stderr_policy
    }

    /// エラーメッセージ用のコマンドライン（引数を空白で連結）
    pub fn command_line(&self) -> String {
        std::iter::once(&self.program)
            .chain(self.args.iter())
            .map(|part| part.to_string_lossy())
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// 直近の `run` で捕捉した出力
    pub fn last_output(&self) -> Option<CommandOutput> {
        self.last_output
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// プロセスを起動する（完了は待たない）
    ///
    /// 返された `RunningCommand::wait` は `run` と同じポリシーで判定する。
    pub fn start(&self) -> Result<RunningCommand, CommandError> {
        let command_line = self.command_line();
        let mut child = self
            .build_command()
            .spawn()
            .map_err(|e| CommandError::start(command_line.clone(), e))?;

        tracing::debug!(command = %command_line, pid = ?child.id(), "process started");

        let stdin_writer = match (self.stdin.clone(), child.stdin.take()) {
            (Some(input), Some(mut pipe)) => Some(tokio::spawn(async move {
                pipe.write_all(&input).await?;
                pipe.shutdown().await
            })),
            _ => None,
        };

        Ok(RunningCommand {
            child,
            command_line,
            stderr_policy: self.stderr_policy,
            stdin_writer,
        })
    }

    fn build_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command.args(&self.args);
        for (key, value) in &self.envs {
            match value {
                Some(value) => command.env(key, value),
                None => command.env_remove(key),
            };
        }
        if let Some(dir) = &self.current_dir {
            command.current_dir(dir);
        }
        command
            .stdin(if self.stdin.is_some() {
                Stdio::piped()
            } else {
                Stdio::null()
            })
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        command
    }

    fn store_output(&self, output: &CommandOutput) {
        *self
            .last_output
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner()) = Some(output.clone());
    }
}

impl From<&std::process::Command> for CommandTask {
    /// 標準ライブラリの `Command` の設定（プログラム・引数・環境変数・作業ディレクトリ）を引き継ぐ
    fn from(command: &std::process::Command) -> Self {
        let mut task = CommandTask::new(command.get_program(), command.get_args());
        task.envs = command
            .get_envs()
            .map(|(key, value)| (key.to_os_string(), value.map(OsStr::to_os_string)))
            .collect();
        task.current_dir = command.get_current_dir().map(Path::to_path_buf);
        task
    }
}

#[async_trait]
impl Task for CommandTask {
    async fn run(&self) -> anyhow::Result<()> {
        let running = self.start()?;
        let command_line = running.command_line.clone();
        let output = running.wait_output().await?;

        self.store_output(&output);
        tracing::debug!(command = %command_line, status = %output.status, "process finished");

        self.stderr_policy.check(&command_line, &output)?;
        Ok(())
    }
}

/// 起動済みのプロセス
#[derive(Debug)]
pub struct RunningCommand {
    child: Child,
    command_line: String,
    stderr_policy: StderrPolicy,
    stdin_writer: Option<JoinHandle<std::io::Result<()>>>,
}

impl RunningCommand {
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    pub fn command_line(&self) -> &str {
        &self.command_line
    }

    /// 終了を待ち、ポリシーで判定した結果を返す
    pub async fn wait(self) -> Result<CommandOutput, CommandError> {
        let command_line = self.command_line.clone();
        let policy = self.stderr_policy;
        let output = self.wait_output().await?;
        policy.check(&command_line, &output)?;
        Ok(output)
    }

    /// 終了を待って出力を回収する（ポリシー判定はしない）
    pub async fn wait_output(self) -> Result<CommandOutput, CommandError> {
        let output = self
            .child
            .wait_with_output()
            .await
            .map_err(|e| CommandError::io(self.command_line.clone(), e))?;

        if let Some(writer) = self.stdin_writer {
            match writer.await {
                Ok(Ok(())) => {}
                // 入力を読まずに終了したプロセス
                Ok(Err(e)) if e.kind() == std::io::ErrorKind::BrokenPipe => {}
                Ok(Err(e)) => return Err(CommandError::io(self.command_line, e)),
                Err(join_error) => {
                    return Err(CommandError::io(
                        self.command_line,
                        std::io::Error::new(std::io::ErrorKind::Other, join_error),
                    ))
                }
            }
        }

        Ok(output.into())
    }
}
