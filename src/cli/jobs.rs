// ジョブ定義の読み込み（コマンドライン文字列・JSONファイル）

use crate::command::{CommandTask, StderrPolicy};
use crate::core::{PoolError, PoolResult};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

/// 1つのコマンド実行の定義
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JobSpec {
    pub program: String,
    #[serde(default)]
    pub args: Vec<String>,
    #[serde(default)]
    pub env: BTreeMap<String, String>,
    #[serde(default)]
    pub current_dir: Option<PathBuf>,
    #[serde(default)]
    pub stdin: Option<String>,
}

impl JobSpec {
    /// 空白区切りのコマンドラインから作成
    ///
    /// シェルの引用符やエスケープは解釈しない。空白を含む引数は
    /// ジョブファイルの `args` で渡す。
    pub fn parse(line: &str) -> PoolResult<Self> {
        let mut parts = line.split_whitespace().map(str::to_string);
        let program = parts
            .next()
            .ok_or_else(|| PoolError::validation("command", "空のコマンドラインです"))?;

        Ok(Self {
            program,
            args: parts.collect(),
            env: BTreeMap::new(),
            current_dir: None,
            stdin: None,
        })
    }

    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// CommandTask に変換
    pub fn to_task(&self, policy: StderrPolicy) -> CommandTask {
        let mut task = CommandTask::new(&self.program, &self.args).with_stderr_policy(policy);
        for (key, value) in &self.env {
            task = task.with_env(key, value);
        }
        if let Some(dir) = &self.current_dir {
            task = task.with_current_dir(dir);
        }
        if let Some(input) = &self.stdin {
            task = task.with_stdin(input.as_bytes());
        }
        task
    }
}

/// JSON のジョブファイルを読み込む
pub fn load_job_file(path: &Path) -> PoolResult<Vec<JobSpec>> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| PoolError::job_file(path, anyhow::Error::new(e)))?;
    let jobs: Vec<JobSpec> = serde_json::from_str(&content)
        .map_err(|e| PoolError::job_file(path, anyhow::Error::new(e)))?;

    if let Some(index) = jobs.iter().position(|job| job.program.trim().is_empty()) {
        return Err(PoolError::validation(
            format!("jobs[{index}].program"),
            "プログラム名が空です",
        ));
    }

    Ok(jobs)
}

/// コマンドライン引数とジョブファイルから実行対象を集める（ファイルの分が先）
pub fn collect_jobs(commands: &[String], file: Option<&Path>) -> PoolResult<Vec<JobSpec>> {
    let mut jobs = match file {
        Some(path) => load_job_file(path)?,
        None => Vec::new(),
    };
    for line in commands {
        jobs.push(JobSpec::parse(line)?);
    }

    if jobs.is_empty() {
        return Err(PoolError::configuration(
            "実行するコマンドがありません（引数または --file で指定してください）",
        ));
    }
    Ok(jobs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_parse_command_line() {
        let job = JobSpec::parse("  cargo   build --release ").unwrap();

        assert_eq!(job.program, "cargo");
        assert_eq!(job.args, vec!["build", "--release"]);
        assert_eq!(job.command_line(), "cargo build --release");
    }

    #[test]
    fn test_parse_does_not_interpret_quotes() {
        let job = JobSpec::parse("sh -c 'echo a b'").unwrap();

        assert_eq!(job.args, vec!["-c", "'echo", "a", "b'"]);
    }

    #[test]
    fn test_job_file_keeps_arguments_with_spaces() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("jobs.json");
        fs::write(&path, r#"[{"program": "sh", "args": ["-c", "echo a b"]}]"#).unwrap();

        let jobs = load_job_file(&path).unwrap();

        assert_eq!(jobs[0].args, vec!["-c", "echo a b"]);
    }

    #[test]
    fn test_parse_empty_command_line() {
        let error = JobSpec::parse("   ").unwrap_err();
        assert!(matches!(error, PoolError::ValidationError { .. }));
    }

    #[test]
    fn test_load_job_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("jobs.json");
        fs::write(
            &path,
            r#"[
                {"program": "make", "args": ["all"]},
                {"program": "cat", "stdin": "hello", "env": {"LANG": "C"}}
            ]"#,
        )
        .unwrap();

        let jobs = load_job_file(&path).unwrap();

        assert_eq!(jobs.len(), 2);
        assert_eq!(jobs[0].command_line(), "make all");
        assert_eq!(jobs[1].stdin.as_deref(), Some("hello"));
        assert_eq!(jobs[1].env["LANG"], "C");
    }

    #[test]
    fn test_load_job_file_errors() {
        let temp_dir = TempDir::new().unwrap();

        let missing = temp_dir.path().join("missing.json");
        let error = load_job_file(&missing).unwrap_err();
        assert!(matches!(error, PoolError::JobFileError { .. }));

        let invalid = temp_dir.path().join("invalid.json");
        fs::write(&invalid, "{not json").unwrap();
        assert!(matches!(
            load_job_file(&invalid).unwrap_err(),
            PoolError::JobFileError { .. }
        ));

        let blank = temp_dir.path().join("blank.json");
        fs::write(&blank, r#"[{"program": "ls"}, {"program": " "}]"#).unwrap();
        let error = load_job_file(&blank).unwrap_err();
        assert!(error.to_string().contains("jobs[1].program"));
    }

    #[test]
    fn test_collect_jobs_order_and_empty() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("jobs.json");
        fs::write(&path, r#"[{"program": "first"}]"#).unwrap();

        let jobs = collect_jobs(&["second arg".to_string()], Some(&path)).unwrap();
        let lines: Vec<String> = jobs.iter().map(JobSpec::command_line).collect();
        assert_eq!(lines, vec!["first", "second arg"]);

        let error = collect_jobs(&[], None).unwrap_err();
        assert!(matches!(error, PoolError::ConfigurationError { .. }));
    }

    #[test]
    fn test_to_task_applies_policy() {
        let job = JobSpec::parse("echo hi").unwrap();
        let task = job.to_task(StderrPolicy::Ignore);

        assert_eq!(task.command_line(), "echo hi");
        assert_eq!(task.stderr_policy(), StderrPolicy::Ignore);
    }
}
