use crate::cli::jobs::collect_jobs;
use crate::cli::report::RunReport;
use crate::command::{CommandTask, StderrPolicy};
use crate::core::failures;
use crate::pool::{ConsoleProgressReporter, DefaultPoolConfig, PoolConfig, WorkerPool};
use anyhow::Result;
use std::path::PathBuf;
use std::sync::Arc;

/// run コマンドの設定
pub struct RunConfig {
    pub commands: Vec<String>,
    pub file: Option<PathBuf>,
    pub workers: isize,
    pub stderr_policy: StderrPolicy,
    pub report: Option<PathBuf>,
    pub quiet: bool,
}

/// run コマンドを実行し、失敗したタスク数を返す
pub async fn execute_run(config: RunConfig) -> Result<usize> {
    let jobs = collect_jobs(&config.commands, config.file.as_deref())?;
    let tasks: Vec<Arc<CommandTask>> = jobs
        .iter()
        .map(|job| Arc::new(job.to_task(config.stderr_policy)))
        .collect();

    let pool_config = DefaultPoolConfig::from_env()?.with_progress_reporting(!config.quiet);
    let reporter = if config.quiet {
        ConsoleProgressReporter::quiet()
    } else {
        ConsoleProgressReporter::new()
    };
    let pool = WorkerPool::with_components(pool_config, reporter);

    if !config.quiet {
        let workers = pool.spawned_workers(config.workers, tasks.len());
        println!("⚙️  設定:");
        println!("   - コマンド数: {}", tasks.len());
        println!("   - ワーカー数: {workers}");
        println!("   - キュー容量: {}", pool.config().queue_capacity(workers).min(tasks.len()));
        println!("   - stderr ポリシー: {:?}", config.stderr_policy);
    }

    let started_at = chrono::Utc::now();
    let batch = pool.run_batch(&tasks, config.workers).await;
    let finished_at = chrono::Utc::now();

    // 失敗はインデックス付きで常に表示する
    for (index, error) in failures(&batch.outcomes) {
        eprintln!("[{index}] {}: {error:#}", tasks[index].command_line());
    }

    if !config.quiet {
        println!("📊 処理結果:");
        println!("   - 成功: {}", batch.summary.succeeded);
        println!("   - 失敗: {}", batch.summary.failed);
        println!("   - 総処理時間: {}ms", batch.summary.elapsed_ms);
    }

    let failed = batch.summary.failed;
    if let Some(path) = &config.report {
        RunReport::build(started_at, finished_at, batch.summary, &tasks, &batch.outcomes)
            .write_to(path)?;
        if !config.quiet {
            println!("📄 レポートは {} に保存されました", path.display());
        }
    }

    Ok(failed)
}
