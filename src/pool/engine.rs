// WorkerPool - 固定数のワーカーでタスク列を1回ずつ実行する

use super::collector::spawn_result_collector;
use super::config::{resolve_workers, DefaultPoolConfig, PoolConfig};
use super::consumer::spawn_consumers;
use super::producer::spawn_producer;
use super::reporting::{NoOpProgressReporter, ProgressReporter};
use crate::core::{BatchRun, BatchSummary, PoolError, PoolResult, TaskOutcome};
use crate::task::Task;
use std::sync::Arc;
use std::time::Instant;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// 固定サイズのワーカープール
///
/// タスクのインデックスを共有キューに昇順で流し、各ワーカーがキューから
/// 取り出して実行する。結果はタスクと同じ並びで返る。
/// タスクの失敗は結果スロットに入るだけで、他のタスクには影響しない。
pub struct WorkerPool<C = DefaultPoolConfig, R = NoOpProgressReporter> {
    config: C,
    reporter: Arc<R>,
}

impl WorkerPool {
    /// デフォルト設定・進捗報告なしのプールを作成
    pub fn new() -> Self {
        Self::default()
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::with_components(DefaultPoolConfig::default(), NoOpProgressReporter::new())
    }
}

impl<C, R> WorkerPool<C, R>
where
    C: PoolConfig,
    R: ProgressReporter + 'static,
{
    /// 設定とレポーターを注入してプールを作成
    pub fn with_components(config: C, reporter: R) -> Self {
        Self {
            config,
            reporter: Arc::new(reporter),
        }
    }

    /// 設定への参照を取得
    pub fn config(&self) -> &C {
        &self.config
    }

    /// レポーターへの参照を取得
    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// 要求されたワーカー数を実効値に変換する（1未満なら既定値）
    pub fn effective_workers(&self, requested: isize) -> usize {
        resolve_workers(&self.config, requested)
    }

    /// 実際に起動されるワーカー数（実効値をタスク数で頭打ちにしたもの）
    pub fn spawned_workers(&self, requested: isize, total_tasks: usize) -> usize {
        self.effective_workers(requested).min(total_tasks)
    }

    /// 全てのタスクを1回ずつ実行し、タスクと同じ並びの結果を返す
    ///
    /// 全タスクが完了するまで戻らない。同時に実行されるタスクは
    /// `effective_workers(workers)` 個まで。ワーカー内のパニックは
    /// 回復せず、呼び出し側でそのまま再送出される。
    ///
    /// # ブロッキング
    ///
    /// 各タスクの future は呼び出し元の tokio ランタイム上で実行される。
    /// `run` の中で同期的にブロックすると、その間ランタイムのスレッドが
    /// 占有され、実際の並列度はランタイムのスレッド数で頭打ちになる
    /// （`current_thread` ランタイムでは直列になる）。同期処理は
    /// [`BlockingTask`](crate::task::BlockingTask) で包むこと。
    pub async fn run_many<T>(&self, tasks: &[Arc<T>], workers: isize) -> Vec<TaskOutcome>
    where
        T: Task + ?Sized + 'static,
    {
        let total_tasks = tasks.len();
        if total_tasks == 0 {
            return Vec::new();
        }
        let workers = self.spawned_workers(workers, total_tasks);

        let reporter = self
            .config
            .enable_progress_reporting()
            .then(|| Arc::clone(&self.reporter));
        if let Some(reporter) = &reporter {
            reporter.report_started(total_tasks, workers).await;
        }
        tracing::info!(total_tasks, workers, "batch started");

        // 配信キューと結果チャンネル
        // 容量はタスク数で頭打ち（巨大なワーカー数でもチャンネル上限を超えない）
        let queue_capacity = self.config.queue_capacity(workers).clamp(1, total_tasks);
        let (work_tx, work_rx) = mpsc::channel::<usize>(queue_capacity);
        let (result_tx, result_rx) = mpsc::channel::<(usize, TaskOutcome)>(workers);

        let shared_tasks = Arc::new(tasks.to_vec());
        let producer_handle = spawn_producer(total_tasks, work_tx);
        let consumer_handles =
            spawn_consumers(shared_tasks, work_rx, result_tx, workers);
        let collector_handle = spawn_result_collector(result_rx, total_tasks, reporter.clone());

        let dispatched = join_worker(producer_handle).await;
        for handle in consumer_handles {
            join_worker(handle).await;
        }
        let slots = join_worker(collector_handle).await;

        let outcomes: Vec<TaskOutcome> = slots
            .into_iter()
            .enumerate()
            .map(|(index, slot)| {
                slot.unwrap_or_else(|| Err(anyhow::anyhow!("タスク #{index} の結果が回収されませんでした")))
            })
            .collect();

        let failed = outcomes.iter().filter(|outcome| outcome.is_err()).count();
        if let Some(reporter) = &reporter {
            reporter.report_completed(total_tasks - failed, failed).await;
        }
        tracing::info!(total_tasks, dispatched, failed, "batch finished");

        outcomes
    }

    /// `run_many` に加えてサマリーを返す
    ///
    /// サマリーの `workers` は実際に起動したワーカー数（`spawned_workers`）。
    pub async fn run_batch<T>(&self, tasks: &[Arc<T>], workers: isize) -> BatchRun
    where
        T: Task + ?Sized + 'static,
    {
        let start_time = Instant::now();
        let spawned = self.spawned_workers(workers, tasks.len());
        let outcomes = self.run_many(tasks, workers).await;
        let summary = BatchSummary::from_outcomes(
            &outcomes,
            spawned,
            start_time.elapsed().as_millis() as u64,
        );

        BatchRun { outcomes, summary }
    }

    /// 非同期コンテキストの外から呼ぶための同期版
    ///
    /// 内部でマルチスレッドランタイムを作成して完了までブロックする。
    /// 既存の tokio ランタイム上からは呼び出せない。
    pub fn run_many_blocking<T>(&self, tasks: &[Arc<T>], workers: isize) -> PoolResult<Vec<TaskOutcome>>
    where
        T: Task + ?Sized + 'static,
    {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .build()
            .map_err(PoolError::runtime)?;

        Ok(runtime.block_on(self.run_many(tasks, workers)))
    }
}

/// spawn したタスクの完了を待つ。パニックは呼び出し側へ再送出する
async fn join_worker<O>(handle: JoinHandle<O>) -> O {
    match handle.await {
        Ok(output) => output,
        Err(join_error) if join_error.is_panic() => std::panic::resume_unwind(join_error.into_panic()),
        Err(join_error) => panic!("ワーカーが中断されました: {join_error}"),
    }
}
