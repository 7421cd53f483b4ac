//! 外部プロセスのバッチを、同時実行数を制限したワーカープールで実行する。
//!
//! ```no_run
//! use cmd_pool::{command_list, CommandTask, WorkerPool};
//!
//! # async fn example() {
//! let tasks = command_list(vec![
//!     CommandTask::new("make", ["-C", "a"]),
//!     CommandTask::new("make", ["-C", "b"]),
//! ]);
//! let outcomes = WorkerPool::new().run_many(&tasks, 0).await;
//! for (index, error) in cmd_pool::failures(&outcomes) {
//!     eprintln!("task {index}: {error}");
//! }
//! # }
//! ```

pub mod cli;
pub mod command;
pub mod core;
pub mod pool;
pub mod task;

pub use crate::command::{command_list, std_command_list, CommandOutput, CommandTask, StderrPolicy};
pub use crate::core::{
    failures, BatchRun, BatchSummary, CommandError, PoolError, PoolResult, TaskOutcome,
};
pub use crate::pool::{
    ConsoleProgressReporter, DefaultPoolConfig, NoOpProgressReporter, PoolConfig,
    ProgressReporter, TracingProgressReporter, WorkerPool,
};
pub use crate::task::{into_task_list, BlockingTask, FnTask, Task, TaskList};
