// CLI層 - コマンドライン引数の定義と処理
// ユーザーインターフェースとプールの橋渡し

pub mod args;
pub mod commands;
pub mod jobs;
pub mod report;

// 公開API
pub use args::*;
pub use commands::*;
pub use jobs::{collect_jobs, load_job_file, JobSpec};
pub use report::{RunReport, TaskReport};
