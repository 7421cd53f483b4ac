use crate::command::StderrPolicy;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "cmd_pool")]
#[command(about = "Run a batch of external commands with a bounded worker pool")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run every command once and report the failures by task index
    Run {
        /// Command lines to run. Each one is split on whitespace only; quotes are
        /// not interpreted, so use --file for arguments that contain spaces
        commands: Vec<String>,

        /// JSON job file: [{"program": "make", "args": ["all"]}, ...]
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Number of workers (0 or a negative value uses the default parallelism)
        #[arg(short, long, default_value = "0", allow_negative_numbers = true)]
        workers: isize,

        /// How to treat stderr output from a command that exited successfully
        #[arg(long, value_enum, default_value = "escalate")]
        stderr_policy: StderrPolicy,

        /// Write a JSON run report to this path
        #[arg(short, long)]
        report: Option<PathBuf>,

        /// Suppress progress output
        #[arg(short, long)]
        quiet: bool,
    },
}
