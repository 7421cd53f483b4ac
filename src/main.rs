use anyhow::Result;
use clap::Parser;
use cmd_pool::cli::{execute_run, Cli, Commands, RunConfig};
use cmd_pool::PoolError;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "cmd_pool=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Run {
            commands,
            file,
            workers,
            stderr_policy,
            report,
            quiet,
        } => {
            let result = execute_run(RunConfig {
                commands,
                file,
                workers,
                stderr_policy,
                report,
                quiet,
            })
            .await;

            let failed = match result {
                Ok(failed) => failed,
                Err(error) => match error.downcast_ref::<PoolError>() {
                    // 入力の誤りは終了コード2で区別する
                    Some(pool_error) if pool_error.is_user_error() => {
                        eprintln!("❌ エラー: {pool_error}");
                        std::process::exit(2);
                    }
                    _ => return Err(error),
                },
            };

            if failed > 0 {
                if !quiet {
                    eprintln!("⚠️  {failed}個のコマンドが失敗しました");
                }
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
