//! esconn Entry Point

use anyhow::Context;
use clap::Parser;
use esconn::cli::{self, Cli, Commands};
use esconn::logging::{self, LogTarget};
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let command = Cli::parse().into_command();

    // scan は標準出力を結果に使うので、ログは標準エラーへ
    let target = match &command {
        Commands::Serve(args) => args
            .log_file
            .clone()
            .map(LogTarget::File)
            .unwrap_or(LogTarget::Stdout),
        Commands::Scan(_) => LogTarget::Stderr,
    };
    let _guard = logging::init(&target).context("failed to initialize logging")?;

    match command {
        Commands::Serve(args) => {
            info!("---------- Start service ----------");
            cli::serve::execute(&args)
                .await
                .context("exporter terminated with an error")?;
        }
        Commands::Scan(args) => {
            let exposition = cli::scan::execute(&args)
                .await
                .context("scan failed")?;
            print!("{exposition}");
        }
    }

    Ok(())
}
