//! serve サブコマンド
//!
//! ポーリングスケジューラーとメトリクスサーバーを起動します。

use clap::Args;
use esconn_common::config::{ExporterConfig, DEFAULT_HOST, DEFAULT_PORT};
use std::path::PathBuf;
use tracing::info;

use super::PollArgs;
use crate::cluster::validate_target_dir;
use crate::error::ExporterResult;
use crate::metrics::ConnectivityMetrics;
use crate::poller::PollingScheduler;
use crate::shutdown::ShutdownController;
use crate::{server, AppState};

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, default_value_t = DEFAULT_PORT, env = "ESCONN_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = DEFAULT_HOST, env = "ESCONN_HOST")]
    pub host: String,

    /// Log file path (logs go to stdout when omitted)
    #[arg(long, env = "ESCONN_LOG_FILE")]
    pub log_file: Option<PathBuf>,

    /// Polling options
    #[command(flatten)]
    pub poll: PollArgs,
}

impl ServeArgs {
    /// 起動設定を組み立てる
    pub fn exporter_config(&self) -> ExporterConfig {
        self.poll.apply(ExporterConfig {
            host: self.host.clone(),
            port: self.port,
            ..ExporterConfig::default()
        })
    }
}

/// serve を実行する
///
/// ターゲットディレクトリが読めない場合は起動エラーとして即座に返す。
pub async fn execute(args: &ServeArgs) -> ExporterResult<()> {
    validate_target_dir(&args.poll.folder).await?;

    let config = args.exporter_config();
    let metrics = ConnectivityMetrics::new()?;
    let shutdown = ShutdownController::default();

    let scheduler = PollingScheduler::new(
        &args.poll.folder,
        args.poll.poller_config(),
        metrics.clone(),
        shutdown.clone(),
    )?;
    let poller = scheduler.start();

    let state = AppState {
        metrics,
        shutdown: shutdown.clone(),
    };
    let result = server::run(state, &config.bind_addr()).await;

    // バインド失敗時も含め、サーバーが終了したらスケジューラーを止める
    shutdown.request_shutdown();
    if let Err(e) = poller.await {
        tracing::error!("Task join error: {}", e);
    }
    info!("Service stopped");
    result
}
