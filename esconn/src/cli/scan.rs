//! scan サブコマンド
//!
//! スキャンサイクルを1回だけ実行し、結果をPrometheus形式で返す。
//! 設定ファイルの確認や疎通確認に使う。

use clap::Args;

use super::PollArgs;
use crate::cluster::validate_target_dir;
use crate::error::ExporterResult;
use crate::metrics::ConnectivityMetrics;
use crate::poller::PollingScheduler;
use crate::shutdown::ShutdownController;

/// scan サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ScanArgs {
    /// Polling options
    #[command(flatten)]
    pub poll: PollArgs,
}

/// scan を実行し、エクスポジション形式のテキストを返す
pub async fn execute(args: &ScanArgs) -> ExporterResult<String> {
    validate_target_dir(&args.poll.folder).await?;

    let metrics = ConnectivityMetrics::new()?;
    let scheduler = PollingScheduler::new(
        &args.poll.folder,
        args.poll.poller_config(),
        metrics.clone(),
        ShutdownController::default(),
    )?;

    scheduler.scan_once().await?;
    metrics.gather()
}
