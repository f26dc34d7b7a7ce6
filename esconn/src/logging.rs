//! ロギング初期化ユーティリティ
//!
//! `RUST_LOG` があればそれを優先し、無ければ `ESCONN_LOG_LEVEL`（既定: info）を使う。
//! ログファイルが指定された場合は追記モードで開き、ノンブロッキングで書き込む。

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::get_log_level;
use crate::error::{ExporterError, ExporterResult};

/// ログの出力先
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    /// 標準出力
    Stdout,
    /// 標準エラー出力（`scan` のように標準出力を結果に使う場合）
    Stderr,
    /// ファイル（追記）
    File(PathBuf),
}

/// ロギングを初期化する
///
/// 返り値の `WorkerGuard` はプロセス終了まで保持すること（dropするとバッファが捨てられる）。
pub fn init(target: &LogTarget) -> ExporterResult<Option<WorkerGuard>> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(get_log_level()))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(env_filter);

    let (result, guard) = match target {
        LogTarget::Stdout => (registry.with(fmt::layer()).try_init(), None),
        LogTarget::Stderr => (
            registry
                .with(fmt::layer().with_writer(std::io::stderr))
                .try_init(),
            None,
        ),
        LogTarget::File(path) => {
            let file = open_log_file(path)?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            (
                registry
                    .with(fmt::layer().with_ansi(false).with_writer(writer))
                    .try_init(),
                Some(guard),
            )
        }
    };

    result.map_err(|e| ExporterError::Logging(e.to_string()))?;
    Ok(guard)
}

/// ログファイルを追記モードで開く（無ければ作成）
pub fn open_log_file(path: &Path) -> ExporterResult<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| ExporterError::LogFile {
            path: path.to_path_buf(),
            source,
        })
}
