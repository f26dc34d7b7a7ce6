//! エラー型定義
//!
//! 統一エラー型（thiserror使用）
//!
//! 起動時エラー（ターゲットディレクトリ・ログファイル・ポートバインド等）はプロセスを終了させる。
//! それ以外はサイクル内で局所化され、ログとメトリクスでのみ通知される。

use esconn_common::error::CommonError;
use std::path::PathBuf;
use thiserror::Error;

/// exporter error type
#[derive(Debug, Error)]
pub enum ExporterError {
    /// Common layer error
    #[error(transparent)]
    Common(#[from] CommonError),

    /// Target directory could not be listed
    #[error("Failed to read directory {}: {source}", .path.display())]
    DirectoryRead {
        /// Directory being scanned
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Cluster file could not be read
    #[error("Failed to read cluster file {}: {source}", .path.display())]
    ConfigRead {
        /// Cluster file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Cluster file is not a valid cluster definition
    #[error("Failed to parse cluster file {}: {source}", .path.display())]
    ConfigParse {
        /// Cluster file path
        path: PathBuf,
        /// Underlying JSON error
        #[source]
        source: serde_json::Error,
    },

    /// HTTP request to a node failed at the transport level
    #[error("HTTP request to {node} failed: {source}")]
    ProbeTransport {
        /// Node address (`host:port`)
        node: String,
        /// Underlying client error
        #[source]
        source: reqwest::Error,
    },

    /// Node answered with a body that is not a cluster stats document
    #[error("Failed to parse node info from {node}: {reason}")]
    ProbeDecode {
        /// Node address (`host:port`)
        node: String,
        /// Decoder message
        reason: String,
    },

    /// Target directory does not exist or is not a directory
    #[error("Target directory {} is not a readable directory", .0.display())]
    InvalidTargetDir(PathBuf),

    /// Log file could not be opened
    #[error("Error opening log file {}: {source}", .path.display())]
    LogFile {
        /// Log file path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Logging subscriber could not be installed
    #[error("Logging initialization error: {0}")]
    Logging(String),

    /// Listener could not bind
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        /// Requested bind address
        addr: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// HTTP server terminated with an error
    #[error("Server error: {0}")]
    Server(#[source] std::io::Error),

    /// HTTP client could not be built
    #[error("HTTP client error: {0}")]
    HttpClient(#[source] reqwest::Error),

    /// Metrics registration or encoding failed
    #[error("Metrics error: {0}")]
    Metrics(#[from] prometheus::Error),
}

impl ExporterError {
    /// メトリクスの `kind` ラベルに使う分類名
    pub fn kind(&self) -> &'static str {
        match self {
            ExporterError::Common(CommonError::InvalidNodeAddress { .. }) => "address",
            ExporterError::Common(CommonError::Serialization(_)) => "parse",
            ExporterError::DirectoryRead { .. } => "directory",
            ExporterError::ConfigRead { .. } | ExporterError::ConfigParse { .. } => "parse",
            ExporterError::ProbeTransport { .. } => "transport",
            ExporterError::ProbeDecode { .. } => "decode",
            ExporterError::InvalidTargetDir(_)
            | ExporterError::LogFile { .. }
            | ExporterError::Logging(_)
            | ExporterError::Bind { .. }
            | ExporterError::Server(_)
            | ExporterError::HttpClient(_)
            | ExporterError::Metrics(_) => "startup",
        }
    }
}

/// Result alias for the exporter
pub type ExporterResult<T> = Result<T, ExporterError>;
