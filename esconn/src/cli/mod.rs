//! CLI module for esconn
//!
//! Provides the command-line interface. Running without a subcommand behaves
//! like `serve`, so the flat flag style (`--port`, `--folder`, ...) keeps working.

pub mod scan;
pub mod serve;

use clap::{Args, Parser, Subcommand};
use esconn_common::config::{
    ExporterConfig, DEFAULT_MAX_CONCURRENT_PROBES, DEFAULT_PROBE_TIMEOUT_SECS,
    DEFAULT_SCAN_INTERVAL_SECS,
};
use std::path::PathBuf;

use crate::config::{OverlapPolicy, PollerConfig};

/// esconn - Elasticsearch node connectivity exporter for Prometheus
#[derive(Parser, Debug)]
#[command(name = "esconn")]
#[command(version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    ESCONN_HOST                    Bind address (default: 0.0.0.0)
    ESCONN_PORT                    Listen port (default: 9108)
    ESCONN_LOG_FILE                Log file path (default: stdout)
    ESCONN_LOG_LEVEL               Log level (default: info, overridden by RUST_LOG)
    ESCONN_TARGET_DIR              Cluster definition directory (default: clusters)
    ESCONN_TIMEOUT_SECS            Per-node HTTP timeout in seconds (default: 2)
    ESCONN_SCAN_INTERVAL_SECS      Scan interval in seconds (default: 15)
    ESCONN_OVERLAP                 allow | skip (default: allow)
    ESCONN_MAX_CONCURRENT_PROBES   Probe concurrency cap, 0 = unbounded (default: 256)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Serve options used when no subcommand is given
    #[command(flatten)]
    pub serve: serve::ServeArgs,
}

impl Cli {
    /// Resolve the command to run (`serve` when none is given)
    pub fn into_command(self) -> Commands {
        self.command.unwrap_or(Commands::Serve(self.serve))
    }
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Run the exporter: poll clusters periodically and serve /metrics
    Serve(serve::ServeArgs),
    /// Run a single scan cycle and print the metrics to stdout
    Scan(scan::ScanArgs),
}

/// Polling options shared by `serve` and `scan`
#[derive(Args, Debug, Clone)]
pub struct PollArgs {
    /// Directory containing cluster definition files
    #[arg(long, default_value = "clusters", env = "ESCONN_TARGET_DIR")]
    pub folder: PathBuf,

    /// Timeout for each node request, in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_PROBE_TIMEOUT_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
        env = "ESCONN_TIMEOUT_SECS"
    )]
    pub timeout_value: u64,

    /// Scan interval, in seconds
    #[arg(
        long,
        default_value_t = DEFAULT_SCAN_INTERVAL_SECS,
        value_parser = clap::value_parser!(u64).range(1..),
        env = "ESCONN_SCAN_INTERVAL_SECS"
    )]
    pub interval: u64,

    /// What to do when a tick fires while the previous cycle is still running
    #[arg(long, value_enum, default_value_t = OverlapPolicy::Allow, env = "ESCONN_OVERLAP")]
    pub overlap: OverlapPolicy,

    /// Maximum number of probes in flight (0 = unbounded)
    #[arg(
        long,
        default_value_t = DEFAULT_MAX_CONCURRENT_PROBES,
        env = "ESCONN_MAX_CONCURRENT_PROBES"
    )]
    pub max_concurrent_probes: usize,
}

impl PollArgs {
    /// フラグの値で設定を上書きする
    pub fn apply(&self, base: ExporterConfig) -> ExporterConfig {
        ExporterConfig {
            scan_interval_secs: self.interval,
            probe_timeout_secs: self.timeout_value,
            max_concurrent_probes: self.max_concurrent_probes,
            ..base
        }
    }

    /// ポーリング設定を組み立てる
    pub fn poller_config(&self) -> PollerConfig {
        PollerConfig::from(&self.apply(ExporterConfig::default())).with_overlap(self.overlap)
    }
}
