//! Configuration management
//!
//! Polling configuration shared by the scheduler and the CLI, and the
//! log level taken from the environment.

use esconn_common::config::ExporterConfig;
use std::time::Duration;

/// ログレベルを指定する環境変数
pub const LOG_LEVEL_ENV: &str = "ESCONN_LOG_LEVEL";

/// 前回サイクルが実行中のときに次のtickをどう扱うか
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OverlapPolicy {
    /// 前回サイクルの完了を待たずに次のサイクルを開始する
    #[default]
    Allow,
    /// 前回サイクルが実行中ならそのtickを捨てる
    Skip,
}

impl OverlapPolicy {
    /// ログ・メトリクス用の文字列表現
    pub fn as_str(&self) -> &'static str {
        match self {
            OverlapPolicy::Allow => "allow",
            OverlapPolicy::Skip => "skip",
        }
    }
}

/// ポーリング設定
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PollerConfig {
    /// スキャン間隔
    pub interval: Duration,
    /// ノード1件あたりのHTTPタイムアウト
    pub probe_timeout: Duration,
    /// サイクル重複時の扱い
    pub overlap: OverlapPolicy,
    /// 同時に実行するプローブの上限
    pub max_concurrent_probes: usize,
}

impl Default for PollerConfig {
    fn default() -> Self {
        Self::from(&ExporterConfig::default())
    }
}

impl From<&ExporterConfig> for PollerConfig {
    fn from(config: &ExporterConfig) -> Self {
        Self {
            interval: Duration::from_secs(config.scan_interval_secs),
            probe_timeout: Duration::from_secs(config.probe_timeout_secs),
            overlap: OverlapPolicy::default(),
            max_concurrent_probes: config.max_concurrent_probes,
        }
    }
}

impl PollerConfig {
    /// サイクル重複ポリシーを設定
    pub fn with_overlap(mut self, overlap: OverlapPolicy) -> Self {
        self.overlap = overlap;
        self
    }
}

/// ログレベルを取得
///
/// 環境変数 `ESCONN_LOG_LEVEL` から取得し、未設定の場合は `info` を返す。
pub fn get_log_level() -> String {
    std::env::var(LOG_LEVEL_ENV).unwrap_or_else(|_| "info".to_string())
}
