//! 設定管理
//!
//! ExporterConfig等の設定構造体

/// デフォルトのバインドアドレス
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// デフォルトのメトリクス待受ポート
pub const DEFAULT_PORT: u16 = 9108;

/// デフォルトのスキャン間隔（秒）
pub const DEFAULT_SCAN_INTERVAL_SECS: u64 = 15;

/// デフォルトのプローブタイムアウト（秒）
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 2;

/// デフォルトの同時プローブ上限
pub const DEFAULT_MAX_CONCURRENT_PROBES: usize = 256;

/// Exporter設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExporterConfig {
    /// ホストアドレス (デフォルト: "0.0.0.0")
    pub host: String,

    /// ポート番号 (デフォルト: 9108)
    pub port: u16,

    /// スキャン間隔（秒）(デフォルト: 15)
    pub scan_interval_secs: u64,

    /// プローブタイムアウト（秒）(デフォルト: 2)
    pub probe_timeout_secs: u64,

    /// 同時プローブ上限 (デフォルト: 256)
    pub max_concurrent_probes: usize,
}

impl Default for ExporterConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            scan_interval_secs: DEFAULT_SCAN_INTERVAL_SECS,
            probe_timeout_secs: DEFAULT_PROBE_TIMEOUT_SECS,
            max_concurrent_probes: DEFAULT_MAX_CONCURRENT_PROBES,
        }
    }
}

impl ExporterConfig {
    /// `host:port` 形式のバインドアドレス
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
