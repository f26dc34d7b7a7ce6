//! Prometheus メトリクス
//!
//! ノード接続状況を `(ip, cluster)` ラベル付きゲージとして保持し、
//! `/metrics` エンドポイントから pull 型で公開する。
//!
//! 書き込みは常に上書き（last-write-wins）で、以前の値を読むことはない。
//! スレッド安全性は prometheus レジストリに委ねており、呼び出し側でのロックは不要。

use esconn_common::types::ProbeResult;
use prometheus::{IntCounterVec, IntGauge, IntGaugeVec, Opts, Registry, TextEncoder};

use crate::error::ExporterResult;

/// 接続失敗数ゲージ名
pub const CONNECTIVITY_FAILED: &str = "elasticsearch_node_connectivity_failed";
/// 接続成功数ゲージ名
pub const CONNECTIVITY_SUCCESSFUL: &str = "elasticsearch_node_connectivity_successful";
/// 総ノード数ゲージ名
pub const CONNECTIVITY_TOTAL: &str = "elasticsearch_node_connectivity_total";

/// 接続状況ゲージのラベル名
pub const NODE_LABELS: [&str; 2] = ["ip", "cluster"];

/// プロセス全体で共有するメトリクスシンク
///
/// 各メトリクスは内部で `Arc` を保持しているため、`Clone` は安価で同じ値を指す。
#[derive(Clone)]
pub struct ConnectivityMetrics {
    registry: Registry,
    failed: IntGaugeVec,
    successful: IntGaugeVec,
    total: IntGaugeVec,
    probe_errors: IntCounterVec,
    config_errors: IntCounterVec,
    scan_cycles: IntCounterVec,
    last_scan_timestamp: IntGauge,
}

impl ConnectivityMetrics {
    /// 新しいレジストリにメトリクスを登録して作成
    pub fn new() -> ExporterResult<Self> {
        let registry = Registry::new();

        let failed = IntGaugeVec::new(
            Opts::new(CONNECTIVITY_FAILED, "Elastic Search Node Connectivity Failed"),
            &NODE_LABELS,
        )?;
        let successful = IntGaugeVec::new(
            Opts::new(
                CONNECTIVITY_SUCCESSFUL,
                "Elastic Search Node Connectivity Successful",
            ),
            &NODE_LABELS,
        )?;
        let total = IntGaugeVec::new(
            Opts::new(CONNECTIVITY_TOTAL, "Elastic Search Node Connectivity Total"),
            &NODE_LABELS,
        )?;
        let probe_errors = IntCounterVec::new(
            Opts::new(
                "esconn_probe_errors_total",
                "Node probes that failed, by failure kind",
            ),
            &["kind"],
        )?;
        let config_errors = IntCounterVec::new(
            Opts::new(
                "esconn_config_errors_total",
                "Cluster directory, file and address errors, by kind",
            ),
            &["kind"],
        )?;
        let scan_cycles = IntCounterVec::new(
            Opts::new("esconn_scan_cycles_total", "Scan cycles, by outcome"),
            &["outcome"],
        )?;
        let last_scan_timestamp = IntGauge::new(
            "esconn_last_scan_timestamp_seconds",
            "Unix time of the last completed scan cycle",
        )?;

        registry.register(Box::new(failed.clone()))?;
        registry.register(Box::new(successful.clone()))?;
        registry.register(Box::new(total.clone()))?;
        registry.register(Box::new(probe_errors.clone()))?;
        registry.register(Box::new(config_errors.clone()))?;
        registry.register(Box::new(scan_cycles.clone()))?;
        registry.register(Box::new(last_scan_timestamp.clone()))?;

        Ok(Self {
            registry,
            failed,
            successful,
            total,
            probe_errors,
            config_errors,
            scan_cycles,
            last_scan_timestamp,
        })
    }

    /// ノードのプローブ結果を記録する
    ///
    /// `(host, cluster)` の3ゲージを無条件に上書きする。
    pub fn record(&self, host: &str, cluster: &str, result: &ProbeResult) {
        let labels = [host, cluster];
        self.failed.with_label_values(&labels).set(result.failed);
        self.successful
            .with_label_values(&labels)
            .set(result.successful);
        self.total.with_label_values(&labels).set(result.total);
    }

    /// 記録済みの値を読み出す
    ///
    /// 未記録のラベルに対しては値0の系列が作成される点に注意。
    pub fn sample(&self, host: &str, cluster: &str) -> ProbeResult {
        let labels = [host, cluster];
        ProbeResult {
            total: self.total.with_label_values(&labels).get(),
            successful: self.successful.with_label_values(&labels).get(),
            failed: self.failed.with_label_values(&labels).get(),
        }
    }

    /// プローブ失敗を分類ごとに数える（`transport` / `decode`）
    pub fn inc_probe_error(&self, kind: &str) {
        self.probe_errors.with_label_values(&[kind]).inc();
    }

    /// 設定関連エラーを分類ごとに数える（`directory` / `parse` / `address`）
    pub fn inc_config_error(&self, kind: &str) {
        self.config_errors.with_label_values(&[kind]).inc();
    }

    /// スキャンサイクルを結果ごとに数える（`completed` / `skipped` / `failed`）
    pub fn inc_scan_cycle(&self, outcome: &str) {
        self.scan_cycles.with_label_values(&[outcome]).inc();
    }

    /// 最終スキャン完了時刻を記録
    pub fn set_last_scan_timestamp(&self, unix_secs: i64) {
        self.last_scan_timestamp.set(unix_secs);
    }

    /// 分類ごとのプローブ失敗数
    pub fn probe_error_count(&self, kind: &str) -> u64 {
        self.probe_errors.with_label_values(&[kind]).get()
    }

    /// 分類ごとの設定エラー数
    pub fn config_error_count(&self, kind: &str) -> u64 {
        self.config_errors.with_label_values(&[kind]).get()
    }

    /// 結果ごとのスキャンサイクル数
    pub fn scan_cycle_count(&self, outcome: &str) -> u64 {
        self.scan_cycles.with_label_values(&[outcome]).get()
    }

    /// Prometheus テキスト形式にエンコードする
    pub fn gather(&self) -> ExporterResult<String> {
        let encoder = TextEncoder::new();
        let metric_families = self.registry.gather();
        Ok(encoder.encode_to_string(&metric_families)?)
    }
}
