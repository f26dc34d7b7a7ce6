//! ポーリングスケジューラー
//!
//! 一定間隔でターゲットディレクトリを走査し、クラスタファイルごと・ノードごとに
//! タスクを起動してプローブ結果をメトリクスへ書き込む。
//!
//! タイマータスクはサイクルを起動した時点でIdleに戻り、実行中のプローブを待たない。
//! 前回サイクルとの重複は [`OverlapPolicy`] で制御する。

use chrono::Utc;
use esconn_common::types::NodeAddress;
use std::path::PathBuf;
use std::sync::{
    atomic::{AtomicBool, Ordering},
    Arc,
};
use tokio::sync::Semaphore;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::{interval, MissedTickBehavior};
use tracing::{debug, error, info, info_span, warn, Instrument};
use uuid::Uuid;

use super::cycle::CycleSummary;
use crate::cluster::{self, ClusterFile};
use crate::config::{OverlapPolicy, PollerConfig};
use crate::error::{ExporterError, ExporterResult};
use crate::health::{NodeProbe, ProbeOutcome};
use crate::metrics::ConnectivityMetrics;
use crate::shutdown::ShutdownController;

/// ポーリングスケジューラー
#[derive(Clone)]
pub struct PollingScheduler {
    /// クラスタ定義ディレクトリ
    target_dir: PathBuf,
    /// ポーリング設定
    config: PollerConfig,
    /// ノードプローブ
    node_probe: NodeProbe,
    /// メトリクスシンク
    metrics: ConnectivityMetrics,
    /// 同時プローブ数の上限
    limiter: Arc<Semaphore>,
    /// サイクル実行中フラグ（`OverlapPolicy::Skip` のときのみ使用）
    busy: Arc<AtomicBool>,
    /// 停止シグナル
    shutdown: ShutdownController,
}

impl PollingScheduler {
    /// 新しいスケジューラーを作成
    pub fn new(
        target_dir: impl Into<PathBuf>,
        config: PollerConfig,
        metrics: ConnectivityMetrics,
        shutdown: ShutdownController,
    ) -> ExporterResult<Self> {
        let node_probe = NodeProbe::new(config.probe_timeout)?;
        let permits = match config.max_concurrent_probes {
            0 => Semaphore::MAX_PERMITS,
            n => n.min(Semaphore::MAX_PERMITS),
        };

        Ok(Self {
            target_dir: target_dir.into(),
            config,
            node_probe,
            metrics,
            limiter: Arc::new(Semaphore::new(permits)),
            busy: Arc::new(AtomicBool::new(false)),
            shutdown,
        })
    }

    /// バックグラウンドでポーリングを開始
    pub fn start(self) -> JoinHandle<()> {
        tokio::spawn(async move { self.run_loop().await })
    }

    /// ポーリングループ
    ///
    /// 最初のtickは即座に発火するため、起動直後に1サイクル目が走る。
    async fn run_loop(&self) {
        let mut timer = interval(self.config.interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        info!(
            interval_secs = self.config.interval.as_secs_f64(),
            timeout_secs = self.config.probe_timeout.as_secs_f64(),
            overlap = self.config.overlap.as_str(),
            max_concurrent_probes = self.config.max_concurrent_probes,
            target_dir = %self.target_dir.display(),
            "Polling scheduler started"
        );

        loop {
            tokio::select! {
                _ = timer.tick() => {
                    self.dispatch_cycle();
                }
                _ = self.shutdown.wait() => {
                    info!("Polling scheduler stopped");
                    break;
                }
            }
        }
    }

    /// サイクルを切り離されたタスクとして起動する
    ///
    /// `OverlapPolicy::Skip` で前回サイクルが実行中の場合は起動せず `None` を返す。
    pub fn dispatch_cycle(&self) -> Option<JoinHandle<()>> {
        let guard = match self.config.overlap {
            OverlapPolicy::Allow => None,
            OverlapPolicy::Skip => {
                if self.busy.swap(true, Ordering::SeqCst) {
                    warn!("Previous scan cycle still running, skipping this tick");
                    self.metrics.inc_scan_cycle("skipped");
                    return None;
                }
                Some(BusyGuard {
                    busy: self.busy.clone(),
                })
            }
        };

        let scheduler = self.clone();
        Some(tokio::spawn(async move {
            let _guard = guard;
            if let Err(e) = scheduler.scan_once().await {
                debug!(error = %e, "Scan cycle skipped");
            }
        }))
    }

    /// 1サイクルを実行し、起動した全タスクの完了を待つ
    ///
    /// ディレクトリが読めない場合はサイクル全体をスキップしてエラーを返す。
    /// ファイル単位・ノード単位の失敗はサイクルを中断しない。
    pub async fn scan_once(&self) -> ExporterResult<CycleSummary> {
        let cycle_id = Uuid::new_v4();
        let span = info_span!("scan_cycle", %cycle_id);
        self.run_cycle().instrument(span).await
    }

    async fn run_cycle(&self) -> ExporterResult<CycleSummary> {
        let files = match cluster::list_files(&self.target_dir).await {
            Ok(files) => files,
            Err(e) => {
                error!(error = %e, "Can't get list files");
                self.metrics.inc_config_error(e.kind());
                self.metrics.inc_scan_cycle("failed");
                return Err(e);
            }
        };

        let mut tasks = JoinSet::new();
        for file in files {
            debug!(file = %file.file_name, "Check file");
            if file.is_dir {
                continue;
            }
            let scheduler = self.clone();
            tasks.spawn(async move { scheduler.process_file(file).await }.in_current_span());
        }

        let mut summary = CycleSummary::default();
        while let Some(joined) = tasks.join_next().await {
            match joined {
                Ok(file_summary) => summary.merge(file_summary),
                Err(e) => error!("Task join error: {}", e),
            }
        }

        self.metrics.inc_scan_cycle("completed");
        self.metrics.set_last_scan_timestamp(Utc::now().timestamp());

        info!(
            files_loaded = summary.files_loaded,
            files_failed = summary.files_failed,
            probes_reported = summary.probes_reported,
            probes_transport_failed = summary.probes_transport_failed,
            probes_decode_failed = summary.probes_decode_failed,
            addresses_skipped = summary.addresses_skipped,
            "Scan cycle completed"
        );

        Ok(summary)
    }

    /// クラスタファイル1件を読み込み、全ノードを並列にプローブする
    async fn process_file(&self, file: ClusterFile) -> CycleSummary {
        let cluster = match cluster::load(&file.path).await {
            Ok(cluster) => cluster,
            Err(e) => {
                warn!(file = %file.file_name, error = %e, "Can't load config");
                self.metrics.inc_config_error(e.kind());
                return CycleSummary::file_failed();
            }
        };

        if cluster.nodes.is_empty() {
            warn!(file = %file.file_name, cluster = %cluster.name, "Cluster file has no nodes");
        }

        let mut summary = CycleSummary {
            files_loaded: 1,
            ..CycleSummary::default()
        };
        let mut probes = JoinSet::new();

        for raw in &cluster.nodes {
            let node = match NodeAddress::parse(raw).map_err(ExporterError::from) {
                Ok(node) => node,
                Err(e) => {
                    debug!(
                        file = %file.file_name,
                        cluster = %cluster.name,
                        error = %e,
                        "Skipping malformed node address"
                    );
                    self.metrics.inc_config_error(e.kind());
                    summary.addresses_skipped += 1;
                    continue;
                }
            };

            let scheduler = self.clone();
            let cluster_name = cluster.name.clone();
            probes.spawn(
                async move { scheduler.update_node(node, cluster_name).await }.in_current_span(),
            );
        }

        while let Some(joined) = probes.join_next().await {
            match joined {
                Ok(outcome) => summary.count_probe(&outcome),
                Err(e) => error!("Task join error: {}", e),
            }
        }

        summary
    }

    /// ノード1台をプローブしてメトリクスを更新する
    async fn update_node(&self, node: NodeAddress, cluster_name: String) -> ProbeOutcome {
        // セマフォはcloseしないため、取得失敗時はそのまま続行する
        let _permit = self.limiter.acquire().await.ok();

        let outcome = self.node_probe.probe(&node).await;
        if let Some(e) = outcome.error() {
            self.metrics.inc_probe_error(e.kind());
        }

        let result = outcome.result();
        self.metrics.record(node.host(), &cluster_name, &result);

        debug!(
            node = %node,
            cluster = %cluster_name,
            total = result.total,
            successful = result.successful,
            failed = result.failed,
            "Node metrics updated"
        );

        outcome
    }
}

/// サイクル終了時に実行中フラグを下ろす
struct BusyGuard {
    busy: Arc<AtomicBool>,
}

impl Drop for BusyGuard {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::SeqCst);
    }
}
