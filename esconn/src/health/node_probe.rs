//! ノードプローブ
//!
//! ノード1台に `GET /_cluster/stats` を1回だけ送り、`_nodes` の接続状況を取得する。
//!
//! - リトライ・バックオフ・サーキットブレーカーは持たない
//! - 通信エラー（タイムアウト、接続拒否、DNS失敗）は `failed = 1` として扱う
//! - ボディが壊れている場合は全て0の結果になる（ログとメトリクスには残す）

use esconn_common::protocol::{cluster_stats_url, ClusterStatsResponse};
use esconn_common::types::{NodeAddress, ProbeResult};
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, warn};

use crate::error::{ExporterError, ExporterResult};

/// プローブ結果の分類
#[derive(Debug)]
pub enum ProbeOutcome {
    /// ノードが `_nodes` を返した（値はそのまま転記）
    Reported(ProbeResult),
    /// 通信エラー
    TransportError(ExporterError),
    /// レスポンスボディのパース失敗
    DecodeError(ExporterError),
}

impl ProbeOutcome {
    /// メトリクスに書き込む値
    pub fn result(&self) -> ProbeResult {
        match self {
            ProbeOutcome::Reported(result) => *result,
            ProbeOutcome::TransportError(_) => ProbeResult::transport_failure(),
            ProbeOutcome::DecodeError(_) => ProbeResult::default(),
        }
    }

    /// 失敗時のエラー
    pub fn error(&self) -> Option<&ExporterError> {
        match self {
            ProbeOutcome::Reported(_) => None,
            ProbeOutcome::TransportError(e) | ProbeOutcome::DecodeError(e) => Some(e),
        }
    }
}

/// ノードプローブ
///
/// 内部の `reqwest::Client` は接続プールを共有するため、`Clone` して各タスクに渡す。
#[derive(Clone, Debug)]
pub struct NodeProbe {
    /// HTTPクライアント（タイムアウト設定済み）
    client: Client,
}

impl NodeProbe {
    /// タイムアウトを指定してプローブを作成
    pub fn new(timeout: Duration) -> ExporterResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ExporterError::HttpClient)?;

        Ok(Self { client })
    }

    /// ノードをプローブして分類付きの結果を返す
    ///
    /// メトリクスに書き込む値は [`ProbeOutcome::result`] で得る。
    pub async fn probe(&self, node: &NodeAddress) -> ProbeOutcome {
        let url = cluster_stats_url(node.as_str());

        let response = match self.client.get(&url).send().await {
            Ok(response) => response,
            Err(source) => {
                let error = ExporterError::ProbeTransport {
                    node: node.to_string(),
                    source,
                };
                warn!(node = %node, error = %error, "The HTTP request failed");
                return ProbeOutcome::TransportError(error);
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!(node = %node, status = %status, "Cluster stats returned non-success status");
        }

        // ボディ受信中のタイムアウト・切断も通信エラーとして扱う
        let body = match response.bytes().await {
            Ok(body) => body,
            Err(source) => {
                let error = ExporterError::ProbeTransport {
                    node: node.to_string(),
                    source,
                };
                warn!(node = %node, error = %error, "Failed to read cluster stats body");
                return ProbeOutcome::TransportError(error);
            }
        };

        match ClusterStatsResponse::from_slice(&body) {
            Ok(stats) => {
                debug!(
                    node = %node,
                    total = stats.nodes.total,
                    successful = stats.nodes.successful,
                    failed = stats.nodes.failed,
                    "Node info received"
                );
                ProbeOutcome::Reported(stats.nodes)
            }
            Err(e) => {
                let error = ExporterError::ProbeDecode {
                    node: node.to_string(),
                    reason: e.to_string(),
                };
                warn!(node = %node, error = %error, "Failed to parse node info result");
                ProbeOutcome::DecodeError(error)
            }
        }
    }
}
