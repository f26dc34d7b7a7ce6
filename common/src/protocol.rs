//! 通信プロトコル定義
//!
//! Elasticsearch `GET /_cluster/stats` レスポンスのうち、
//! ノード接続状況に関わる部分だけを扱う。

use serde::{Deserialize, Serialize};

use crate::error::CommonResult;
use crate::types::ProbeResult;

/// クラスタ統計APIのパス
pub const CLUSTER_STATS_PATH: &str = "/_cluster/stats";

/// `GET /_cluster/stats` レスポンス
///
/// 他のフィールドは無視する。`_nodes` が無い場合は全て0になる。
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClusterStatsResponse {
    /// ノード接続状況
    #[serde(rename = "_nodes", default)]
    pub nodes: ProbeResult,
}

impl ClusterStatsResponse {
    /// レスポンスボディをパースする
    pub fn from_slice(body: &[u8]) -> CommonResult<Self> {
        Ok(serde_json::from_slice(body)?)
    }
}

/// ノードのクラスタ統計URLを組み立てる
pub fn cluster_stats_url(authority: &str) -> String {
    format!("http://{}{}", authority, CLUSTER_STATS_PATH)
}
