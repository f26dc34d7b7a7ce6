//! 共通型定義
//!
//! ClusterDescriptor, NodeAddress, ProbeResult等のコアデータ型

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

use crate::error::{CommonError, CommonResult};

/// ネットワーク障害時に記録する失敗数
pub const TRANSPORT_FAILURE_COUNT: i64 = 1;

/// クラスタ定義
///
/// 監視ディレクトリ内のJSONファイル1つに対応する。
/// サイクルごとに読み直され、サイクルをまたいで保持されない。
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ClusterDescriptor {
    /// クラスタ名（メトリクスの `cluster` ラベル）
    #[serde(rename = "cluster_name")]
    pub name: String,
    /// ノードアドレス一覧（`host:port`）
    ///
    /// 未指定・`null` の場合は空として扱う。
    #[serde(rename = "node_list", default, deserialize_with = "null_as_empty")]
    pub nodes: Vec<String>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<String>>::deserialize(deserializer)?.unwrap_or_default())
}

impl ClusterDescriptor {
    /// 新しいクラスタ定義を作成
    pub fn new(name: impl Into<String>, nodes: Vec<String>) -> Self {
        Self {
            name: name.into(),
            nodes,
        }
    }
}

/// ノードアドレス
///
/// `host:port` 形式の文字列を検証済みの形で保持する。
/// `[::1]:9200` のような角括弧付きIPv6も受け付け、ホスト部は括弧なしで保持する。
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeAddress {
    raw: String,
    host: String,
    port: u16,
}

impl NodeAddress {
    /// `host:port` 文字列をパースする
    pub fn parse(address: &str) -> CommonResult<Self> {
        let invalid = |reason: &'static str| CommonError::InvalidNodeAddress {
            address: address.to_string(),
            reason,
        };

        let raw = address.trim();
        let (host, port) = if let Some(rest) = raw.strip_prefix('[') {
            let end = rest.find(']').ok_or_else(|| invalid("missing ']'"))?;
            let host = &rest[..end];
            let port = rest[end + 1..]
                .strip_prefix(':')
                .ok_or_else(|| invalid("missing port"))?;
            (host, port)
        } else {
            let (host, port) = raw.rsplit_once(':').ok_or_else(|| invalid("missing port"))?;
            if host.contains(':') {
                return Err(invalid("too many colons"));
            }
            (host, port)
        };

        if host.is_empty() {
            return Err(invalid("empty host"));
        }
        let port = port.parse::<u16>().map_err(|_| invalid("invalid port"))?;

        Ok(Self {
            raw: raw.to_string(),
            host: host.to_string(),
            port,
        })
    }

    /// ホスト部（メトリクスの `ip` ラベル）
    pub fn host(&self) -> &str {
        &self.host
    }

    /// ポート番号
    pub fn port(&self) -> u16 {
        self.port
    }

    /// 設定ファイルに書かれた `host:port` 表記
    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

impl fmt::Display for NodeAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl std::str::FromStr for NodeAddress {
    type Err = CommonError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

/// ノード接続状況のプローブ結果
///
/// 成功時の値は probe 先の Elasticsearch が自己申告した `_nodes` の値そのもので、
/// ローカルで数え直したものではない。
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProbeResult {
    /// 総ノード数
    #[serde(default)]
    pub total: i64,
    /// 応答に成功したノード数
    #[serde(default)]
    pub successful: i64,
    /// 応答に失敗したノード数
    #[serde(default)]
    pub failed: i64,
}

impl ProbeResult {
    /// 値を指定して作成
    pub fn new(total: i64, successful: i64, failed: i64) -> Self {
        Self {
            total,
            successful,
            failed,
        }
    }

    /// ネットワーク障害時の結果（`failed = 1`、他は0）
    pub fn transport_failure() -> Self {
        Self {
            failed: TRANSPORT_FAILURE_COUNT,
            ..Self::default()
        }
    }
}
