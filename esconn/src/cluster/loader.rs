//! クラスタ定義ローダー

use esconn_common::types::ClusterDescriptor;
use std::path::Path;

use crate::error::{ExporterError, ExporterResult};

/// クラスタ定義ファイルを読み込む
///
/// `node_list` が無い場合は空のノード一覧として成功する。
/// JSONとして壊れている・`cluster_name` が無い場合は [`ExporterError::ConfigParse`]。
pub async fn load(path: &Path) -> ExporterResult<ClusterDescriptor> {
    let bytes = tokio::fs::read(path)
        .await
        .map_err(|source| ExporterError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

    serde_json::from_slice(&bytes).map_err(|source| ExporterError::ConfigParse {
        path: path.to_path_buf(),
        source,
    })
}
