//! ノードヘルスチェック
//!
//! PULL型でElasticsearchノードの接続状況を取得する
//! （`GET /_cluster/stats` の `_nodes` を転記する）。

pub mod node_probe;

pub use node_probe::{NodeProbe, ProbeOutcome};
