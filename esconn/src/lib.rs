//! Elasticsearch node connectivity exporter
//!
//! クラスタ定義ファイルに列挙されたノードを定期的にプローブし、
//! 疎通状況をPrometheusメトリクスとして公開する

#![warn(missing_docs)]

/// REST APIハンドラー（/metrics, /health）
pub mod api;

/// CLIインターフェース
pub mod cli;

/// クラスタ定義ファイルの列挙・読み込み
pub mod cluster;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// エラー型定義
pub mod error;

/// ノードプローブ
pub mod health;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 疎通メトリクスの保持・エクスポジション
pub mod metrics;

/// スキャンサイクルのスケジューリング
pub mod poller;

/// axumサーバー
pub mod server;

/// シャットダウン制御
pub mod shutdown;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// 疎通メトリクス（スケジューラーと共有）
    pub metrics: metrics::ConnectivityMetrics,
    /// シャットダウンコントローラー
    pub shutdown: shutdown::ShutdownController,
}
