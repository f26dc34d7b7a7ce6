//! REST APIハンドラー
//!
//! `/metrics`（Prometheusスクレイプ用）と `/health`（死活監視用）を提供する。

pub mod error;
pub mod metrics;

use axum::{routing::get, Json, Router};
use serde_json::{json, Value};
use tower_http::trace::TraceLayer;

use crate::AppState;

/// APIルーターを作成
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/metrics", get(metrics::get_metrics))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - プロセスの死活確認
async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
