//! メトリクスAPIハンドラー

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use super::error::AppError;
use crate::AppState;

/// Prometheus テキスト形式の Content-Type
pub const PROMETHEUS_CONTENT_TYPE: &str = "text/plain; version=0.0.4; charset=utf-8";

/// GET /metrics - 記録済みメトリクスをPrometheus形式で返す
///
/// 各ゲージは最後に書き込まれた値のスナップショットで、スクレイプ側の同期は不要。
pub async fn get_metrics(State(state): State<AppState>) -> Result<Response, AppError> {
    let body = state.metrics.gather()?;
    Ok(([(header::CONTENT_TYPE, PROMETHEUS_CONTENT_TYPE)], body).into_response())
}
