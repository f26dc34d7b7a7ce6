//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;
use tracing::error;

use crate::error::ExporterError;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub ExporterError);

impl From<ExporterError> for AppError {
    fn from(err: ExporterError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        // スクレイプ失敗はサーバー側の問題のみ
        error!(error = %self.0, "Request failed");

        let payload = json!({
            "error": self.0.to_string()
        });

        (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
    }
}
