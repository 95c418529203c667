//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::StatusError;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub StatusError);

impl From<StatusError> for AppError {
    fn from(err: StatusError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        match &self.0 {
            StatusError::NotFound(_) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": self.0.to_string() })),
            )
                .into_response(),
            // 204はボディを持てない
            StatusError::Empty => StatusCode::NO_CONTENT.into_response(),
        }
    }
}
