//! ステータス問い合わせAPIハンドラー

use super::error::AppError;
use crate::types::endpoint::EndpointStatus;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;

/// GET /status/site/:site - 名前指定でサイトの状態を取得
pub async fn get_site(
    State(state): State<AppState>,
    Path(site): Path<String>,
) -> Result<Json<EndpointStatus>, AppError> {
    Ok(Json(state.status_service.get(&site)?))
}

/// GET /status/min - 最小レイテンシの稼働中サイト
pub async fn get_min(State(state): State<AppState>) -> Result<Json<EndpointStatus>, AppError> {
    Ok(Json(state.status_service.get_min()?))
}

/// GET /status/max - 最大レイテンシの稼働中サイト
pub async fn get_max(State(state): State<AppState>) -> Result<Json<EndpointStatus>, AppError> {
    Ok(Json(state.status_service.get_max()?))
}

/// GET /status/random - ランダムなサイト（稼働状況は問わない）
pub async fn get_random(State(state): State<AppState>) -> Result<Json<EndpointStatus>, AppError> {
    Ok(Json(state.status_service.get_random()?))
}

/// サービス自身のヘルス情報
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    /// 常に "ok"
    pub status: &'static str,
    /// 監視対象数
    pub endpoints: usize,
    /// 稼働中の監視対象数
    pub available: usize,
}

/// GET /health - サービス自身の稼働確認（カウンターは加算しない）
pub async fn health(State(state): State<AppState>) -> Json<ServiceHealth> {
    let registry = state.status_service.registry();
    Json(ServiceHealth {
        status: "ok",
        endpoints: registry.len(),
        available: registry.list_available().len(),
    })
}
