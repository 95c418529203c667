//! カウンター参照APIハンドラー

use super::error::AppError;
use crate::common::error::StatusError;
use crate::AppState;
use axum::{
    extract::{Path, State},
    Json,
};
use serde::Serialize;
use std::collections::BTreeMap;

/// サイト単位のカウンター値
#[derive(Debug, Serialize)]
pub struct SiteCounter {
    /// サイト名
    pub name: String,
    /// 問い合わせ回数
    pub checks: u64,
}

/// GET /metrics - 全サイトのカウンター
pub async fn all(State(state): State<AppState>) -> Json<BTreeMap<String, u64>> {
    Json(state.status_service.counters().snapshot())
}

/// GET /metrics/:site - 1サイトのカウンター
///
/// 監視対象に存在しないサイトは404。
pub async fn get_site(
    State(state): State<AppState>,
    Path(site): Path<String>,
) -> Result<Json<SiteCounter>, AppError> {
    if state.status_service.registry().get(&site).is_none() {
        return Err(StatusError::NotFound(site).into());
    }

    let checks = state.status_service.counters().count(&site);
    Ok(Json(SiteCounter { name: site, checks }))
}
