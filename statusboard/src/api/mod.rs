//! REST APIハンドラー
//!
//! ステータス問い合わせ、カウンター参照、サービス自身のヘルスチェック

pub mod error;
pub mod metrics;
pub mod status;

use crate::AppState;
use axum::{routing::get, Router};
use tower_http::trace::TraceLayer;

/// APIルーターを作成
pub fn create_app(state: AppState) -> Router {
    Router::new()
        .route("/status/site/:site", get(status::get_site))
        .route("/status/min", get(status::get_min))
        .route("/status/max", get(status::get_max))
        .route("/status/random", get(status::get_random))
        .route("/metrics", get(metrics::all))
        .route("/metrics/:site", get(metrics::get_site))
        .route("/health", get(status::health))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
