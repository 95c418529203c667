//! Status board Server
//!
//! サイト一覧を定期的に監視し、稼働状況とレイテンシを問い合わせに応じて返すサーバー

#![warn(missing_docs)]

/// 共通型定義
pub mod common;

/// REST APIハンドラー
pub mod api;

/// ヘルスチェック監視
pub mod health;

/// エンドポイント登録管理
pub mod registry;

/// 問い合わせカウンター
pub mod metrics;

/// ステータス問い合わせ
pub mod query;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// CLIインターフェース
pub mod cli;

/// 型定義
pub mod types;

/// axumサーバー
pub mod server;

/// Shutdown controller
pub mod shutdown;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// ステータス問い合わせサービス
    pub status_service: query::StatusService,

    /// Cooperative shutdown controller
    pub shutdown: shutdown::ShutdownController,
}
