//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use std::path::PathBuf;
use thiserror::Error;

/// 問い合わせ層のエラー
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum StatusError {
    /// 指定された名前のエンドポイントが存在しない
    #[error("Unknown site: {0}")]
    NotFound(String),

    /// 条件を満たすエンドポイントが存在しない
    #[error("No sites")]
    Empty,
}

/// サイト一覧の1行をエンドポイントとして解釈できなかった
#[derive(Debug, Error)]
pub enum EndpointParseError {
    /// URLとして不正
    #[error("invalid address '{raw}': {source}")]
    InvalidUrl {
        /// 元の行
        raw: String,
        /// パースエラー
        #[source]
        source: url::ParseError,
    },

    /// HTTP/HTTPS以外のスキーム
    #[error("unsupported scheme '{scheme}' in '{raw}'")]
    UnsupportedScheme {
        /// 元の行
        raw: String,
        /// 指定されたスキーム
        scheme: String,
    },
}

/// エンドポイントソース読み込みエラー（起動時に致命的）
#[derive(Debug, Error)]
pub enum SourceError {
    /// ファイル読み込み失敗
    #[error("failed to read sites file {}: {source}", path.display())]
    Io {
        /// 対象ファイル
        path: PathBuf,
        /// I/Oエラー
        #[source]
        source: std::io::Error,
    },

    /// 有効なエンドポイントが1件もない
    #[error("no valid sites found in {source_name}")]
    NoEndpoints {
        /// ソースの表示名
        source_name: String,
    },
}

/// 設定エラー
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// 0秒のタイムアウトは無効
    #[error("probe timeout must be greater than zero")]
    ZeroTimeout,

    /// 0秒のチェック間隔は無効
    #[error("check interval must be greater than zero")]
    ZeroInterval,

    /// サイト一覧ファイルが未指定
    #[error("sites path is not set")]
    MissingSitesPath,
}

/// 問い合わせ層の結果型
pub type StatusResult<T> = Result<T, StatusError>;
