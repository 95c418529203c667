//! ロギング初期化ユーティリティ
//!
//! 標準出力へのfmtレイヤーに加え、`STATUS_BOARD_LOG_DIR`指定時は日次ローテーションの
//! ファイル出力を追加する。

use crate::config::get_env_with_fallback_or;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::prelude::*;
use tracing_subscriber::util::TryInitError;
use tracing_subscriber::{fmt, EnvFilter};

/// ログレベル指定の環境変数
pub const LOG_LEVEL_ENV: &str = "STATUS_BOARD_LOG_LEVEL";
/// ログファイル出力先の環境変数
pub const LOG_DIR_ENV: &str = "STATUS_BOARD_LOG_DIR";

const DEFAULT_LOG_LEVEL: &str = "info";
const LOG_FILE_PREFIX: &str = "statusboard.log";

/// ログレベル文字列からフィルタを作成（不正な値はデフォルトに戻す）
fn build_filter(level: &str) -> EnvFilter {
    EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL))
}

/// グローバルsubscriberを初期化する
///
/// ファイル出力が有効な場合は`WorkerGuard`を返す。プロセス終了まで保持すること。
pub fn init() -> Result<Option<WorkerGuard>, TryInitError> {
    let filter = build_filter(&get_env_with_fallback_or(
        LOG_LEVEL_ENV,
        "RUST_LOG",
        DEFAULT_LOG_LEVEL,
    ));
    let stdout_layer = fmt::layer().with_target(false);

    match std::env::var(LOG_DIR_ENV).ok().filter(|dir| !dir.is_empty()) {
        Some(dir) => {
            let appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
            let (writer, guard) = tracing_appender::non_blocking(appender);
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .with(fmt::layer().with_ansi(false).with_writer(writer))
                .try_init()?;
            Ok(Some(guard))
        }
        None => {
            tracing_subscriber::registry()
                .with(filter)
                .with(stdout_layer)
                .try_init()?;
            Ok(None)
        }
    }
}
