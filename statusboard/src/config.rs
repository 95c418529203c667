//! Configuration management
//!
//! Environment variable helpers with fallback to a secondary name, and the
//! monitor configuration consumed by the health monitor and query layer.

use crate::common::error::ConfigError;
use std::path::PathBuf;
use std::time::Duration;

/// Get an environment variable with fallback to a secondary name
///
/// If the primary variable name is set, returns its value.
/// Otherwise the fallback name is consulted.
///
/// # Example
/// ```
/// use statusboard::config::get_env_with_fallback;
///
/// let level = get_env_with_fallback("STATUS_BOARD_LOG_LEVEL", "RUST_LOG");
/// ```
pub fn get_env_with_fallback(name: &str, fallback: &str) -> Option<String> {
    std::env::var(name)
        .ok()
        .or_else(|| std::env::var(fallback).ok())
}

/// Get an environment variable with fallback and default value
pub fn get_env_with_fallback_or(name: &str, fallback: &str, default: &str) -> String {
    get_env_with_fallback(name, fallback).unwrap_or_else(|| default.to_string())
}

/// ヘルスモニター設定
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonitorConfig {
    /// 1回のヘルスチェックのタイムアウト
    pub timeout: Duration,
    /// チェック間隔
    pub check_interval: Duration,
    /// カウンターを有効にするか
    pub metrics_enabled: bool,
    /// サイト一覧ファイル
    pub sites_path: PathBuf,
}

impl MonitorConfig {
    /// 設定値を検証して作成
    pub fn new(
        timeout: Duration,
        check_interval: Duration,
        metrics_enabled: bool,
        sites_path: impl Into<PathBuf>,
    ) -> Result<Self, ConfigError> {
        let sites_path = sites_path.into();

        if timeout.is_zero() {
            return Err(ConfigError::ZeroTimeout);
        }
        if check_interval.is_zero() {
            return Err(ConfigError::ZeroInterval);
        }
        if sites_path.as_os_str().is_empty() {
            return Err(ConfigError::MissingSitesPath);
        }

        Ok(Self {
            timeout,
            check_interval,
            metrics_enabled,
            sites_path,
        })
    }
}
