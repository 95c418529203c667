//! CLI module for statusboard

use crate::common::error::ConfigError;
use crate::config::MonitorConfig;
use crate::health::endpoint_checker::DEFAULT_PROBE_TIMEOUT_SECS;
use crate::health::monitor::DEFAULT_CHECK_INTERVAL_SECS;
use clap::Parser;
use std::path::PathBuf;
use std::time::Duration;

/// Status board - periodic availability and latency checks for a list of sites
#[derive(Parser, Debug, Clone)]
#[command(name = "statusboard")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    STATUS_BOARD_LOG_LEVEL  Log level (default: info, fallback: RUST_LOG)
    STATUS_BOARD_LOG_DIR    Directory for daily-rotated log files (optional)
"#)]
pub struct Cli {
    /// Listen port
    #[arg(short, long, default_value = "8080", env = "STATUS_BOARD_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "STATUS_BOARD_HOST")]
    pub host: String,

    /// Site check timeout in seconds
    #[arg(short, long, default_value_t = DEFAULT_PROBE_TIMEOUT_SECS, env = "STATUS_BOARD_TIMEOUT")]
    pub timeout: u64,

    /// Site checks rate in seconds
    #[arg(long, default_value_t = DEFAULT_CHECK_INTERVAL_SECS, env = "STATUS_BOARD_CHECK_RATE")]
    pub check_rate: u64,

    /// Enable per-site request counters
    #[arg(long, default_value_t = false, env = "STATUS_BOARD_METRICS")]
    pub metrics: bool,

    /// Path to the sites file (one address per line)
    #[arg(long, env = "STATUS_BOARD_SITES_PATH")]
    pub sites_path: PathBuf,
}

impl Cli {
    /// 待ち受けアドレス
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// ヘルスモニター設定に変換
    pub fn monitor_config(&self) -> Result<MonitorConfig, ConfigError> {
        MonitorConfig::new(
            Duration::from_secs(self.timeout),
            Duration::from_secs(self.check_rate),
            self.metrics,
            self.sites_path.clone(),
        )
    }
}
