//! ヘルスチェック監視
//!
//! PULL型ヘルスチェック。各エンドポイントにGETを送り、稼働状況とレイテンシを記録する。

pub mod endpoint_checker;
pub mod monitor;

pub use endpoint_checker::{EndpointChecker, HealthProbe, HttpProbe};
pub use monitor::{CycleReport, HealthMonitor, MonitorHandle, MonitorState};
