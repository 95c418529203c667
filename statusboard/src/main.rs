//! Status board Server Entry Point

use clap::Parser;
use statusboard::cli::Cli;
use statusboard::config::MonitorConfig;
use statusboard::health::{HealthMonitor, HttpProbe};
use statusboard::metrics::counter_store;
use statusboard::query::StatusService;
use statusboard::registry::{EndpointRegistry, FileEndpointSource};
use statusboard::shutdown::ShutdownController;
use statusboard::{logging, server, AppState};
use std::process::ExitCode;
use std::sync::Arc;
use tracing::{error, info, warn};

// std::process::exitはWorkerGuardのdropを飛ばすため、終了コードは戻り値で返す
#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let _log_guard = match logging::init() {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Error: failed to initialize logging: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let config = match cli.monitor_config() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            return ExitCode::FAILURE;
        }
    };

    run_server(config, &cli.bind_addr()).await
}

async fn run_server(config: MonitorConfig, bind_addr: &str) -> ExitCode {
    info!("Status board v{}", env!("CARGO_PKG_VERSION"));

    let source = FileEndpointSource::new(&config.sites_path);
    let registry = match EndpointRegistry::load(&source).await {
        Ok(registry) => registry,
        Err(e) => {
            error!("Failed to load sites: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let probe = match HttpProbe::new(config.timeout) {
        Ok(probe) => probe,
        Err(e) => {
            error!("Failed to build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let shutdown = ShutdownController::new();

    // 初回チェック完了後にサーバーを起動する
    let monitor = HealthMonitor::new(registry.clone(), Arc::new(probe))
        .with_interval(config.check_interval);
    let monitor_handle = monitor.start(shutdown.clone()).await;

    let state = AppState {
        status_service: StatusService::new(registry, counter_store(config.metrics_enabled)),
        shutdown: shutdown.clone(),
    };

    let exit_code = match server::run(state, bind_addr).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("Server error: {}", e);
            ExitCode::FAILURE
        }
    };

    monitor_handle.stop();
    if tokio::time::timeout(config.timeout, monitor_handle.join())
        .await
        .is_err()
    {
        warn!(
            timeout_secs = config.timeout.as_secs(),
            "Health checks still running at exit"
        );
    }

    exit_code
}
