//! ヘルスモニター
//!
//! 一定間隔で全エンドポイントを並列にチェックする。
//! 1サイクル内では全チェックの完了を待ち、サイクル同士は重ならない。

use super::endpoint_checker::{EndpointChecker, HealthProbe};
use crate::registry::endpoints::EndpointRegistry;
use crate::shutdown::ShutdownController;
use futures::future::join_all;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::task::TaskTracker;
use tracing::{debug, error, info};

/// デフォルトのチェック間隔（秒）
pub const DEFAULT_CHECK_INTERVAL_SECS: u64 = 60;

/// モニターの状態
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    /// 未開始
    Idle,
    /// 定期チェック中
    Running,
    /// 停止済み
    Stopped,
}

impl MonitorState {
    fn from_u8(value: u8) -> Self {
        match value {
            0 => Self::Idle,
            1 => Self::Running,
            _ => Self::Stopped,
        }
    }
}

/// 1サイクルの結果
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CycleReport {
    /// チェックが完了したエンドポイント数
    pub checked: usize,
    /// そのうち稼働中だった数
    pub available: usize,
    /// キャンセルにより起動しなかった数
    pub skipped: usize,
}

/// ヘルスモニター（ポーリングエンジン）
pub struct HealthMonitor {
    registry: EndpointRegistry,
    checker: EndpointChecker,
    check_interval: Duration,
    /// 起動したチェックタスク（`MonitorHandle::join`での待機用）
    tracker: TaskTracker,
    state: Arc<AtomicU8>,
}

impl HealthMonitor {
    /// 新しいモニターを作成
    pub fn new(registry: EndpointRegistry, probe: Arc<dyn HealthProbe>) -> Self {
        Self {
            registry,
            checker: EndpointChecker::new(probe),
            check_interval: Duration::from_secs(DEFAULT_CHECK_INTERVAL_SECS),
            tracker: TaskTracker::new(),
            state: Arc::new(AtomicU8::new(MonitorState::Idle as u8)),
        }
    }

    /// チェック間隔を設定
    pub fn with_interval(mut self, check_interval: Duration) -> Self {
        self.check_interval = check_interval;
        self
    }

    /// 現在の状態
    pub fn state(&self) -> MonitorState {
        MonitorState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// 全エンドポイントを並列チェック（1サイクル）
    ///
    /// エンドポイントごとに1タスクを起動し、すべての完了を待つ。
    /// キャンセル要求後のエンドポイントは起動せずにスキップする。
    pub async fn check_all_endpoints(&self, shutdown: &ShutdownController) -> CycleReport {
        let endpoints = self.registry.list();
        let mut report = CycleReport::default();
        let mut handles = Vec::with_capacity(endpoints.len());

        for endpoint in endpoints {
            if shutdown.is_shutdown_requested() {
                report.skipped += 1;
                continue;
            }
            let checker = self.checker.clone();
            let task = async move { checker.check_endpoint(&endpoint).await };
            handles.push(self.tracker.spawn(task));
        }

        for result in join_all(handles).await {
            match result {
                Ok(health) => {
                    report.checked += 1;
                    if health.is_alive() {
                        report.available += 1;
                    }
                }
                Err(e) => error!("Health check task join error: {}", e),
            }
        }

        debug!(
            checked = report.checked,
            available = report.available,
            skipped = report.skipped,
            "Health check cycle completed"
        );

        report
    }

    /// 初回チェックを実行してから、バックグラウンドで定期チェックを開始する
    ///
    /// 戻った時点でレジストリには1サイクル分の結果が入っている。
    pub async fn start(self, shutdown: ShutdownController) -> MonitorHandle {
        self.state.store(MonitorState::Running as u8, Ordering::SeqCst);

        let report = self.check_all_endpoints(&shutdown).await;
        info!(
            endpoints = self.registry.len(),
            available = report.available,
            interval_secs = self.check_interval.as_secs_f64(),
            "Health monitor started"
        );

        let tracker = self.tracker.clone();
        let state = self.state.clone();
        let loop_shutdown = shutdown.clone();
        let task = tokio::spawn(async move {
            self.monitor_loop(&loop_shutdown).await;
            self.state.store(MonitorState::Stopped as u8, Ordering::SeqCst);
            info!("Health monitor stopped");
        });

        MonitorHandle {
            shutdown,
            task,
            tracker,
            state,
        }
    }

    /// 監視ループ
    async fn monitor_loop(&self, shutdown: &ShutdownController) {
        let mut timer = interval(self.check_interval);
        timer.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // `interval()` は初回が即時に発火する。起動時チェックは済んでいるので1周期待つ
        timer.tick().await;

        loop {
            tokio::select! {
                biased;
                _ = shutdown.wait() => return,
                _ = timer.tick() => {}
            }

            // 進行中のサイクルはここで手放す。起動済みのチェックはタイムアウトまで走り続ける
            tokio::select! {
                biased;
                _ = shutdown.wait() => return,
                _ = self.check_all_endpoints(shutdown) => {}
            }
        }
    }
}

/// 起動済みモニターのハンドル
pub struct MonitorHandle {
    shutdown: ShutdownController,
    task: JoinHandle<()>,
    tracker: TaskTracker,
    state: Arc<AtomicU8>,
}

impl MonitorHandle {
    /// 定期チェックを停止する（何度呼んでもよい）
    ///
    /// 実行中のチェックは待たない。完了まで待つ場合は`join`を使う。
    pub fn stop(&self) {
        self.shutdown.request_shutdown();
    }

    /// 現在の状態
    pub fn state(&self) -> MonitorState {
        MonitorState::from_u8(self.state.load(Ordering::SeqCst))
    }

    /// ループの終了と、起動済みの全チェックの完了を待つ
    ///
    /// `stop`（またはシャットダウン要求）の後に呼ぶこと。
    pub async fn join(self) {
        if let Err(e) = self.task.await {
            error!("Health monitor task join error: {}", e);
        }
        self.tracker.close();
        self.tracker.wait().await;
    }
}
