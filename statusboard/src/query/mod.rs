//! ステータス問い合わせ
//!
//! 名前指定・最小レイテンシ・最大レイテンシ・ランダムの4種類の問い合わせに答え、
//! 返却したエンドポイントのカウンターを加算する。

use crate::common::error::{StatusError, StatusResult};
use crate::metrics::CounterStore;
use crate::registry::endpoints::EndpointRegistry;
use crate::types::endpoint::{Endpoint, EndpointHealth, EndpointStatus};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::sync::{Arc, Mutex, PoisonError};
use tracing::debug;

/// ステータス問い合わせサービス
///
/// レジストリは読み取りのみ、カウンターは加算のみ行う。
/// 複数の呼び出し元・実行中のヘルスチェックと並行して呼び出してよい。
#[derive(Clone)]
pub struct StatusService {
    registry: EndpointRegistry,
    counters: Arc<dyn CounterStore>,
    rng: Arc<Mutex<StdRng>>,
}

impl StatusService {
    /// 新しいサービスを作成し、各エンドポイントのカウンターを登録する
    pub fn new(registry: EndpointRegistry, counters: Arc<dyn CounterStore>) -> Self {
        Self::with_rng(registry, counters, StdRng::from_entropy())
    }

    /// 乱数生成器を指定して作成
    pub fn with_rng(
        registry: EndpointRegistry,
        counters: Arc<dyn CounterStore>,
        rng: StdRng,
    ) -> Self {
        for endpoint in registry.list() {
            counters.add_counter(endpoint.name());
        }

        Self {
            registry,
            counters,
            rng: Arc::new(Mutex::new(rng)),
        }
    }

    /// 名前でエンドポイントの状態を取得
    pub fn get(&self, name: &str) -> StatusResult<EndpointStatus> {
        let endpoint = self
            .registry
            .get(name)
            .ok_or_else(|| StatusError::NotFound(name.to_string()))?;

        Ok(self.record(&endpoint, endpoint.health()))
    }

    /// 最小レイテンシの稼働中エンドポイントを取得
    pub fn get_min(&self) -> StatusResult<EndpointStatus> {
        let ranked = self.registry.ranked_by_latency();
        let (endpoint, latency) = ranked.first().ok_or(StatusError::Empty)?;

        Ok(self.record(endpoint, EndpointHealth::Available { latency: *latency }))
    }

    /// 最大レイテンシの稼働中エンドポイントを取得
    pub fn get_max(&self) -> StatusResult<EndpointStatus> {
        let ranked = self.registry.ranked_by_latency();
        let (endpoint, latency) = ranked.last().ok_or(StatusError::Empty)?;

        Ok(self.record(endpoint, EndpointHealth::Available { latency: *latency }))
    }

    /// 全エンドポイントから一様ランダムに1件取得（稼働状況は問わない）
    pub fn get_random(&self) -> StatusResult<EndpointStatus> {
        let endpoints = self.registry.list();
        if endpoints.is_empty() {
            return Err(StatusError::Empty);
        }

        let index = self
            .rng
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .gen_range(0..endpoints.len());
        let endpoint = &endpoints[index];

        Ok(self.record(endpoint, endpoint.health()))
    }

    /// 全カウンターを取得
    pub fn counters(&self) -> &Arc<dyn CounterStore> {
        &self.counters
    }

    /// レジストリへの参照を取得
    pub fn registry(&self) -> &EndpointRegistry {
        &self.registry
    }

    fn record(&self, endpoint: &Endpoint, health: EndpointHealth) -> EndpointStatus {
        self.counters.increment(endpoint.name());
        debug!(endpoint_name = %endpoint.name(), alive = health.is_alive(), "Status served");
        EndpointStatus::new(endpoint.name().to_string(), health)
    }
}
