//! エンドポイントヘルスチェッカー
//!
//! 1回のGETリクエストで稼働状況とレイテンシを計測する。
//! 失敗は通常の結果（`Unavailable`）として扱い、呼び出し元にエラーを返さない。

use crate::types::endpoint::{Endpoint, EndpointHealth};
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// ヘルスチェックのデフォルトタイムアウト（秒）
pub const DEFAULT_PROBE_TIMEOUT_SECS: u64 = 5;

/// 単一エンドポイントの稼働確認
#[async_trait]
pub trait HealthProbe: Send + Sync {
    /// エンドポイントを1回チェックし、結果を返す
    async fn probe(&self, endpoint: &Endpoint) -> EndpointHealth;
}

/// HTTP GETによるヘルスチェック
///
/// ステータスコードとボディの内容は問わず、レスポンスヘッダを受信できれば稼働中とみなす。
#[derive(Clone, Debug)]
pub struct HttpProbe {
    client: Client,
    timeout: Duration,
}

impl HttpProbe {
    /// タイムアウトを指定してプローブを作成
    ///
    /// `timeout`は接続確立と、リクエスト全体の期限の両方に使用する。
    pub fn new(timeout: Duration) -> reqwest::Result<Self> {
        let client = Client::builder().connect_timeout(timeout).build()?;
        Ok(Self { client, timeout })
    }
}

#[async_trait]
impl HealthProbe for HttpProbe {
    async fn probe(&self, endpoint: &Endpoint) -> EndpointHealth {
        let start = Instant::now();

        let response = match self
            .client
            .get(endpoint.address().clone())
            .timeout(self.timeout)
            .send()
            .await
        {
            Ok(response) => response,
            Err(e) => {
                warn!(
                    endpoint_name = %endpoint.name(),
                    address = %endpoint.address(),
                    error = %e,
                    "Health check request failed"
                );
                return EndpointHealth::Unavailable;
            }
        };
        let latency = start.elapsed();

        // ボディは読み捨てる
        let status = response.status();
        if let Err(e) = response.bytes().await {
            debug!(
                endpoint_name = %endpoint.name(),
                error = %e,
                "Failed to drain response body"
            );
        }

        debug!(
            endpoint_name = %endpoint.name(),
            status = %status,
            latency_ms = latency.as_millis() as u64,
            "Health check succeeded"
        );

        EndpointHealth::Available { latency }
    }
}

/// プローブ結果をエンドポイントに反映するチェッカー
#[derive(Clone)]
pub struct EndpointChecker {
    probe: Arc<dyn HealthProbe>,
}

impl EndpointChecker {
    /// プローブを指定して作成
    pub fn new(probe: Arc<dyn HealthProbe>) -> Self {
        Self { probe }
    }

    /// 単一エンドポイントのヘルスチェック
    ///
    /// 結果をエンドポイントに書き込み、同じ値を返す。
    pub async fn check_endpoint(&self, endpoint: &Endpoint) -> EndpointHealth {
        let health = self.probe.probe(endpoint).await;
        endpoint.set_health(health);
        health
    }
}
