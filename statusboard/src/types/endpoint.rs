//! エンドポイント型定義

use serde::{Serialize, Serializer};
use std::sync::{PoisonError, RwLock};
use std::time::Duration;
use url::Url;

/// 最新のヘルスチェック結果
///
/// 稼働状態とレイテンシを1つの値として扱い、停止中のレイテンシを表現できないようにする。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EndpointHealth {
    /// 初期状態、または直近のチェックが失敗
    #[default]
    Unavailable,
    /// 直近のチェックが成功
    Available {
        /// リクエスト開始からレスポンスヘッダ受信までの時間
        latency: Duration,
    },
}

impl EndpointHealth {
    /// 稼働中かどうか
    pub fn is_alive(&self) -> bool {
        matches!(self, Self::Available { .. })
    }

    /// 稼働中のときのみレイテンシを返す
    pub fn latency(&self) -> Option<Duration> {
        match self {
            Self::Available { latency } => Some(*latency),
            Self::Unavailable => None,
        }
    }
}

/// 監視対象エンドポイント
///
/// 起動時に一度だけ生成され、`Arc`で共有される。ヘルスチェックは
/// エンドポイントごとのロックの下で`health`のみを置き換える。
#[derive(Debug)]
pub struct Endpoint {
    name: String,
    address: Url,
    health: RwLock<EndpointHealth>,
}

impl Endpoint {
    /// 新しいエンドポイントを作成（初期状態は`Unavailable`）
    pub fn new(name: impl Into<String>, address: Url) -> Self {
        Self {
            name: name.into(),
            address,
            health: RwLock::new(EndpointHealth::Unavailable),
        }
    }

    /// エンドポイント名（カウンターのキーを兼ねる）
    pub fn name(&self) -> &str {
        &self.name
    }

    /// チェック先URL
    pub fn address(&self) -> &Url {
        &self.address
    }

    /// 現在のヘルス状態
    pub fn health(&self) -> EndpointHealth {
        *self.health.read().unwrap_or_else(PoisonError::into_inner)
    }

    /// ヘルス状態を置き換える
    pub fn set_health(&self, health: EndpointHealth) {
        *self.health.write().unwrap_or_else(PoisonError::into_inner) = health;
    }

    /// 稼働中としてマーク
    pub fn mark_available(&self, latency: Duration) {
        self.set_health(EndpointHealth::Available { latency });
    }

    /// 停止中としてマーク
    pub fn mark_unavailable(&self) {
        self.set_health(EndpointHealth::Unavailable);
    }

    /// 問い合わせ結果用のスナップショット
    pub fn status(&self) -> EndpointStatus {
        EndpointStatus::new(self.name.clone(), self.health())
    }
}

/// 問い合わせ結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EndpointStatus {
    /// エンドポイント名
    pub name: String,
    /// 稼働中かどうか
    pub alive: bool,
    /// レイテンシ（停止中は`None`）
    #[serde(rename = "latency_ms", serialize_with = "serialize_latency_ms")]
    pub latency: Option<Duration>,
}

impl EndpointStatus {
    /// ヘルス状態からスナップショットを作成
    pub fn new(name: String, health: EndpointHealth) -> Self {
        Self {
            name,
            alive: health.is_alive(),
            latency: health.latency(),
        }
    }
}

fn serialize_latency_ms<S: Serializer>(
    latency: &Option<Duration>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match latency {
        Some(latency) => serializer.serialize_f64(latency.as_micros() as f64 / 1000.0),
        None => serializer.serialize_none(),
    }
}
