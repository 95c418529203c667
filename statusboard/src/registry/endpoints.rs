//! エンドポイントレジストリ
//!
//! 起動時に確定したエンドポイント一覧を保持し、稼働状況・レイテンシでの参照を提供する。

use super::source::{parse_endpoints, EndpointSource};
use crate::common::error::SourceError;
use crate::types::endpoint::{Endpoint, EndpointHealth};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};

/// エンドポイントレジストリ
///
/// エンドポイントの集合はウォームアップ後に変化しないため、コレクション全体のロックは持たない。
/// ヘルス状態の更新はエンドポイント単位で行われる。
#[derive(Clone, Debug, Default)]
pub struct EndpointRegistry {
    inner: Arc<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    /// 設定順のエンドポイント
    endpoints: Vec<Arc<Endpoint>>,
    /// 名前→インデックス
    by_name: HashMap<String, usize>,
}

impl EndpointRegistry {
    /// エンドポイント一覧からレジストリを作成
    ///
    /// 名前が重複したエンドポイントは先勝ちで、後続はスキップする。
    pub fn new(endpoints: impl IntoIterator<Item = Endpoint>) -> Self {
        let mut inner = Inner::default();

        for endpoint in endpoints {
            if inner.by_name.contains_key(endpoint.name()) {
                warn!(endpoint_name = %endpoint.name(), "Duplicate endpoint ignored");
                continue;
            }
            inner
                .by_name
                .insert(endpoint.name().to_string(), inner.endpoints.len());
            inner.endpoints.push(Arc::new(endpoint));
        }

        Self {
            inner: Arc::new(inner),
        }
    }

    /// ソースからエンドポイントを読み込んでレジストリを作成（ウォームアップ）
    ///
    /// ソースの読み込み失敗と、有効なエンドポイントが0件の場合はエラー。
    pub async fn load(source: &dyn EndpointSource) -> Result<Self, SourceError> {
        let lines = source.read_lines().await?;
        let registry = Self::new(parse_endpoints(&lines));

        if registry.is_empty() {
            return Err(SourceError::NoEndpoints {
                source_name: source.describe(),
            });
        }

        info!(
            endpoint_count = registry.len(),
            source = %source.describe(),
            "Loaded endpoints"
        );

        Ok(registry)
    }

    /// 名前でエンドポイントを取得
    pub fn get(&self, name: &str) -> Option<Arc<Endpoint>> {
        self.inner
            .by_name
            .get(name)
            .map(|&index| self.inner.endpoints[index].clone())
    }

    /// すべてのエンドポイントを設定順で取得
    pub fn list(&self) -> Vec<Arc<Endpoint>> {
        self.inner.endpoints.clone()
    }

    /// 稼働中のエンドポイントのみを設定順で取得
    pub fn list_available(&self) -> Vec<Arc<Endpoint>> {
        self.inner
            .endpoints
            .iter()
            .filter(|e| e.health().is_alive())
            .cloned()
            .collect()
    }

    /// 稼働中のエンドポイントをレイテンシ昇順で取得（低レイテンシ優先）
    ///
    /// 同一レイテンシの場合は設定順を維持する（安定ソート）。
    pub fn list_sorted_by_latency(&self) -> Vec<Arc<Endpoint>> {
        self.ranked_by_latency()
            .into_iter()
            .map(|(endpoint, _)| endpoint)
            .collect()
    }

    /// 稼働中のエンドポイントと、並べ替えに使ったレイテンシの組を返す
    ///
    /// 各エンドポイントのヘルス状態は1回だけ読み取る。ソート中にチェックが完了しても
    /// 順位と返却値が食い違わない。
    pub fn ranked_by_latency(&self) -> Vec<(Arc<Endpoint>, Duration)> {
        let mut ranked: Vec<_> = self
            .inner
            .endpoints
            .iter()
            .filter_map(|e| match e.health() {
                EndpointHealth::Available { latency } => Some((e.clone(), latency)),
                EndpointHealth::Unavailable => None,
            })
            .collect();

        // sort_by_key は安定ソート
        ranked.sort_by_key(|(_, latency)| *latency);
        ranked
    }

    /// エンドポイント数を取得
    pub fn len(&self) -> usize {
        self.inner.endpoints.len()
    }

    /// エンドポイントが1件もないか
    pub fn is_empty(&self) -> bool {
        self.inner.endpoints.is_empty()
    }
}
