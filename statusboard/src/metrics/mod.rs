//! メトリクス収集・管理
//!
//! エンドポイントごとの問い合わせ回数カウンター。
//! 実カウンターとダミー（無効時）の2実装を持ち、起動時に設定で選択する。

use std::collections::{BTreeMap, HashMap};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};

/// 名前付きカウンターの保存先
pub trait CounterStore: Send + Sync {
    /// 0で初期化したカウンターを登録する（既存のカウンターは維持）
    fn add_counter(&self, name: &str);

    /// カウンターを1増やす
    fn increment(&self, name: &str);

    /// 現在値を取得する（未登録は0）
    fn count(&self, name: &str) -> u64;

    /// 全カウンターの `名前 → 値` を取得する
    fn snapshot(&self) -> BTreeMap<String, u64>;
}

/// 設定に応じたカウンターストアを作成
pub fn counter_store(enabled: bool) -> Arc<dyn CounterStore> {
    if enabled {
        Arc::new(StandardCounterStore::default())
    } else {
        Arc::new(DummyCounterStore)
    }
}

/// アトミックカウンターによる実装
///
/// 加算は読み取りロックのみで行うため、並行して呼び出しても取りこぼさない。
#[derive(Debug, Default)]
pub struct StandardCounterStore {
    counters: RwLock<HashMap<String, Arc<AtomicU64>>>,
}

impl StandardCounterStore {
    fn counter(&self, name: &str) -> Arc<AtomicU64> {
        if let Some(counter) = self
            .counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
        {
            return counter.clone();
        }

        self.counters
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .entry(name.to_string())
            .or_default()
            .clone()
    }
}

impl CounterStore for StandardCounterStore {
    fn add_counter(&self, name: &str) {
        self.counter(name);
    }

    fn increment(&self, name: &str) {
        self.counter(name).fetch_add(1, Ordering::Relaxed);
    }

    fn count(&self, name: &str) -> u64 {
        self.counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(name)
            .map(|c| c.load(Ordering::Relaxed))
            .unwrap_or(0)
    }

    fn snapshot(&self) -> BTreeMap<String, u64> {
        self.counters
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .map(|(name, c)| (name.clone(), c.load(Ordering::Relaxed)))
            .collect()
    }
}

/// メトリクス無効時のダミー実装（すべてno-op、常に0）
#[derive(Debug, Default, Clone, Copy)]
pub struct DummyCounterStore;

impl CounterStore for DummyCounterStore {
    fn add_counter(&self, _name: &str) {}

    fn increment(&self, _name: &str) {}

    fn count(&self, _name: &str) -> u64 {
        0
    }

    fn snapshot(&self) -> BTreeMap<String, u64> {
        BTreeMap::new()
    }
}
