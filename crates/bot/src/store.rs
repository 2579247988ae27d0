use std::collections::BTreeMap;

use exchanges::ExchangeId;
use tokio::sync::RwLock;

/// One user's arbitrage thresholds. A match fires when the home exchange
/// asks at most `buy_rate` while some other exchange bids at least
/// `sell_rate`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Filter {
    pub exchange: ExchangeId,
    pub buy_rate: f64,
    pub sell_rate: f64,
    pub max_volume: f64,
}

/// Per-user filters keyed by chat id, shared between the command layer
/// (writes) and the scanner (reads a snapshot once per cycle). At most one
/// filter per user; last write wins; there is no delete.
#[derive(Default)]
pub struct FilterStore {
    filters: RwLock<BTreeMap<i64, Filter>>,
}

impl FilterStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn set(&self, chat_id: i64, filter: Filter) {
        self.filters.write().await.insert(chat_id, filter);
    }

    pub async fn get(&self, chat_id: i64) -> Option<Filter> {
        self.filters.read().await.get(&chat_id).copied()
    }

    /// Copy of the whole map. The scan cycle iterates this copy, so filters
    /// written mid-cycle are first seen on the next cycle; visit order is
    /// ascending chat id.
    pub async fn snapshot(&self) -> BTreeMap<i64, Filter> {
        self.filters.read().await.clone()
    }

    pub async fn is_empty(&self) -> bool {
        self.filters.read().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(buy: f64) -> Filter {
        Filter {
            exchange: ExchangeId::Binance,
            buy_rate: buy,
            sell_rate: 42.5,
            max_volume: 100.0,
        }
    }

    #[tokio::test]
    async fn test_set_and_get() {
        let store = FilterStore::new();
        assert!(store.is_empty().await);
        assert_eq!(store.get(7).await, None);

        store.set(7, filter(41.2)).await;
        assert!(!store.is_empty().await);
        assert_eq!(store.get(7).await.unwrap().buy_rate, 41.2);
    }

    #[tokio::test]
    async fn test_last_write_wins() {
        let store = FilterStore::new();
        store.set(7, filter(41.2)).await;
        store.set(7, filter(40.0)).await;

        assert_eq!(store.get(7).await.unwrap().buy_rate, 40.0);
        assert_eq!(store.snapshot().await.len(), 1);
    }

    #[tokio::test]
    async fn test_snapshot_is_isolated_from_later_writes() {
        let store = FilterStore::new();
        store.set(1, filter(41.2)).await;

        let snapshot = store.snapshot().await;
        store.set(2, filter(40.0)).await;

        assert_eq!(snapshot.len(), 1);
        assert_eq!(store.snapshot().await.len(), 2);
    }

    #[tokio::test]
    async fn test_snapshot_order_is_stable() {
        let store = FilterStore::new();
        store.set(30, filter(3.0)).await;
        store.set(10, filter(1.0)).await;
        store.set(20, filter(2.0)).await;

        let ids: Vec<i64> = store.snapshot().await.into_keys().collect();
        assert_eq!(ids, vec![10, 20, 30]);
    }
}
