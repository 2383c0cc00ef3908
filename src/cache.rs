use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;

use crate::{stats::PoolStats, types::Overview};

/// Expiring key/value cache for API responses.
///
/// Entries are stamped on insert and filtered on read; the poller
/// overwrites them wholesale on every tick, so the freshest fetch always
/// wins and stale reads die out after one TTL.
pub struct TimedCache<T> {
    entries: RwLock<HashMap<String, (T, Instant)>>,
    ttl: Duration,
}

impl<T: Clone + Send + Sync> TimedCache<T> {
    pub fn new(ttl: Duration) -> TimedCache<T> {
        TimedCache {
            entries: RwLock::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn get(&self, key: &str) -> Option<T> {
        let entries = self.entries.read().await;
        entries.get(key).and_then(|(value, stored_at)| {
            if stored_at.elapsed() < self.ttl {
                Some(value.clone())
            } else {
                None
            }
        })
    }

    pub async fn set(&self, key: &str, value: T) {
        let mut entries = self.entries.write().await;
        entries.insert(key.to_owned(), (value, Instant::now()));
    }

    pub async fn clear(&self) {
        let mut entries = self.entries.write().await;
        entries.clear();
    }
}

impl<T> std::fmt::Debug for TimedCache<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TimedCache").field("ttl", &self.ttl).finish()
    }
}

/// Per-endpoint caches held on the shared application state.
#[derive(Debug)]
pub struct ApiCache {
    pub pools: TimedCache<Vec<PoolStats>>,
    pub pool: TimedCache<PoolStats>,
    pub overview: TimedCache<Overview>,
}

impl ApiCache {
    pub fn new(ttl_seconds: u64) -> ApiCache {
        let ttl = Duration::from_secs(ttl_seconds);
        ApiCache {
            pools: TimedCache::new(ttl),
            pool: TimedCache::new(ttl),
            overview: TimedCache::new(ttl),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn set_then_get_within_ttl() {
        let cache: TimedCache<u32> =
            TimedCache::new(Duration::from_secs(60));
        cache.set("key", 7).await;
        assert_eq!(cache.get("key").await, Some(7));
        assert_eq!(cache.get("missing").await, None);
    }

    #[tokio::test]
    async fn entries_expire_after_ttl() {
        let cache: TimedCache<u32> =
            TimedCache::new(Duration::from_millis(50));
        cache.set("key", 7).await;
        tokio::time::sleep(Duration::from_millis(120)).await;
        assert_eq!(cache.get("key").await, None);
    }

    #[tokio::test]
    async fn set_overwrites_previous_value() {
        let cache: TimedCache<u32> =
            TimedCache::new(Duration::from_secs(60));
        cache.set("key", 1).await;
        cache.set("key", 2).await;
        assert_eq!(cache.get("key").await, Some(2));
    }

    #[tokio::test]
    async fn clear_drops_everything() {
        let cache: TimedCache<u32> =
            TimedCache::new(Duration::from_secs(60));
        cache.set("a", 1).await;
        cache.set("b", 2).await;
        cache.clear().await;
        assert_eq!(cache.get("a").await, None);
        assert_eq!(cache.get("b").await, None);
    }
}
