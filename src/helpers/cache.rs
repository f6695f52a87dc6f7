use std::collections::HashMap;
use std::future::Future;
use std::hash::Hash;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Expired entries are purged every this many inserts.
const SWEEP_EVERY: usize = 256;

/// In-memory, time-boxed cache. Expired entries are dropped on read and
/// swept periodically on insert, so keys that are never read again do not
/// pile up.
pub struct TtlCache<K, V> {
    ttl: Duration,
    entries: RwLock<HashMap<K, CachedValue<V>>>,
    inserts: AtomicUsize,
}

struct CachedValue<V> {
    value: V,
    expires_at: Instant,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash + Clone,
    V: Clone,
{
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: RwLock::new(HashMap::new()),
            inserts: AtomicUsize::new(0),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    pub async fn get(&self, key: &K) -> Option<V> {
        let now = Instant::now();
        {
            let entries = self.entries.read().await;
            if let Some(entry) = entries.get(key) {
                if entry.expires_at > now {
                    return Some(entry.value.clone());
                }
            }
        }

        let mut entries = self.entries.write().await;
        if let Some(entry) = entries.get(key) {
            if entry.expires_at <= now {
                entries.remove(key);
            } else {
                return Some(entry.value.clone());
            }
        }

        None
    }

    pub async fn insert(&self, key: K, value: V) {
        let now = Instant::now();
        let mut entries = self.entries.write().await;

        if self.inserts.fetch_add(1, Ordering::Relaxed) % SWEEP_EVERY == SWEEP_EVERY - 1 {
            let before = entries.len();
            entries.retain(|_, entry| entry.expires_at > now);
            tracing::debug!(swept = before - entries.len(), "purged expired cache entries");
        }

        entries.insert(
            key,
            CachedValue {
                value,
                expires_at: now + self.ttl,
            },
        );
    }

    /// Returns true when an entry was present.
    pub async fn invalidate(&self, key: &K) -> bool {
        self.entries.write().await.remove(key).is_some()
    }

    pub async fn clear(&self) {
        self.entries.write().await.clear();
    }

    /// Number of entries that have not expired yet.
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .read()
            .await
            .values()
            .filter(|entry| entry.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// Cached value for `key`, or the result of `load` which is then cached.
    /// Failed loads are not cached.
    pub async fn get_or_try_insert_with<F, Fut, E>(&self, key: K, load: F) -> Result<V, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<V, E>>,
    {
        if let Some(value) = self.get(&key).await {
            return Ok(value);
        }

        let value = load().await?;
        self.insert(key, value.clone()).await;
        Ok(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn returns_value_before_expiry() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert("roads", vec![1, 2, 3]).await;

        assert_eq!(cache.get(&"roads").await, Some(vec![1, 2, 3]));
        assert_eq!(cache.len().await, 1);
    }

    #[tokio::test]
    async fn expired_entries_are_dropped() {
        let cache = TtlCache::new(Duration::from_millis(20));
        cache.insert(7, "basic".to_string()).await;
        tokio::time::sleep(Duration::from_millis(40)).await;

        assert_eq!(cache.get(&7).await, None);
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn keys_never_read_again_are_swept() {
        let cache = TtlCache::new(Duration::from_millis(5));
        for key in 0..10_000 {
            cache.insert(key, key).await;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;

        for key in 10_000..10_000 + SWEEP_EVERY {
            cache.insert(key, key).await;
        }

        let stored = cache.entries.read().await.len();
        assert!(stored <= SWEEP_EVERY, "{} entries still stored", stored);
    }

    #[tokio::test]
    async fn invalidate_removes_entry() {
        let cache = TtlCache::new(Duration::from_secs(60));
        cache.insert(1, "pro").await;

        assert!(cache.invalidate(&1).await);
        assert!(!cache.invalidate(&1).await);
        assert_eq!(cache.get(&1).await, None);
    }

    #[tokio::test]
    async fn loader_runs_once_while_entry_is_fresh() {
        let cache = TtlCache::new(Duration::from_secs(60));
        let calls = std::sync::atomic::AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .get_or_try_insert_with(1, || async {
                    calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst);
                    Ok::<_, String>(vec!["asset"])
                })
                .await
                .unwrap();
            assert_eq!(value, vec!["asset"]);
        }

        assert_eq!(calls.load(std::sync::atomic::Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn failed_load_is_not_cached() {
        let cache: TtlCache<i32, i32> = TtlCache::new(Duration::from_secs(60));

        let failed = cache
            .get_or_try_insert_with(1, || async { Err::<i32, _>("db down".to_string()) })
            .await;
        assert!(failed.is_err());
        assert_eq!(cache.get(&1).await, None);

        let loaded = cache
            .get_or_try_insert_with(1, || async { Ok::<_, String>(5) })
            .await;
        assert_eq!(loaded, Ok(5));
    }
}
