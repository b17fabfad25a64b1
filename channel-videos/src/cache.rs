//! Time-bounded caches with lazily checked expiry.

use jiff::{SignedDuration, Timestamp};
use std::collections::HashMap;
use std::hash::Hash;
use tokio::sync::Mutex;

/// Source of "now" for cache expiry, so tests can move time by hand.
pub trait Clock: Send + Sync {
    fn now(&self) -> Timestamp;
}

/// The wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Timestamp {
        Timestamp::now()
    }
}

/// A clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    now: std::sync::Mutex<Timestamp>,
}

impl ManualClock {
    pub fn new(start: Timestamp) -> Self {
        Self {
            now: std::sync::Mutex::new(start),
        }
    }

    pub fn advance(&self, by: SignedDuration) {
        let mut now = self.now.lock().unwrap_or_else(std::sync::PoisonError::into_inner);
        *now = *now + by;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Timestamp {
        *self.now.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> Timestamp {
        (**self).now()
    }
}

/// A map whose entries go stale `ttl` after they were stored.
///
/// Nothing is evicted in the background: a stale entry is dropped by the first `get` that sees
/// it. The lock is only held for the map operation itself, so two callers that miss at the same
/// time will both go on to fetch and both `set`; the later write wins.
#[derive(Debug)]
pub struct TtlCache<K, V> {
    ttl: SignedDuration,
    entries: Mutex<HashMap<K, (V, Timestamp)>>,
}

impl<K, V> TtlCache<K, V>
where
    K: Eq + Hash,
    V: Clone,
{
    pub fn new(ttl: SignedDuration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// The value stored under `key`, unless it is older than the TTL at `now`.
    pub async fn get(&self, key: &K, now: Timestamp) -> Option<V> {
        let mut entries = self.entries.lock().await;
        let (value, stored_at) = entries.get(key)?;
        if now.duration_since(*stored_at) < self.ttl {
            return Some(value.clone());
        }
        entries.remove(key);
        None
    }

    pub async fn set(&self, key: K, value: V, now: Timestamp) {
        self.entries.lock().await.insert(key, (value, now));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn t0() -> Timestamp {
        "2025-01-01T00:00:00Z".parse().unwrap()
    }

    #[tokio::test]
    async fn fresh_entries_are_returned() {
        let cache = TtlCache::new(SignedDuration::from_mins(15));
        cache.set("feed", vec![1, 2, 3], t0()).await;
        let later = t0() + SignedDuration::from_mins(14);
        assert_eq!(cache.get(&"feed", later).await, Some(vec![1, 2, 3]));
        assert_eq!(cache.get(&"other", later).await, None);
    }

    #[tokio::test]
    async fn stale_entries_are_dropped_on_read() {
        let cache = TtlCache::new(SignedDuration::from_mins(15));
        cache.set("feed", 1, t0()).await;
        let expiry = t0() + SignedDuration::from_mins(15);
        assert_eq!(cache.get(&"feed", expiry).await, None);
        // gone for good, even if asked about an earlier time
        assert_eq!(cache.get(&"feed", t0()).await, None);
    }

    #[tokio::test]
    async fn set_refreshes_timestamp() {
        let cache = TtlCache::new(SignedDuration::from_mins(10));
        cache.set("k", 1, t0()).await;
        let t1 = t0() + SignedDuration::from_mins(8);
        cache.set("k", 2, t1).await;
        assert_eq!(
            cache.get(&"k", t0() + SignedDuration::from_mins(12)).await,
            Some(2)
        );
    }

    #[test]
    fn manual_clock_moves_only_when_advanced() {
        let clock = ManualClock::new(t0());
        assert_eq!(clock.now(), t0());
        clock.advance(SignedDuration::from_secs(90));
        assert_eq!(clock.now(), t0() + SignedDuration::from_secs(90));
    }
}
