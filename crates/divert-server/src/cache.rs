use dashmap::DashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

pub trait CacheEntry {
    fn fetched_at(&self) -> Instant;
}

/// Drop entries older than `max_age`, then the oldest until `max_entries` remain.
///
/// Returns the number of entries removed.
pub fn prune_cache<K, V>(cache: &DashMap<K, V>, max_entries: usize, max_age: Duration) -> usize
where
    K: Clone + Eq + Hash,
    V: CacheEntry,
{
    let now = Instant::now();
    let before = cache.len();
    let mut entries: Vec<(K, Instant)> = cache
        .iter()
        .map(|entry| (entry.key().clone(), entry.value().fetched_at()))
        .collect();

    entries.retain(|(key, fetched_at)| {
        if now.duration_since(*fetched_at) > max_age {
            cache.remove(key);
            false
        } else {
            true
        }
    });

    if cache.len() > max_entries {
        entries.sort_by_key(|(_, fetched_at)| *fetched_at);
        for (key, _) in entries {
            if cache.len() <= max_entries {
                break;
            }
            cache.remove(&key);
        }
    }

    before.saturating_sub(cache.len())
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Stamp(Instant);

    impl CacheEntry for Stamp {
        fn fetched_at(&self) -> Instant {
            self.0
        }
    }

    #[test]
    fn evicts_oldest_over_capacity() {
        let cache = DashMap::new();
        let base = Instant::now();
        for i in 0..5u64 {
            cache.insert(i, Stamp(base + Duration::from_millis(i)));
        }

        let removed = prune_cache(&cache, 3, Duration::from_secs(3600));
        assert_eq!(removed, 2);
        assert!(!cache.contains_key(&0));
        assert!(!cache.contains_key(&1));
        assert!(cache.contains_key(&4));
    }

    #[test]
    fn evicts_expired_entries() {
        let cache = DashMap::new();
        cache.insert("old", Stamp(Instant::now()));
        std::thread::sleep(Duration::from_millis(20));
        cache.insert("new", Stamp(Instant::now()));

        prune_cache(&cache, 10, Duration::from_millis(10));
        assert!(!cache.contains_key("old"));
        assert!(cache.contains_key("new"));
    }
}
