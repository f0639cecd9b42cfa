//! Property-Based Tests for Cache Module
//!
//! Uses proptest to check the capacity, ordering and expiry properties of the
//! store and the shared cache.

use proptest::prelude::*;
use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::cache::{BoundedTtlCache, CacheStore, ManualClock};
use crate::error::CacheError;

// == Test Configuration ==
const TEST_TTL: Duration = Duration::from_secs(300);

// == Strategies ==
/// Generates keys from a small alphabet so sequences revisit keys often
fn key_strategy() -> impl Strategy<Value = String> {
    "[a-h]{1,2}".prop_map(|s| s)
}

fn value_strategy() -> impl Strategy<Value = u32> {
    any::<u32>()
}

#[derive(Debug, Clone)]
enum CacheOp {
    Set { key: String, value: u32 },
    Get { key: String },
    Advance { millis: u64 },
    Evict,
}

fn cache_op_strategy() -> impl Strategy<Value = CacheOp> {
    prop_oneof![
        4 => (key_strategy(), value_strategy())
            .prop_map(|(key, value)| CacheOp::Set { key, value }),
        3 => key_strategy().prop_map(|key| CacheOp::Get { key }),
        2 => (0u64..400).prop_map(|millis| CacheOp::Advance { millis }),
        1 => Just(CacheOp::Evict),
    ]
}

/// Straightforward model of the store: a map plus an insertion-order queue.
#[derive(Default)]
struct Model {
    entries: HashMap<String, (u32, Duration)>,
    order: VecDeque<String>,
}

impl Model {
    fn set(&mut self, key: String, value: u32, now: Duration, ttl: Duration, max: usize) {
        if let Some(slot) = self.entries.get_mut(&key) {
            *slot = (value, now + ttl);
            return;
        }
        if self.entries.len() >= max {
            if let Some(oldest) = self.order.pop_front() {
                self.entries.remove(&oldest);
            }
        }
        self.order.push_back(key.clone());
        self.entries.insert(key, (value, now + ttl));
    }

    fn get(&self, key: &str, now: Duration) -> Result<Option<u32>, ()> {
        match self.entries.get(key) {
            None => Err(()),
            Some((_, expires)) if now >= *expires => Ok(None),
            Some((value, _)) => Ok(Some(*value)),
        }
    }

    fn evict(&mut self, now: Duration) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, (_, expires)| now < *expires);
        let entries = &self.entries;
        self.order.retain(|k| entries.contains_key(k));
        before - self.entries.len()
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(200))]

    // Capacity: after every set, the store holds at most max_size entries.
    #[test]
    fn prop_capacity_enforcement(
        max_size in 1usize..8,
        entries in prop::collection::vec((key_strategy(), value_strategy()), 1..100)
    ) {
        let mut store = CacheStore::new(max_size, TEST_TTL).unwrap();
        let now = Instant::now();

        for (key, value) in entries {
            store.set(key, value, now);
            prop_assert!(
                store.len() <= max_size,
                "Cache size {} exceeds max {}",
                store.len(),
                max_size
            );
        }
    }

    // Overwrite: the last value written for a key wins and size does not grow.
    #[test]
    fn prop_overwrite_semantics(
        key in key_strategy(),
        value1 in value_strategy(),
        value2 in value_strategy()
    ) {
        let mut store = CacheStore::new(10, TEST_TTL).unwrap();
        let now = Instant::now();

        store.set(key.clone(), value1, now);
        store.set(key.clone(), value2, now);

        prop_assert_eq!(store.get(&key, now).unwrap(), Some(&value2));
        prop_assert_eq!(store.len(), 1);
    }

    // FIFO: filling a store and inserting one fresh key evicts the first key
    // inserted, however often the others were read.
    #[test]
    fn prop_fifo_eviction_order(
        keys in prop::collection::vec(key_strategy(), 2..10),
        reads in prop::collection::vec(0usize..10, 0..20),
    ) {
        let mut unique = Vec::new();
        let mut seen = HashSet::new();
        for key in keys {
            if seen.insert(key.clone()) {
                unique.push(key);
            }
        }
        prop_assume!(unique.len() >= 2);

        let mut store = CacheStore::new(unique.len(), TEST_TTL).unwrap();
        let now = Instant::now();
        for key in &unique {
            store.set(key.clone(), 0u32, now);
        }
        for index in reads {
            let _ = store.get(&unique[index % unique.len()], now);
        }

        let evicted = store.set("fresh-key".to_string(), 1, now);

        prop_assert_eq!(evicted.as_ref(), Some(&unique[0]));
        prop_assert!(!store.has(&unique[0]));
        for key in unique.iter().skip(1) {
            prop_assert!(store.has(key), "Key '{}' should still be present", key);
        }
    }

    // Model check: any mix of sets, reads, clock moves and sweeps matches the
    // reference model exactly.
    #[test]
    fn prop_store_matches_model(
        max_size in 1usize..6,
        ttl_ms in 0u64..1000,
        ops in prop::collection::vec(cache_op_strategy(), 1..80)
    ) {
        let ttl = Duration::from_millis(ttl_ms);
        let start = Instant::now();
        let mut elapsed = Duration::ZERO;
        let mut store = CacheStore::new(max_size, ttl).unwrap();
        let mut model = Model::default();

        for op in ops {
            match op {
                CacheOp::Set { key, value } => {
                    store.set(key.clone(), value, start + elapsed);
                    model.set(key, value, elapsed, ttl, max_size);
                }
                CacheOp::Get { key } => {
                    let actual = store.get(&key, start + elapsed);
                    match model.get(&key, elapsed) {
                        Err(()) => {
                            prop_assert!(matches!(actual, Err(CacheError::NotFound(_))));
                        }
                        Ok(expected) => {
                            prop_assert_eq!(actual.unwrap().copied(), expected);
                        }
                    }
                    prop_assert_eq!(store.has(&key), model.entries.contains_key(&key));
                }
                CacheOp::Advance { millis } => {
                    elapsed += Duration::from_millis(millis);
                }
                CacheOp::Evict => {
                    prop_assert_eq!(
                        store.evict_expired(start + elapsed),
                        model.evict(elapsed)
                    );
                }
            }

            prop_assert_eq!(store.len(), model.entries.len());
            prop_assert!(store.len() <= max_size);
            prop_assert!(store.keys().eq(model.order.iter().map(String::as_str)));
        }
    }

    // Sweep: after evict, no remaining entry is expired and every valid
    // entry survived.
    #[test]
    fn prop_evict_removes_only_expired(
        inserts in prop::collection::vec((key_strategy(), 0u64..1000), 1..30),
        sweep_at in 0u64..1500,
    ) {
        let ttl = Duration::from_millis(500);
        let start = Instant::now();
        let mut store = CacheStore::new(64, ttl).unwrap();
        let mut inserted_at = HashMap::new();

        let mut sorted = inserts;
        sorted.sort_by_key(|(_, at)| *at);
        for (key, at) in sorted {
            store.set(key.clone(), 0u32, start + Duration::from_millis(at));
            inserted_at.insert(key, at);
        }

        let now = start + Duration::from_millis(sweep_at);
        store.evict_expired(now);

        for (key, at) in &inserted_at {
            let valid = at + 500 > sweep_at;
            prop_assert_eq!(store.has(key), valid, "key {} inserted at {}", key, at);
            if valid {
                prop_assert_eq!(store.get(key, now).unwrap(), Some(&0));
            }
        }
    }
}

// Concurrency: parallel sets, reads and sweeps through the shared cache never
// break the capacity bound, and reads only ever see values that were written.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(50))]

    #[test]
    fn prop_concurrent_operation_correctness(
        max_size in 1usize..6,
        ops in prop::collection::vec(cache_op_strategy(), 10..60)
    ) {
        let written: HashSet<u32> = ops
            .iter()
            .filter_map(|op| match op {
                CacheOp::Set { value, .. } => Some(*value),
                _ => None,
            })
            .collect();

        let result: Result<(), String> = tokio_test::block_on(async {
            let clock = Arc::new(ManualClock::new());
            let cache = Arc::new(
                BoundedTtlCache::with_time_source(max_size, Duration::from_millis(200), clock.clone())
                    .unwrap(),
            );

            let mut handles = Vec::new();
            for op in ops {
                let cache = Arc::clone(&cache);
                let clock = Arc::clone(&clock);
                handles.push(tokio::spawn(async move {
                    match op {
                        CacheOp::Set { key, value } => cache.set(key, value).await,
                        CacheOp::Get { key } => {
                            if let Ok(Some(value)) = cache.get(&key).await {
                                return Some(value);
                            }
                        }
                        CacheOp::Advance { millis } => clock.advance(Duration::from_millis(millis)),
                        CacheOp::Evict => {
                            cache.evict().await;
                        }
                    }
                    None
                }));
            }

            for handle in handles {
                let seen = handle.await.map_err(|e| e.to_string())?;
                if let Some(value) = seen {
                    if !written.contains(&value) {
                        return Err(format!("Read value {} that was never written", value));
                    }
                }
                let len = cache.len().await;
                if len > max_size {
                    return Err(format!("Cache size {} exceeds max {}", len, max_size));
                }
            }

            Ok::<(), String>(())
        });

        prop_assert!(result.is_ok(), "Concurrent operation failed: {:?}", result);
    }
}

// == Additional Unit Tests for Edge Cases ==
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_slot_store_always_holds_latest_key() {
        let mut store = CacheStore::new(1, TEST_TTL).unwrap();
        let now = Instant::now();

        for key in ["a", "b", "c"] {
            store.set(key.to_string(), key.len(), now);
            assert_eq!(store.len(), 1);
            assert!(store.has(key));
        }
    }

    #[test]
    fn test_model_agrees_on_zero_ttl() {
        let mut model = Model::default();
        model.set("k".to_string(), 1, Duration::ZERO, Duration::ZERO, 4);
        assert_eq!(model.get("k", Duration::ZERO), Ok(None));
        assert_eq!(model.evict(Duration::ZERO), 1);
    }
}
