//! Entry Store Module
//!
//! The key-value engine: scalar and list operations over one map, with
//! capacity eviction on scalar insert and an explicit expiry sweep.

use std::collections::{HashMap, VecDeque};
use std::time::{Duration, Instant};

use tracing::debug;

use crate::cache::{CacheStats, Entry, EvictionPolicy, DEFAULT_CAPACITY};

// == Entry Store ==
/// In-memory store of scalar and list entries keyed by string.
///
/// Every operation is total: absent keys, type mismatches and out-of-range
/// indices degrade to an empty string, an empty vector or zero.
#[derive(Debug)]
pub struct EntryStore {
    /// Key-value storage
    entries: HashMap<String, Entry>,
    /// Performance statistics
    stats: CacheStats,
    /// Key count at which a scalar insert evicts first
    capacity: usize,
    /// Victim selection for capacity eviction
    policy: EvictionPolicy,
    /// Next insertion sequence number
    next_seq: u64,
}

impl EntryStore {
    // == Constructor ==
    /// Creates a store holding up to `capacity` keys, using the default policy.
    pub fn new(capacity: usize) -> Self {
        Self::with_policy(capacity, EvictionPolicy::default())
    }

    /// Creates a store with an explicit eviction policy.
    pub fn with_policy(capacity: usize, policy: EvictionPolicy) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            capacity,
            policy,
            next_seq: 0,
        }
    }

    // == Set ==
    /// Stores `value` under `key` as a scalar, replacing whatever was there.
    ///
    /// At capacity one entry is evicted first, even when `key` already exists.
    /// Only a positive `ttl_seconds` makes the entry expire.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<String>, ttl_seconds: i64) {
        self.evict_if_needed();

        let seq = self.bump_seq();
        let entry = Entry::scalar(value.into(), ttl_seconds, seq);
        self.entries.insert(key.into(), entry);

        self.stats.set_total_entries(self.entries.len());
    }

    // == Get ==
    /// Returns the scalar under `key`, or an empty string when the key is
    /// absent, expired or holds a list.
    ///
    /// Expired entries are left in place for the sweep.
    pub fn get(&mut self, key: &str) -> String {
        let value = self
            .entries
            .get(key)
            .filter(|entry| entry.is_live())
            .and_then(Entry::as_scalar)
            .map(str::to_owned);

        match value {
            Some(value) => {
                self.stats.record_hit();
                value
            }
            None => {
                self.stats.record_miss();
                String::new()
            }
        }
    }

    // == Delete ==
    /// Removes `key` whatever its shape. Returns whether it was present.
    pub fn del(&mut self, key: &str) -> bool {
        let removed = self.entries.remove(key).is_some();
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Clear ==
    /// Removes every key.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.stats.set_total_entries(0);
    }

    // == Size ==
    /// Current key count, expired-but-unswept entries included.
    pub fn size(&self) -> usize {
        self.entries.len()
    }

    // == Is Empty ==
    /// Returns true if the store holds no keys.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    // == Batch Operations ==
    /// Applies [`EntryStore::set`] without TTL to each pair in order.
    pub fn mset<I, K, V>(&mut self, pairs: I)
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        for (key, value) in pairs {
            self.set(key, value, 0);
        }
    }

    /// Reads each key with [`EntryStore::get`], positionally aligned with `keys`.
    pub fn mget<I, K>(&mut self, keys: I) -> Vec<String>
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        keys.into_iter().map(|key| self.get(key.as_ref())).collect()
    }

    // == Keys ==
    /// All current keys in map order, expired-but-unswept included.
    pub fn keys(&self) -> Vec<String> {
        self.entries.keys().cloned().collect()
    }

    // == TTL ==
    /// Remaining lifetime of a live, expiring scalar.
    pub fn ttl(&self, key: &str) -> Option<Duration> {
        self.entries
            .get(key)
            .filter(|entry| entry.is_live() && entry.as_scalar().is_some())
            .and_then(Entry::ttl_remaining)
    }

    // == Cleanup Expired ==
    /// Removes every expiring entry whose deadline is at or before now.
    ///
    /// Returns the number of entries removed.
    pub fn cleanup_expired(&mut self) -> usize {
        let now = Instant::now();
        let before = self.entries.len();

        self.entries.retain(|_, entry| !entry.is_expired_at(now));

        let removed = before - self.entries.len();
        self.stats.record_expired(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == List Push ==
    /// Prepends `value` to the list at `key`.
    ///
    /// An absent or scalar key is replaced by a new one-element list. List
    /// creation never evicts.
    pub fn lpush(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.push(key.into(), value.into(), true);
    }

    /// Appends `value` to the list at `key`. Same creation rules as `lpush`.
    pub fn rpush(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.push(key.into(), value.into(), false);
    }

    // == List Pop ==
    /// Removes and returns the first element, deleting the key once empty.
    pub fn lpop(&mut self, key: &str) -> String {
        self.pop(key, true)
    }

    /// Removes and returns the last element, deleting the key once empty.
    pub fn rpop(&mut self, key: &str) -> String {
        self.pop(key, false)
    }

    // == List Range ==
    /// Inclusive slice `[start, stop]` of the list at `key`.
    ///
    /// Negative indices count from the end. Both bounds are then clamped into
    /// the list independently; a start past the stop yields nothing.
    pub fn lrange(&self, key: &str, start: i64, stop: i64) -> Vec<String> {
        let Some(list) = self.list(key) else {
            return Vec::new();
        };

        match normalize_range(start, stop, list.len()) {
            Some((start, stop)) => list.range(start..=stop).cloned().collect(),
            None => Vec::new(),
        }
    }

    // == List Length ==
    /// Element count of the list at `key`, 0 for absent or scalar keys.
    pub fn llen(&self, key: &str) -> usize {
        self.list(key).map_or(0, VecDeque::len)
    }

    // == Capacity ==
    /// Key count at which a scalar insert evicts first.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // == Policy ==
    /// Eviction policy this store was built with.
    pub fn policy(&self) -> EvictionPolicy {
        self.policy
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Internals ==
    fn bump_seq(&mut self) -> u64 {
        let seq = self.next_seq;
        self.next_seq += 1;
        seq
    }

    fn list(&self, key: &str) -> Option<&VecDeque<String>> {
        self.entries.get(key).and_then(Entry::as_list)
    }

    fn push(&mut self, key: String, value: String, front: bool) {
        if let Some(list) = self.entries.get_mut(&key).and_then(Entry::as_list_mut) {
            if front {
                list.push_front(value);
            } else {
                list.push_back(value);
            }
            return;
        }

        let seq = self.bump_seq();
        self.entries.insert(key, Entry::list(value, seq));
        self.stats.set_total_entries(self.entries.len());
    }

    fn pop(&mut self, key: &str, front: bool) -> String {
        let Some(list) = self.entries.get_mut(key).and_then(Entry::as_list_mut) else {
            return String::new();
        };

        let popped = if front { list.pop_front() } else { list.pop_back() };

        if list.is_empty() {
            self.entries.remove(key);
            self.stats.set_total_entries(self.entries.len());
            debug!(key, "list emptied, key removed");
        }

        popped.unwrap_or_default()
    }

    fn evict_if_needed(&mut self) {
        if self.entries.len() < self.capacity {
            return;
        }

        if let Some(victim) = self.policy.pick_victim(&self.entries) {
            self.entries.remove(&victim);
            self.stats.record_eviction();
            debug!(key = %victim, policy = %self.policy, "evicted entry at capacity");
        }
    }
}

impl Default for EntryStore {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

/// Resolves `[start, stop]` against a list of `len` elements.
///
/// Returns None for an empty list or when the clamped start exceeds the stop.
fn normalize_range(start: i64, stop: i64, len: usize) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }

    let len = len as i64;
    let resolve = |index: i64| {
        let index = if index < 0 { index + len } else { index };
        index.clamp(0, len - 1) as usize
    };

    let (start, stop) = (resolve(start), resolve(stop));
    (start <= stop).then_some((start, stop))
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use std::thread::sleep;

    fn five_element_list() -> EntryStore {
        let mut store = EntryStore::new(100);
        for value in ["a", "b", "c", "d", "e"] {
            store.rpush("list", value);
        }
        store
    }

    #[test]
    fn test_store_new() {
        let store = EntryStore::new(100);
        assert_eq!(store.size(), 0);
        assert!(store.is_empty());
        assert_eq!(store.capacity(), 100);
        assert_eq!(store.policy(), EvictionPolicy::EarliestStamp);
    }

    #[test]
    fn test_store_default_capacity() {
        assert_eq!(EntryStore::default().capacity(), 1000);
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = EntryStore::new(100);

        store.set("key1", "value1", 0);

        assert_eq!(store.get("key1"), "value1");
        assert_eq!(store.size(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = EntryStore::new(100);
        assert_eq!(store.get("nonexistent"), "");
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = EntryStore::new(100);

        store.set("key1", "value1", 0);
        store.set("key1", "value2", 0);

        assert_eq!(store.get("key1"), "value2");
        assert_eq!(store.size(), 1);
    }

    #[test]
    fn test_store_del() {
        let mut store = EntryStore::new(100);

        store.set("key1", "value1", 0);
        assert!(store.del("key1"));
        assert!(!store.del("key1"));

        assert!(store.is_empty());
        assert_eq!(store.get("key1"), "");
    }

    #[test]
    fn test_store_del_list() {
        let mut store = EntryStore::new(100);

        store.rpush("list", "a");
        assert!(store.del("list"));
        assert_eq!(store.llen("list"), 0);
    }

    #[test]
    fn test_store_clear() {
        let mut store = EntryStore::new(100);

        store.set("a", "1", 0);
        store.rpush("b", "x");
        store.clear();

        assert_eq!(store.size(), 0);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_store_get_list_is_empty_string() {
        let mut store = EntryStore::new(100);

        store.lpush("list", "a");

        assert_eq!(store.get("list"), "");
        assert_eq!(store.llen("list"), 1);
    }

    #[test]
    fn test_store_mset_mget() {
        let mut store = EntryStore::new(100);

        store.mset([("a", "1"), ("b", "2"), ("c", "3")]);

        assert_eq!(
            store.mget(["c", "missing", "a", "a"]),
            vec!["3", "", "1", "1"]
        );
    }

    #[test]
    fn test_store_keys() {
        let mut store = EntryStore::new(100);

        store.set("a", "1", 0);
        store.rpush("b", "x");

        let mut keys = store.keys();
        keys.sort();
        assert_eq!(keys, vec!["a", "b"]);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = EntryStore::new(100);

        store.set("key1", "value1", 1);
        assert_eq!(store.get("key1"), "value1");
        assert!(store.ttl("key1").is_some());

        sleep(Duration::from_millis(1100));

        // Hidden from reads but still present until swept
        assert_eq!(store.get("key1"), "");
        assert_eq!(store.size(), 1);
        assert!(store.ttl("key1").is_none());
        assert!(store.keys().contains(&"key1".to_string()));

        assert_eq!(store.cleanup_expired(), 1);
        assert!(store.keys().is_empty());
    }

    #[test]
    fn test_store_set_with_max_ttl() {
        let mut store = EntryStore::new(100);

        store.set("k", "v", i64::MAX);

        assert_eq!(store.get("k"), "v");
        assert!(store.ttl("k").is_some());
        assert_eq!(store.cleanup_expired(), 0);
    }

    #[test]
    fn test_store_non_positive_ttl_never_expires() {
        let mut store = EntryStore::new(100);

        store.set("zero", "v", 0);
        store.set("negative", "v", -10);

        assert_eq!(store.cleanup_expired(), 0);
        assert_eq!(store.get("zero"), "v");
        assert_eq!(store.get("negative"), "v");
        assert!(store.ttl("zero").is_none());
    }

    #[test]
    fn test_store_cleanup_expired() {
        let mut store = EntryStore::new(100);

        store.set("short", "v", 1);
        store.set("long", "v", 10);
        store.set("forever", "v", 0);
        store.rpush("list", "x");

        sleep(Duration::from_millis(1100));

        assert_eq!(store.cleanup_expired(), 1);
        assert_eq!(store.cleanup_expired(), 0);
        assert_eq!(store.size(), 3);
        assert_eq!(store.get("long"), "v");
        assert_eq!(store.stats().expired_removed, 1);
    }

    #[test]
    fn test_store_eviction_earliest_stamp() {
        let mut store = EntryStore::new(3);

        store.set("key1", "value1", 0);
        store.set("key2", "value2", 0);
        store.set("key3", "value3", 0);

        store.set("key4", "value4", 0);

        assert_eq!(store.size(), 3);
        assert_eq!(store.get("key1"), "");
        assert_eq!(store.get("key2"), "value2");
        assert_eq!(store.get("key4"), "value4");
        assert_eq!(store.stats().evictions, 1);
    }

    #[test]
    fn test_store_eviction_ignores_expiry_marker() {
        let mut store = EntryStore::new(2);

        store.set("long", "v", 3600);
        store.set("plain", "v", 0);

        // "plain" is stamped now, "long" an hour out
        store.set("new", "v", 0);

        assert_eq!(store.get("plain"), "");
        assert_eq!(store.get("long"), "v");
    }

    #[test]
    fn test_store_eviction_takes_list_first() {
        let mut store = EntryStore::new(3);

        store.set("a", "1", 0);
        store.set("b", "2", 0);
        store.rpush("list", "x");

        store.set("c", "3", 0);

        assert_eq!(store.llen("list"), 0);
        assert_eq!(store.get("a"), "1");
        assert_eq!(store.size(), 3);
    }

    #[test]
    fn test_store_eviction_on_overwrite_at_capacity() {
        let mut store = EntryStore::new(2);

        store.set("a", "1", 0);
        store.set("b", "2", 0);

        // Still evicts the earliest even though "b" already exists
        store.set("b", "3", 0);

        assert_eq!(store.size(), 1);
        assert_eq!(store.get("a"), "");
        assert_eq!(store.get("b"), "3");
    }

    #[test]
    fn test_store_expiring_first_policy() {
        let mut store = EntryStore::with_policy(3, EvictionPolicy::ExpiringFirst);

        store.rpush("list", "x");
        store.set("plain", "v", 0);
        store.set("expiring", "v", 60);

        store.set("new", "v", 0);

        assert_eq!(store.get("expiring"), "");
        assert_eq!(store.llen("list"), 1);
        assert_eq!(store.get("plain"), "v");
    }

    #[test]
    fn test_store_list_creation_skips_eviction() {
        let mut store = EntryStore::new(1);

        store.set("a", "1", 0);
        store.rpush("list", "x");

        assert_eq!(store.size(), 2);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_store_capacity_zero() {
        let mut store = EntryStore::new(0);

        store.set("a", "1", 0);
        store.set("b", "2", 0);

        assert_eq!(store.size(), 1);
        assert_eq!(store.get("b"), "2");
    }

    #[test]
    fn test_list_round_trip() {
        let mut store = EntryStore::new(100);

        store.rpush("k", "a");
        store.rpush("k", "b");
        assert_eq!(store.lrange("k", 0, -1), vec!["a", "b"]);

        assert_eq!(store.lpop("k"), "a");
        assert_eq!(store.llen("k"), 1);
        assert_eq!(store.rpop("k"), "b");

        assert_eq!(store.get("k"), "");
        assert_eq!(store.llen("k"), 0);
        assert_eq!(store.size(), 0);
    }

    #[test]
    fn test_lpush_prepends() {
        let mut store = EntryStore::new(100);

        store.lpush("k", "a");
        store.lpush("k", "b");
        store.rpush("k", "c");

        assert_eq!(store.lrange("k", 0, -1), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_push_replaces_scalar() {
        let mut store = EntryStore::new(100);

        store.set("k", "scalar", 60);
        store.rpush("k", "a");

        assert_eq!(store.get("k"), "");
        assert_eq!(store.lrange("k", 0, -1), vec!["a"]);
        assert!(store.ttl("k").is_none());
    }

    #[test]
    fn test_set_replaces_list() {
        let mut store = EntryStore::new(100);

        store.rpush("k", "a");
        store.set("k", "scalar", 0);

        assert_eq!(store.llen("k"), 0);
        assert_eq!(store.get("k"), "scalar");
    }

    #[test]
    fn test_pop_on_scalar_or_missing() {
        let mut store = EntryStore::new(100);

        store.set("s", "v", 0);

        assert_eq!(store.lpop("s"), "");
        assert_eq!(store.rpop("missing"), "");
        assert_eq!(store.get("s"), "v");
    }

    #[test]
    fn test_lrange_negative_indices() {
        let store = five_element_list();
        assert_eq!(store.lrange("list", -3, -1), vec!["c", "d", "e"]);
    }

    #[test]
    fn test_lrange_clamps_stop() {
        let store = five_element_list();
        assert_eq!(store.lrange("list", 2, 10), vec!["c", "d", "e"]);
    }

    #[test]
    fn test_lrange_start_after_stop() {
        let store = five_element_list();
        assert!(store.lrange("list", 4, 1).is_empty());
    }

    #[test]
    fn test_lrange_clamps_both_bounds() {
        let store = five_element_list();

        assert_eq!(store.lrange("list", -100, 0), vec!["a"]);
        assert_eq!(store.lrange("list", 7, 9), vec!["e"]);
        assert_eq!(store.lrange("list", 0, -100), vec!["a"]);
    }

    #[test]
    fn test_lrange_missing_or_scalar() {
        let mut store = EntryStore::new(100);
        store.set("s", "v", 0);

        assert!(store.lrange("s", 0, -1).is_empty());
        assert!(store.lrange("missing", 0, -1).is_empty());
        assert_eq!(store.llen("s"), 0);
    }

    #[test]
    fn test_store_stats() {
        let mut store = EntryStore::new(100);

        store.set("key1", "value1", 0);
        store.get("key1");
        store.get("nonexistent");

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_normalize_range() {
        assert_eq!(normalize_range(0, -1, 0), None);
        assert_eq!(normalize_range(0, -1, 3), Some((0, 2)));
        assert_eq!(normalize_range(-1, -1, 3), Some((2, 2)));
        assert_eq!(normalize_range(2, 1, 3), None);
        assert_eq!(normalize_range(i64::MIN, i64::MAX, 3), Some((0, 2)));
    }
}
