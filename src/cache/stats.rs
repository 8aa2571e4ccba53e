//! Cache Statistics Module
//!
//! Counts scalar read hits and misses, evictions and swept entries.

use chrono::{DateTime, Utc};
use serde::Serialize;

// == Cache Stats ==
/// Running counters for one store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CacheStats {
    /// Scalar reads that returned a live value
    pub hits: u64,
    /// Scalar reads that returned the empty sentinel
    pub misses: u64,
    /// Entries removed to stay within capacity
    pub evictions: u64,
    /// Entries removed by the expiry sweep
    pub expired_removed: u64,
    /// Current number of keys, expired-but-unswept included
    pub total_entries: usize,
}

impl CacheStats {
    // == Constructor ==
    /// Creates a new CacheStats with all counters at zero.
    pub fn new() -> Self {
        Self::default()
    }

    // == Hit Rate ==
    /// Returns hits / (hits + misses), or 0.0 before any read.
    pub fn hit_rate(&self) -> f64 {
        let total = self.hits + self.misses;
        if total == 0 {
            0.0
        } else {
            self.hits as f64 / total as f64
        }
    }

    // == Record Hit ==
    /// Increments the hit counter.
    pub fn record_hit(&mut self) {
        self.hits += 1;
    }

    // == Record Miss ==
    /// Increments the miss counter.
    pub fn record_miss(&mut self) {
        self.misses += 1;
    }

    // == Record Eviction ==
    /// Increments the eviction counter.
    pub fn record_eviction(&mut self) {
        self.evictions += 1;
    }

    // == Record Expired ==
    /// Adds `count` swept entries.
    pub fn record_expired(&mut self, count: usize) {
        self.expired_removed += count as u64;
    }

    // == Update Entry Count ==
    /// Updates the total entries count.
    pub fn set_total_entries(&mut self, count: usize) {
        self.total_entries = count;
    }

    // == Snapshot ==
    /// Freezes the counters with a wall-clock timestamp for reporting.
    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            hit_rate: self.hit_rate(),
            stats: self.clone(),
            taken_at: Utc::now(),
        }
    }
}

// == Stats Snapshot ==
/// Serializable point-in-time view of [`CacheStats`].
#[derive(Debug, Clone, Serialize)]
pub struct StatsSnapshot {
    #[serde(flatten)]
    pub stats: CacheStats,
    pub hit_rate: f64,
    pub taken_at: DateTime<Utc>,
}

impl StatsSnapshot {
    /// Renders the snapshot as a single-line JSON object.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
