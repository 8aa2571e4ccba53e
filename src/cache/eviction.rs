//! Eviction Policy Module
//!
//! Chooses the single key removed when a scalar insert finds the store full.

use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

use crate::cache::Entry;

// == Eviction Policy ==
/// Victim selection strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum EvictionPolicy {
    /// Evict the entry with the earliest stamp, whether or not it expires.
    ///
    /// List entries are stamped at the clock origin, so they are always chosen
    /// before any scalar.
    #[default]
    EarliestStamp,
    /// Evict the expiring entry with the nearest deadline; when nothing
    /// expires, evict the oldest insertion.
    ExpiringFirst,
}

impl EvictionPolicy {
    // == Pick Victim ==
    /// Returns the key to evict, or None when `entries` is empty.
    ///
    /// Ties are broken by insertion sequence so the choice does not depend on
    /// map iteration order.
    pub fn pick_victim(&self, entries: &HashMap<String, Entry>) -> Option<String> {
        let victim = match self {
            EvictionPolicy::EarliestStamp => entries
                .iter()
                .min_by_key(|(_, entry)| (entry.expires_at, entry.seq)),
            EvictionPolicy::ExpiringFirst => entries
                .iter()
                .filter(|(_, entry)| entry.has_expiry)
                .min_by_key(|(_, entry)| (entry.expires_at, entry.seq))
                .or_else(|| entries.iter().min_by_key(|(_, entry)| entry.seq)),
        };

        victim.map(|(key, _)| key.clone())
    }

    /// Stable name used in configuration.
    pub fn as_str(&self) -> &'static str {
        match self {
            EvictionPolicy::EarliestStamp => "earliest-stamp",
            EvictionPolicy::ExpiringFirst => "expiring-first",
        }
    }
}

impl fmt::Display for EvictionPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EvictionPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "earliest-stamp" | "earliest_stamp" => Ok(EvictionPolicy::EarliestStamp),
            "expiring-first" | "expiring_first" => Ok(EvictionPolicy::ExpiringFirst),
            other => Err(format!("unknown eviction policy '{}'", other)),
        }
    }
}
