//! Configuration Module
//!
//! Loads store and host settings from environment variables.

use std::env;
use std::str::FromStr;

use crate::cache::{EvictionPolicy, DEFAULT_CAPACITY};

/// Store and host configuration.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Key count at which scalar inserts start evicting
    pub max_entries: usize,
    /// Expiry sweep interval in seconds, 0 disables the background sweep
    pub cleanup_interval: u64,
    /// Victim selection for capacity eviction
    pub eviction_policy: EvictionPolicy,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `MAX_ENTRIES` - Store capacity (default: 1000)
    /// - `CLEANUP_INTERVAL` - Sweep frequency in seconds (default: 1)
    /// - `EVICTION_POLICY` - `earliest-stamp` or `expiring-first` (default: earliest-stamp)
    ///
    /// Values that fail to parse fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            max_entries: parse_var("MAX_ENTRIES").unwrap_or(defaults.max_entries),
            cleanup_interval: parse_var("CLEANUP_INTERVAL").unwrap_or(defaults.cleanup_interval),
            eviction_policy: parse_var("EVICTION_POLICY").unwrap_or(defaults.eviction_policy),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_entries: DEFAULT_CAPACITY,
            cleanup_interval: 1,
            eviction_policy: EvictionPolicy::EarliestStamp,
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}
