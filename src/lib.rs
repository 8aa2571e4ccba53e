//! Mini KV - An embeddable in-memory key-value store
//!
//! Holds scalar strings and double-ended lists of strings with per-key TTL
//! expiry and a bounded key count enforced by single-entry eviction.
//!
//! ```
//! use mini_kv::EntryStore;
//!
//! let mut store = EntryStore::new(1000);
//! store.set("greeting", "hello", 0);
//! store.rpush("queue", "job-1");
//!
//! assert_eq!(store.get("greeting"), "hello");
//! assert_eq!(store.lpop("queue"), "job-1");
//! assert_eq!(store.llen("queue"), 0);
//! ```

pub mod cache;
pub mod config;
pub mod error;
pub mod shell;
pub mod tasks;

pub use cache::{EntryStore, EvictionPolicy, SharedStore};
pub use config::Config;
pub use tasks::spawn_cleanup_task;
