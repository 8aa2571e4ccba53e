//! Cache Module
//!
//! The entry store: scalar and list values with TTL expiry and bounded key count.

mod entry;
mod eviction;
mod shared;
mod stats;
mod store;


// Re-export public types
pub use entry::{Entry, Value};
pub use eviction::EvictionPolicy;
pub use shared::SharedStore;
pub use stats::{CacheStats, StatsSnapshot};
pub use store::EntryStore;

// == Public Constants ==
/// Capacity used when none is configured
pub const DEFAULT_CAPACITY: usize = 1000;
