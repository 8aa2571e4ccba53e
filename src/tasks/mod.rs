//! Background Tasks Module
//!
//! Tasks a host runs alongside the store.
//!
//! # Tasks
//! - Expiry sweep: removes expired entries at a configured interval

mod cleanup;

pub use cleanup::spawn_cleanup_task;
