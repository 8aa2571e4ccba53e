//! Cache Entry Module
//!
//! Defines the tagged value stored under each key and its expiry metadata.

use std::collections::VecDeque;
use std::time::{Duration, Instant};

/// Deadline offset used when `now + ttl` is not representable
const FAR_FUTURE: Duration = Duration::from_secs(u32::MAX as u64);

// == Value ==
/// The two value shapes a key can hold.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Value {
    /// A single string
    Scalar(String),
    /// A double-ended list of strings, insertion order significant
    List(VecDeque<String>),
}

// == Entry ==
/// A stored value plus the instant used for expiry and eviction ordering.
#[derive(Debug, Clone)]
pub struct Entry {
    /// The stored value
    pub value: Value,
    /// Expiry instant and eviction ordering stamp; None is the clock origin,
    /// which orders before every real instant
    pub expires_at: Option<Instant>,
    /// Whether `expires_at` is an actual deadline
    pub has_expiry: bool,
    /// Insertion sequence number within the owning store
    pub seq: u64,
}

impl Entry {
    // == Constructors ==
    /// Creates a scalar entry.
    ///
    /// The stamp is `now + ttl_seconds` even for a non-positive TTL, but only a
    /// positive TTL marks the entry as expiring. Deadlines beyond what the
    /// clock can represent saturate to a far-future instant.
    pub fn scalar(value: String, ttl_seconds: i64, seq: u64) -> Self {
        let now = Instant::now();
        let offset = Duration::from_secs(ttl_seconds.unsigned_abs());
        let expires_at = if ttl_seconds >= 0 {
            now.checked_add(offset)
                .or_else(|| now.checked_add(FAR_FUTURE))
                .unwrap_or(now)
        } else {
            now.checked_sub(offset).unwrap_or(now)
        };

        Self {
            value: Value::Scalar(value),
            expires_at: Some(expires_at),
            has_expiry: ttl_seconds > 0,
            seq,
        }
    }

    /// Creates a one-element list entry stamped at the clock origin.
    pub fn list(first: String, seq: u64) -> Self {
        Self {
            value: Value::List(VecDeque::from([first])),
            expires_at: None,
            has_expiry: false,
            seq,
        }
    }

    // == Is Expired ==
    /// Returns true once an expiring entry's deadline is at or before now.
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Same as [`Entry::is_expired`] against a caller-supplied instant.
    pub fn is_expired_at(&self, now: Instant) -> bool {
        self.has_expiry && self.expires_at.is_some_and(|deadline| deadline <= now)
    }

    /// Inverse of [`Entry::is_expired`].
    pub fn is_live(&self) -> bool {
        !self.is_expired()
    }

    // == Time To Live ==
    /// Remaining time before expiry, `None` for entries without a deadline.
    ///
    /// Saturates at zero once the deadline has passed.
    pub fn ttl_remaining(&self) -> Option<Duration> {
        self.expires_at
            .filter(|_| self.has_expiry)
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Borrows the scalar payload, if any.
    pub fn as_scalar(&self) -> Option<&str> {
        match &self.value {
            Value::Scalar(s) => Some(s),
            Value::List(_) => None,
        }
    }

    /// Borrows the list payload, if any.
    pub fn as_list(&self) -> Option<&VecDeque<String>> {
        match &self.value {
            Value::List(list) => Some(list),
            Value::Scalar(_) => None,
        }
    }

    /// Mutably borrows the list payload, if any.
    pub fn as_list_mut(&mut self) -> Option<&mut VecDeque<String>> {
        match &mut self.value {
            Value::List(list) => Some(list),
            Value::Scalar(_) => None,
        }
    }
}
