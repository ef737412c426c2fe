//! Newtype IDs for cart lines.
//!
//! Line ids are instant-based like a millisecond timestamp, but they come from
//! a single atomic sequence so two lines added within the same millisecond
//! never share an id.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

/// Next id to hand out. Zero means "not seeded yet".
static NEXT_LINE_ID: AtomicU64 = AtomicU64::new(0);

/// Unique identifier of a cart line within the process lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartLineId(u64);

impl CartLineId {
    /// Wrap a raw id (e.g. one restored from a cart store).
    pub fn new(id: u64) -> Self {
        Self(id)
    }

    /// Generate a fresh id, strictly greater than every id generated or
    /// observed before in this process.
    pub fn generate() -> Self {
        if NEXT_LINE_ID.load(Ordering::SeqCst) == 0 {
            let _ = NEXT_LINE_ID.compare_exchange(
                0,
                epoch_millis().max(1),
                Ordering::SeqCst,
                Ordering::SeqCst,
            );
        }
        Self(NEXT_LINE_ID.fetch_add(1, Ordering::SeqCst))
    }

    /// Make sure future ids are greater than `id`.
    ///
    /// Called for every line restored from a store so fresh lines cannot
    /// collide with lines saved by an earlier session.
    pub fn observe(id: CartLineId) {
        NEXT_LINE_ID.fetch_max(id.0.saturating_add(1), Ordering::SeqCst);
    }

    /// Get the raw value.
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for CartLineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for CartLineId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

fn epoch_millis() -> u64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
