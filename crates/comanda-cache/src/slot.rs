//! Versioned single-value slots on top of the cache.

use crate::{Cache, CacheError};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::marker::PhantomData;

/// Data stored in a slot, with write bookkeeping.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SlotData<T> {
    /// The stored value.
    pub data: T,
    /// Incremented on every write, starting at 1.
    pub version: u64,
    /// When the slot was first written (Unix timestamp).
    pub created_at: u64,
    /// When the slot was last written (Unix timestamp).
    pub updated_at: u64,
}

/// A typed value stored under one fixed key.
///
/// # Example
///
/// ```rust,ignore
/// let cache = Cache::open(".comanda")?;
/// let slot = Slot::<Cart>::new(cache, "myRestaurantCart");
///
/// slot.save(&cart)?;
/// let cart = slot.load()?.unwrap_or_default();
/// slot.clear()?;
/// ```
#[derive(Debug, Clone)]
pub struct Slot<T> {
    cache: Cache,
    key: String,
    _phantom: PhantomData<T>,
}

impl<T> Slot<T>
where
    T: Serialize + DeserializeOwned,
{
    pub fn new(cache: Cache, key: impl Into<String>) -> Self {
        Self {
            cache,
            key: key.into(),
            _phantom: PhantomData,
        }
    }

    /// The key this slot is stored under.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Load the value if one has been saved.
    pub fn load(&self) -> Result<Option<T>, CacheError> {
        Ok(self.load_versioned()?.map(|s| s.data))
    }

    /// Load the value with its version (for advanced use).
    pub fn load_versioned(&self) -> Result<Option<SlotData<T>>, CacheError> {
        self.cache.get::<SlotData<T>>(&self.key)
    }

    /// Write the value, returning the new version.
    ///
    /// A slot whose previous content cannot be read is overwritten from
    /// version 1.
    pub fn save(&self, data: &T) -> Result<u64, CacheError> {
        let now = unix_now();
        let previous = match self.cache.get::<SlotData<serde_json::Value>>(&self.key) {
            Ok(previous) => previous,
            Err(CacheError::SerializeError(e)) => {
                tracing::warn!(key = %self.key, error = %e, "Overwriting unreadable slot");
                None
            }
            Err(e) => return Err(e),
        };
        let (version, created_at) = previous
            .map(|p| (p.version + 1, p.created_at))
            .unwrap_or((1, now));

        self.cache.set(
            &self.key,
            &SlotData {
                data,
                version,
                created_at,
                updated_at: now,
            },
        )?;
        Ok(version)
    }

    /// Remove the stored value.
    pub fn clear(&self) -> Result<(), CacheError> {
        self.cache.delete(&self.key)
    }
}

fn unix_now() -> u64 {
    std::time::SystemTime::now()
        .duration_since(std::time::UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}
