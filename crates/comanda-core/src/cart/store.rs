//! Cart persistence between sessions.

use crate::cart::Cart;
use crate::error::ComandaError;
use std::sync::{Arc, Mutex};

/// Keeps a copy of the cart across sessions.
///
/// The engine loads once at start, saves after every mutation and clears
/// after a completed handoff. Failures are logged by the engine and never
/// undo a cart change.
pub trait CartStore: Send + Sync {
    /// Load the saved cart; an absent cart is an empty one.
    fn load(&self) -> Result<Cart, ComandaError>;

    /// Replace the saved cart.
    fn save(&self, cart: &Cart) -> Result<(), ComandaError>;

    /// Forget the saved cart.
    fn clear(&self) -> Result<(), ComandaError>;
}

/// In-memory store; clones share the same saved cart.
#[derive(Debug, Clone, Default)]
pub struct MemoryCartStore {
    saved: Arc<Mutex<Option<Cart>>>,
}

impl MemoryCartStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a saved cart.
    pub fn with_cart(cart: Cart) -> Self {
        Self {
            saved: Arc::new(Mutex::new(Some(cart))),
        }
    }

    /// The currently saved cart, if any.
    pub fn saved(&self) -> Option<Cart> {
        self.saved.lock().ok().and_then(|saved| saved.clone())
    }
}

impl CartStore for MemoryCartStore {
    fn load(&self) -> Result<Cart, ComandaError> {
        let saved = self
            .saved
            .lock()
            .map_err(|e| ComandaError::StorageError(e.to_string()))?;
        Ok(saved.clone().unwrap_or_default())
    }

    fn save(&self, cart: &Cart) -> Result<(), ComandaError> {
        let mut saved = self
            .saved
            .lock()
            .map_err(|e| ComandaError::StorageError(e.to_string()))?;
        *saved = Some(cart.clone());
        Ok(())
    }

    fn clear(&self) -> Result<(), ComandaError> {
        let mut saved = self
            .saved
            .lock()
            .map_err(|e| ComandaError::StorageError(e.to_string()))?;
        *saved = None;
        Ok(())
    }
}

/// Store backed by a `comanda-cache` slot.
#[cfg(feature = "storage")]
#[derive(Debug, Clone)]
pub struct CacheCartStore {
    slot: comanda_cache::Slot<Cart>,
}

#[cfg(feature = "storage")]
impl CacheCartStore {
    /// Keep the cart under `key` in `cache`.
    pub fn new(cache: comanda_cache::Cache, key: impl Into<String>) -> Self {
        Self {
            slot: comanda_cache::Slot::new(cache, key),
        }
    }

    /// Open the cache directory and keep the cart under `key`.
    pub fn open(
        dir: impl AsRef<std::path::Path>,
        key: impl Into<String>,
    ) -> Result<Self, ComandaError> {
        Ok(Self::new(comanda_cache::Cache::open(dir)?, key))
    }
}

#[cfg(feature = "storage")]
impl CartStore for CacheCartStore {
    fn load(&self) -> Result<Cart, ComandaError> {
        Ok(self.slot.load()?.unwrap_or_default())
    }

    fn save(&self, cart: &Cart) -> Result<(), ComandaError> {
        let version = self.slot.save(cart)?;
        tracing::debug!(key = self.slot.key(), version, lines = cart.len(), "Cart saved");
        Ok(())
    }

    fn clear(&self) -> Result<(), ComandaError> {
        self.slot.clear()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_memory_store_roundtrip() {
        let store = MemoryCartStore::new();
        assert!(store.load().unwrap().is_empty());
        assert!(store.saved().is_none());

        store.save(&Cart::new()).unwrap();
        assert!(store.saved().is_some());

        store.clear().unwrap();
        assert!(store.saved().is_none());
    }

    #[test]
    fn test_memory_store_clones_share_state() {
        let store = MemoryCartStore::new();
        let handle = store.clone();
        store.save(&Cart::new()).unwrap();
        assert!(handle.saved().is_some());
    }

    #[cfg(feature = "storage")]
    #[test]
    fn test_cache_store_persists_across_instances() {
        use crate::cart::CartLine;
        use crate::catalog::CatalogItem;
        use crate::money::Money;

        let dir = tempfile::tempdir().unwrap();
        let mut cart = Cart::new();
        let agua = CatalogItem::new(1, "Agua", Money::new(2000));
        cart.push(CartLine::new(&agua, None, "fría").unwrap());

        CacheCartStore::open(dir.path(), "myRestaurantCart")
            .unwrap()
            .save(&cart)
            .unwrap();

        let reopened = CacheCartStore::open(dir.path(), "myRestaurantCart").unwrap();
        assert_eq!(reopened.load().unwrap(), cart);

        reopened.clear().unwrap();
        assert!(reopened.load().unwrap().is_empty());
    }
}
