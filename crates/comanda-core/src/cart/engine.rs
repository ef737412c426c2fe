//! Cart engine: the only way the cart changes.

use crate::cart::{Cart, CartLine, CartStore};
use crate::catalog::CatalogItem;
use crate::error::ComandaError;
use crate::ids::CartLineId;
use crate::money::Money;
use crate::schedule::{BusinessHours, Clock};
use chrono::NaiveDateTime;
use std::sync::Arc;

/// Owns the cart and guards its mutations with the business-hours gate.
///
/// Every failed operation leaves the cart exactly as it was.
pub struct CartEngine {
    cart: Cart,
    hours: BusinessHours,
    clock: Arc<dyn Clock>,
    store: Option<Box<dyn CartStore>>,
}

impl CartEngine {
    /// Create an engine with an empty cart and no store.
    pub fn new(hours: BusinessHours, clock: Arc<dyn Clock>) -> Self {
        Self {
            cart: Cart::new(),
            hours,
            clock,
            store: None,
        }
    }

    /// Attach a store and restore the cart it holds.
    ///
    /// An unreadable store yields an empty cart.
    pub fn with_store(mut self, store: Box<dyn CartStore>) -> Self {
        let cart = match store.load() {
            Ok(cart) => cart,
            Err(e) => {
                tracing::warn!(error = %e, "Saved cart unreadable, starting empty");
                Cart::new()
            }
        };
        if let Some(max) = cart.max_line_id() {
            CartLineId::observe(max);
        }
        if !cart.is_empty() {
            tracing::info!(lines = cart.len(), total = %cart.total(), "Cart restored");
        }
        self.cart = cart;
        self.store = Some(store);
        self
    }

    /// Current cart.
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    /// Configured business hours.
    pub fn hours(&self) -> &BusinessHours {
        &self.hours
    }

    /// Current local time from the engine's clock.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Whether the gate is open right now.
    pub fn is_open(&self) -> bool {
        self.hours.is_open(self.now())
    }

    /// Add a priced line for `item`.
    ///
    /// Fails with `Closed` outside business hours and with
    /// `InvalidSelection` when the option does not fit the item.
    pub fn add_line(
        &mut self,
        item: &CatalogItem,
        option: Option<&str>,
        note: &str,
    ) -> Result<CartLine, ComandaError> {
        self.hours.ensure_open(self.now())?;
        let line = CartLine::new(item, option, note)?;
        tracing::info!(
            line = %line.id,
            item = item.id,
            option = line.option.as_deref().unwrap_or(""),
            price = %line.final_price,
            "Line added"
        );
        self.cart.push(line.clone());
        self.persist();
        Ok(line)
    }

    /// Remove the line at `index` (0-based).
    pub fn remove_line(&mut self, index: usize) -> Result<CartLine, ComandaError> {
        self.hours.ensure_open(self.now())?;
        let removed = self.cart.remove(index)?;
        tracing::info!(line = %removed.id, index, "Line removed");
        self.persist();
        Ok(removed)
    }

    /// Sum of the current line prices.
    pub fn total(&self) -> Money {
        self.cart.total()
    }

    /// Empty the cart and its saved copy.
    pub fn clear(&mut self) {
        self.cart.clear();
        if let Some(store) = &self.store {
            if let Err(e) = store.clear() {
                tracing::warn!(error = %e, "Failed to clear saved cart");
            }
        }
        tracing::debug!("Cart cleared");
    }

    fn persist(&self) {
        if let Some(store) = &self.store {
            if let Err(e) = store.save(&self.cart) {
                tracing::warn!(error = %e, "Failed to save cart");
            }
        }
    }
}

impl std::fmt::Debug for CartEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CartEngine")
            .field("cart", &self.cart)
            .field("hours", &self.hours)
            .field("store", &self.store.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::MemoryCartStore;
    use crate::schedule::FixedClock;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 5)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn engine_at(h: u32, m: u32) -> (Arc<FixedClock>, CartEngine) {
        let clock = Arc::new(FixedClock::new(at(h, m)));
        let engine = CartEngine::new(BusinessHours::default(), clock.clone());
        (clock, engine)
    }

    fn torta() -> CatalogItem {
        CatalogItem::new(1, "Torta", Money::new(8500)).with_option("Pollo", Money::new(1000))
    }

    fn chilaquiles() -> CatalogItem {
        CatalogItem::new(2, "Chilaquiles", Money::new(12000))
    }

    #[test]
    fn test_add_line_and_total() {
        let (_clock, mut engine) = engine_at(12, 0);
        engine.add_line(&torta(), Some("Pollo"), "sin cebolla").unwrap();
        assert_eq!(engine.total().display_amount(), "95.00");

        engine.add_line(&chilaquiles(), None, "").unwrap();
        assert_eq!(engine.total().display_amount(), "215.00");
        assert_eq!(engine.cart().len(), 2);
    }

    #[test]
    fn test_add_line_refused_when_closed() {
        let (_clock, mut engine) = engine_at(17, 0);
        assert!(matches!(
            engine.add_line(&chilaquiles(), None, ""),
            Err(ComandaError::Closed { .. })
        ));
        assert!(engine.cart().is_empty());
    }

    #[test]
    fn test_invalid_selection_leaves_cart_unchanged() {
        let (_clock, mut engine) = engine_at(12, 0);
        engine.add_line(&chilaquiles(), None, "").unwrap();
        let before = engine.cart().clone();

        assert!(matches!(
            engine.add_line(&torta(), None, ""),
            Err(ComandaError::InvalidSelection { .. })
        ));
        assert!(engine.add_line(&torta(), Some("Res"), "").is_err());
        assert_eq!(engine.cart(), &before);
    }

    #[test]
    fn test_remove_line() {
        let (_clock, mut engine) = engine_at(12, 0);
        engine.add_line(&torta(), Some("Pollo"), "").unwrap();
        engine.add_line(&chilaquiles(), None, "").unwrap();

        let removed = engine.remove_line(0).unwrap();
        assert_eq!(removed.final_price, Money::new(9500));
        assert_eq!(engine.total(), Money::new(12000));

        assert!(matches!(
            engine.remove_line(5),
            Err(ComandaError::IndexOutOfRange { index: 5, len: 1 })
        ));
        assert_eq!(engine.cart().len(), 1);
    }

    #[test]
    fn test_remove_refused_when_closed() {
        let (clock, mut engine) = engine_at(12, 0);
        engine.add_line(&chilaquiles(), None, "").unwrap();
        clock.set(at(6, 0));
        assert!(matches!(engine.remove_line(0), Err(ComandaError::Closed { .. })));
        assert_eq!(engine.cart().len(), 1);
    }

    #[test]
    fn test_clear_is_not_gated() {
        let (clock, mut engine) = engine_at(12, 0);
        engine.add_line(&chilaquiles(), None, "").unwrap();
        clock.set(at(23, 0));
        engine.clear();
        assert!(engine.cart().is_empty());
    }

    #[test]
    fn test_store_follows_mutations() {
        let store = MemoryCartStore::new();
        let (_clock, engine) = engine_at(12, 0);
        let mut engine = engine.with_store(Box::new(store.clone()));

        engine.add_line(&chilaquiles(), None, "").unwrap();
        assert_eq!(store.saved().unwrap().len(), 1);

        engine.add_line(&chilaquiles(), None, "").unwrap();
        engine.remove_line(0).unwrap();
        assert_eq!(store.saved().unwrap().len(), 1);

        engine.clear();
        assert!(store.saved().is_none());
    }

    #[test]
    fn test_restore_moves_ids_forward() {
        let (_clock, mut first) = engine_at(12, 0);
        let restored_line = first.add_line(&chilaquiles(), None, "").unwrap();
        let mut saved = first.cart().clone();
        let far = CartLine {
            id: CartLineId::new(restored_line.id.value() + 500_000),
            ..restored_line
        };
        saved.push(far.clone());

        let (_clock, engine) = engine_at(12, 0);
        let mut engine = engine.with_store(Box::new(MemoryCartStore::with_cart(saved)));
        assert_eq!(engine.cart().len(), 2);

        let fresh = engine.add_line(&chilaquiles(), None, "").unwrap();
        assert!(fresh.id > far.id);
    }
}
