//! Storefront session: one visitor's catalog, cart and checkout.
//!
//! The session sequences the schedule gate, the cart engine, the order
//! composer and the handoff, and resets the cart once an order is handed
//! off.

use crate::cart::{Cart, CartEngine, CartLine};
use crate::catalog::{Catalog, CatalogProvider};
use crate::checkout::{
    checkout, CheckoutGuard, CheckoutPolicy, MessageComposer, MessageHandoff, Order,
};
use crate::error::ComandaError;
use crate::money::Money;
use crate::schedule::BusinessHours;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::time::Instant;

/// Result of a successful handoff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HandoffReceipt {
    /// Order reference sent to the restaurant.
    pub reference: String,
    /// Order total.
    pub total: Money,
    /// The composed message.
    pub payload: String,
    /// Where the handoff opened the message.
    pub link: String,
}

/// One visitor's storefront state.
pub struct StorefrontSession {
    catalog: Option<Catalog>,
    engine: CartEngine,
    policy: CheckoutPolicy,
    composer: MessageComposer,
    guard: CheckoutGuard,
    handoff: Box<dyn MessageHandoff>,
    destination: String,
    pending: Option<Order>,
    issued: HashSet<String>,
}

impl StorefrontSession {
    /// Create a session with no catalog loaded.
    pub fn new(
        engine: CartEngine,
        policy: CheckoutPolicy,
        handoff: Box<dyn MessageHandoff>,
        destination: impl Into<String>,
    ) -> Self {
        Self {
            catalog: None,
            composer: MessageComposer::new(policy.order_label.clone()),
            guard: CheckoutGuard::new(policy.lockout()),
            engine,
            policy,
            handoff,
            destination: destination.into(),
            pending: None,
            issued: HashSet::new(),
        }
    }

    /// Builder: start with a catalog already loaded.
    pub fn with_catalog(mut self, catalog: Catalog) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Load the catalog once from `provider`.
    ///
    /// On failure the session has no catalog and refuses to add items.
    pub async fn load_catalog(
        &mut self,
        provider: &dyn CatalogProvider,
    ) -> Result<usize, ComandaError> {
        match provider.load().await {
            Ok(catalog) => {
                let count = catalog.len();
                self.catalog = Some(catalog);
                Ok(count)
            }
            Err(e) => {
                tracing::warn!(error = %e, "Catalog unavailable");
                self.catalog = None;
                Err(e)
            }
        }
    }

    /// Loaded catalog, if any.
    pub fn catalog(&self) -> Option<&Catalog> {
        self.catalog.as_ref()
    }

    pub fn cart(&self) -> &Cart {
        self.engine.cart()
    }

    pub fn total(&self) -> Money {
        self.engine.total()
    }

    pub fn hours(&self) -> &BusinessHours {
        self.engine.hours()
    }

    pub fn policy(&self) -> &CheckoutPolicy {
        &self.policy
    }

    /// Whether the shop is open right now.
    pub fn is_open(&self) -> bool {
        self.engine.is_open()
    }

    /// Order prepared and waiting for confirmation.
    pub fn pending_order(&self) -> Option<&Order> {
        self.pending.as_ref()
    }

    /// Add a catalog item by id.
    ///
    /// Without an explicit option the item's first option is chosen.
    pub fn add_item(
        &mut self,
        id: u32,
        option: Option<&str>,
        note: &str,
    ) -> Result<CartLine, ComandaError> {
        self.engine.hours().ensure_open(self.engine.now())?;
        let catalog = self
            .catalog
            .as_ref()
            .ok_or_else(|| ComandaError::CatalogUnavailable("no catalog loaded".to_string()))?;
        let item = catalog.find(id).ok_or(ComandaError::ProductNotFound(id))?;
        let option = option.or_else(|| item.default_option().map(|o| o.name.as_str()));

        let line = self.engine.add_line(item, option, note)?;
        self.pending = None;
        Ok(line)
    }

    /// Remove the line at `index` (0-based).
    pub fn remove_item(&mut self, index: usize) -> Result<CartLine, ComandaError> {
        let line = self.engine.remove_line(index)?;
        self.pending = None;
        Ok(line)
    }

    /// Empty the cart and drop any prepared order.
    pub fn clear_cart(&mut self) {
        self.engine.clear();
        self.pending = None;
    }

    /// Validate the checkout and keep the order until it is confirmed.
    ///
    /// A missing order type picks the store's default. The returned order
    /// carries the reference and total to show the client before payment.
    pub fn prepare_checkout(
        &mut self,
        name: &str,
        order_type: Option<&str>,
    ) -> Result<&Order, ComandaError> {
        let mut order = checkout(
            self.engine.cart(),
            self.engine.hours(),
            name,
            "",
            self.engine.now(),
        )?;
        order.order_type = self.policy.resolve_order_type(order_type.unwrap_or(""))?;
        order.reference = self.unique_reference(&order.reference);

        tracing::info!(
            reference = %order.reference,
            total = %order.total,
            order_type = %order.order_type,
            "Checkout prepared"
        );
        let order: &Order = self.pending.insert(order);
        Ok(order)
    }

    /// Compose the prepared order and hand it off.
    ///
    /// While a previous confirmation is locked out this fails with
    /// `CheckoutInFlight`. On success the cart is emptied and the lockout
    /// stays until it times out. If the handoff fails the lockout is lifted
    /// and the cart and prepared order are kept.
    pub fn confirm_checkout(&mut self) -> Result<HandoffReceipt, ComandaError> {
        let order = self.pending.clone().ok_or(ComandaError::NoPendingOrder)?;
        self.guard.try_acquire(Instant::now())?;

        if let Err(e) = self.engine.hours().ensure_open(self.engine.now()) {
            self.guard.release();
            return Err(e);
        }

        let payload = self.composer.compose(&order);
        tracing::debug!(%payload, "Order message composed");

        let link = match self.handoff.send(&payload, &self.destination) {
            Ok(link) => link,
            Err(e) => {
                tracing::warn!(reference = %order.reference, error = %e, "Handoff failed");
                self.guard.release();
                return Err(e);
            }
        };

        self.issued.insert(order.reference.clone());
        self.engine.clear();
        self.pending = None;
        tracing::info!(reference = %order.reference, total = %order.total, "Order handed off");

        Ok(HandoffReceipt {
            reference: order.reference,
            total: order.total,
            payload,
            link,
        })
    }

    /// Append `-2`, `-3`, ... when a reference was already handed off.
    fn unique_reference(&self, base: &str) -> String {
        if !self.issued.contains(base) {
            return base.to_string();
        }
        (2u32..)
            .map(|n| format!("{}-{}", base, n))
            .find(|candidate| !self.issued.contains(candidate))
            .unwrap_or_else(|| base.to_string())
    }
}

impl std::fmt::Debug for StorefrontSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontSession")
            .field("catalog_items", &self.catalog.as_ref().map(Catalog::len))
            .field("engine", &self.engine)
            .field("policy", &self.policy)
            .field("destination", &self.destination)
            .field("pending", &self.pending.as_ref().map(|o| &o.reference))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cart::MemoryCartStore;
    use crate::catalog::{CatalogItem, StaticCatalog};
    use crate::checkout::RecordingHandoff;
    use crate::schedule::FixedClock;
    use chrono::{NaiveDate, NaiveDateTime};
    use std::sync::Arc;

    const PHONE: &str = "5212414073434";

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 5)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn menu() -> Catalog {
        Catalog::new(vec![
            CatalogItem::new(1, "Torta", Money::new(8500))
                .with_option("Res", Money::zero())
                .with_option("Pollo", Money::new(1000)),
            CatalogItem::new(2, "Chilaquiles", Money::new(12000)),
        ])
    }

    struct Fixture {
        clock: Arc<FixedClock>,
        handoff: RecordingHandoff,
        store: MemoryCartStore,
        session: StorefrontSession,
    }

    fn fixture_with(policy: CheckoutPolicy, handoff: RecordingHandoff) -> Fixture {
        let clock = Arc::new(FixedClock::new(at(12, 0, 0)));
        let store = MemoryCartStore::new();
        let engine = CartEngine::new(BusinessHours::default(), clock.clone())
            .with_store(Box::new(store.clone()));
        let session = StorefrontSession::new(engine, policy, Box::new(handoff.clone()), PHONE)
            .with_catalog(menu());
        Fixture {
            clock,
            handoff,
            store,
            session,
        }
    }

    fn fixture() -> Fixture {
        fixture_with(CheckoutPolicy::default(), RecordingHandoff::new())
    }

    #[test]
    fn test_add_item_defaults_to_first_option() {
        let mut f = fixture();
        let line = f.session.add_item(1, None, "").unwrap();
        assert_eq!(line.option.as_deref(), Some("Res"));
        assert_eq!(line.final_price, Money::new(8500));
    }

    #[test]
    fn test_add_item_requires_catalog_and_known_id() {
        let mut f = fixture();
        assert_eq!(f.session.add_item(99, None, ""), Err(ComandaError::ProductNotFound(99)));

        let clock = Arc::new(FixedClock::new(at(12, 0, 0)));
        let engine = CartEngine::new(BusinessHours::default(), clock);
        let mut bare = StorefrontSession::new(
            engine,
            CheckoutPolicy::default(),
            Box::new(RecordingHandoff::new()),
            PHONE,
        );
        assert!(matches!(
            bare.add_item(1, None, ""),
            Err(ComandaError::CatalogUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_load_catalog() {
        let mut f = fixture();
        let count = f
            .session
            .load_catalog(&StaticCatalog::new(vec![CatalogItem::new(
                7,
                "Agua",
                Money::new(2000),
            )]))
            .await
            .unwrap();
        assert_eq!(count, 1);
        assert!(f.session.add_item(7, None, "").is_ok());
        assert_eq!(f.session.add_item(1, None, ""), Err(ComandaError::ProductNotFound(1)));
    }

    #[test]
    fn test_prepare_checkout_validates_order_type() {
        let mut f = fixture();
        f.session.add_item(2, None, "").unwrap();

        let order = f.session.prepare_checkout("Roberto", None).unwrap();
        assert_eq!(order.order_type, "Para llevar");

        assert_eq!(
            f.session.prepare_checkout("Roberto", Some("Domicilio")).unwrap_err(),
            ComandaError::InvalidOrderType("Domicilio".to_string())
        );
    }

    #[test]
    fn test_order_type_keeps_configured_spelling() {
        let policy = CheckoutPolicy {
            order_types: vec!["Para llevar".to_string(), "Domicilio (+$20)".to_string()],
            ..CheckoutPolicy::default()
        };
        let mut f = fixture_with(policy, RecordingHandoff::new());
        f.session.add_item(2, None, "").unwrap();

        let order = f
            .session
            .prepare_checkout("Roberto", Some("Domicilio (+$20)"))
            .unwrap();
        assert_eq!(order.order_type, "Domicilio (+$20)");

        let receipt = f.session.confirm_checkout().unwrap();
        assert!(receipt.payload.contains("*Tipo:* Domicilio (+$20)"));
    }

    #[test]
    fn test_confirm_without_prepare() {
        let mut f = fixture();
        assert_eq!(f.session.confirm_checkout(), Err(ComandaError::NoPendingOrder));
    }

    #[test]
    fn test_confirm_hands_off_and_resets() {
        let mut f = fixture();
        f.session.add_item(1, Some("Pollo"), "sin cebolla").unwrap();
        f.session.prepare_checkout("Roberto", Some("comer aquí")).unwrap();

        let receipt = f.session.confirm_checkout().unwrap();
        assert!(receipt.reference.starts_with("ROB"));
        assert_eq!(receipt.total.display_amount(), "95.00");
        assert_eq!(receipt.link, "recorded:1");
        assert!(receipt.payload.contains("*Tipo:* Comer aquí"));

        let sent = f.handoff.sent();
        assert_eq!(sent.len(), 1);
        assert_eq!(sent[0].destination, PHONE);
        assert_eq!(sent[0].payload, receipt.payload);

        assert!(f.session.cart().is_empty());
        assert!(f.session.pending_order().is_none());
        assert!(f.store.saved().is_none());
    }

    #[test]
    fn test_repeated_confirmation_is_locked_out() {
        let mut f = fixture();
        f.session.add_item(2, None, "").unwrap();
        f.session.prepare_checkout("Roberto", None).unwrap();
        f.session.confirm_checkout().unwrap();

        f.session.add_item(2, None, "").unwrap();
        f.session.prepare_checkout("Roberto", None).unwrap();
        assert_eq!(f.session.confirm_checkout(), Err(ComandaError::CheckoutInFlight));
        assert_eq!(f.session.cart().len(), 1);
        assert!(f.session.pending_order().is_some());
        assert_eq!(f.handoff.sent().len(), 1);
    }

    #[test]
    fn test_same_second_reference_gets_suffix() {
        let policy = CheckoutPolicy {
            lockout_secs: 0,
            ..CheckoutPolicy::default()
        };
        let mut f = fixture_with(policy, RecordingHandoff::new());

        f.session.add_item(2, None, "").unwrap();
        f.session.prepare_checkout("Roberto", None).unwrap();
        let first = f.session.confirm_checkout().unwrap();

        f.session.add_item(2, None, "").unwrap();
        f.session.prepare_checkout("Roberta", None).unwrap();
        let second = f.session.confirm_checkout().unwrap();

        assert_eq!(first.reference, "ROB05120000");
        assert_eq!(second.reference, "ROB05120000-2");
    }

    #[test]
    fn test_failed_handoff_keeps_cart_and_unlocks() {
        let mut f = fixture_with(CheckoutPolicy::default(), RecordingHandoff::failing());
        f.session.add_item(2, None, "").unwrap();
        f.session.prepare_checkout("Roberto", None).unwrap();

        assert!(matches!(f.session.confirm_checkout(), Err(ComandaError::Handoff(_))));
        assert_eq!(f.session.cart().len(), 1);
        assert!(f.session.pending_order().is_some());
        assert!(matches!(f.session.confirm_checkout(), Err(ComandaError::Handoff(_))));
    }

    #[test]
    fn test_confirm_rechecks_gate() {
        let mut f = fixture();
        f.session.add_item(2, None, "").unwrap();
        f.session.prepare_checkout("Roberto", None).unwrap();

        f.clock.set(at(17, 0, 0));
        assert!(matches!(f.session.confirm_checkout(), Err(ComandaError::Closed { .. })));
        assert_eq!(f.session.cart().len(), 1);

        f.clock.set(at(16, 59, 0));
        assert!(f.session.confirm_checkout().is_ok());
    }

    #[test]
    fn test_cart_change_drops_prepared_order() {
        let mut f = fixture();
        f.session.add_item(2, None, "").unwrap();
        f.session.prepare_checkout("Roberto", None).unwrap();
        f.session.add_item(1, None, "").unwrap();
        assert!(f.session.pending_order().is_none());
        assert_eq!(f.session.confirm_checkout(), Err(ComandaError::NoPendingOrder));
    }
}
