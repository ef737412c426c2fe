//! Cart, schedule gate and order composition for a single-restaurant
//! storefront.
//!
//! - **Catalog**: menu items with price-modifying options
//! - **Schedule**: business-hours gate guarding every cart change
//! - **Cart**: priced lines, totals and optional persistence
//! - **Checkout**: name and note validation, order references, message
//!   composition and handoff
//! - **Session**: one visitor's flow from menu to handed-off order
//!
//! # Example
//!
//! ```rust,ignore
//! use comanda_core::prelude::*;
//! use std::sync::Arc;
//!
//! let engine = CartEngine::new(BusinessHours::default(), Arc::new(LocalClock));
//! let mut session = StorefrontSession::new(
//!     engine,
//!     CheckoutPolicy::default(),
//!     Box::new(WhatsAppLink::default()),
//!     "5212414073434",
//! );
//! session.load_catalog(&JsonFileCatalog::new("menu.json")).await?;
//!
//! session.add_item(1, Some("Pollo"), "sin cebolla")?;
//! let order = session.prepare_checkout("Roberto", None)?;
//! println!("Referencia: {} Total: {}", order.reference, order.total);
//!
//! let receipt = session.confirm_checkout()?;
//! println!("{}", receipt.link);
//! ```

pub mod error;
pub mod ids;
pub mod money;
pub mod schedule;

pub mod catalog;
pub mod cart;
pub mod checkout;
pub mod session;

pub use error::ComandaError;
pub use ids::CartLineId;
pub use money::Money;
pub use session::{HandoffReceipt, StorefrontSession};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::ComandaError;
    pub use crate::ids::CartLineId;
    pub use crate::money::Money;

    // Schedule
    pub use crate::schedule::{BusinessHours, Clock, FixedClock, LocalClock};

    // Catalog
    pub use crate::catalog::{
        Catalog, CatalogItem, CatalogProvider, ItemOption, JsonFileCatalog, StaticCatalog,
    };

    // Cart
    #[cfg(feature = "storage")]
    pub use crate::cart::CacheCartStore;
    pub use crate::cart::{Cart, CartEngine, CartLine, CartStore, MemoryCartStore};

    // Checkout
    pub use crate::checkout::{
        CheckoutPolicy, MessageComposer, MessageHandoff, Order, RecordingHandoff, WhatsAppLink,
    };

    // Session
    pub use crate::session::{HandoffReceipt, StorefrontSession};
}
