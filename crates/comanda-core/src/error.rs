//! Storefront error types.

use thiserror::Error;

/// Errors that can occur while building or submitting an order.
///
/// Every variant is recoverable: an operation that returns one of these has
/// left the cart and any pending order exactly as they were.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ComandaError {
    /// Action attempted outside business hours.
    #[error("Closed: orders are accepted from {opens} to {closes}")]
    Closed { opens: String, closes: String },

    /// The chosen option is missing or does not belong to the item.
    #[error("Invalid option {option:?} for {item}")]
    InvalidSelection { item: String, option: Option<String> },

    /// Client name too short after trimming and sanitizing.
    #[error("Invalid client name: at least {min} characters required")]
    InvalidName { min: usize },

    /// Checkout with no lines.
    #[error("Cart is empty")]
    EmptyCart,

    /// Removal index outside the cart.
    #[error("No cart line at index {index} (cart has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The catalog failed to load or has not been loaded yet.
    #[error("Catalog unavailable: {0}")]
    CatalogUnavailable(String),

    /// No catalog item with this id.
    #[error("Product not found: {0}")]
    ProductNotFound(u32),

    /// Order type not offered by this store.
    #[error("Invalid order type: {0}")]
    InvalidOrderType(String),

    /// A checkout handoff is still locked out.
    #[error("Checkout already in progress")]
    CheckoutInFlight,

    /// Confirmation requested before an order was prepared.
    #[error("No order has been prepared for checkout")]
    NoPendingOrder,

    /// Business hours could not be parsed or are inconsistent.
    #[error("Invalid business hours: {0}")]
    InvalidHours(String),

    /// Negative or non-finite price.
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// The message handoff refused the payload.
    #[error("Handoff failed: {0}")]
    Handoff(String),

    /// Cart store error.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<serde_json::Error> for ComandaError {
    fn from(e: serde_json::Error) -> Self {
        ComandaError::SerializationError(e.to_string())
    }
}

#[cfg(feature = "storage")]
impl From<comanda_cache::CacheError> for ComandaError {
    fn from(e: comanda_cache::CacheError) -> Self {
        ComandaError::StorageError(e.to_string())
    }
}
