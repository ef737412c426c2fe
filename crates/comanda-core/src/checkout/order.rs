//! Order snapshot and the checkout checks that produce it.

use crate::cart::{Cart, CartLine};
use crate::checkout::{generate_reference, sanitize_free_text, validate_client};
use crate::error::ComandaError;
use crate::money::Money;
use crate::schedule::BusinessHours;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// A finished order, ready to be composed into a message.
///
/// Orders are never stored; one lives only for a single checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Human-readable reference, e.g. `ROB05143012`.
    pub reference: String,
    /// Sanitized, trimmed client name.
    pub client_name: String,
    /// How the order is served (e.g. "Para llevar").
    pub order_type: String,
    /// Cart lines at checkout time.
    pub lines: Vec<CartLine>,
    /// Sum of the line prices.
    pub total: Money,
    /// Local time the order was prepared.
    pub created_at: NaiveDateTime,
}

impl Order {
    /// Number of lines.
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }
}

/// Validate a checkout and snapshot the cart into an [`Order`].
///
/// Checks run in this order and stop at the first failure: business
/// hours, cart not empty, client name. No reference is generated unless
/// all of them pass.
pub fn checkout(
    cart: &Cart,
    hours: &BusinessHours,
    name: &str,
    order_type: &str,
    now: NaiveDateTime,
) -> Result<Order, ComandaError> {
    hours.ensure_open(now)?;

    if cart.is_empty() {
        return Err(ComandaError::EmptyCart);
    }

    let client_name = validate_client(&sanitize_free_text(name))?;
    let reference = generate_reference(&client_name, now);

    tracing::debug!(%reference, lines = cart.len(), "Order prepared");

    Ok(Order {
        reference,
        client_name,
        order_type: sanitize_free_text(order_type).trim().to_string(),
        lines: cart.lines().to_vec(),
        total: cart.total(),
        created_at: now,
    })
}
