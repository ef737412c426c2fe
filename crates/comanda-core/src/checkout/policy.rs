//! Per-store checkout settings.

use crate::checkout::{sanitize_free_text, DEFAULT_ORDER_LABEL};
use crate::error::ComandaError;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Checkout settings a store can change without touching the flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckoutPolicy {
    /// Header label of every order message.
    pub order_label: String,
    /// Seconds a confirmed checkout blocks further confirmations.
    pub lockout_secs: u64,
    /// Accepted order types; the first is the default. Empty accepts any.
    pub order_types: Vec<String>,
}

impl Default for CheckoutPolicy {
    fn default() -> Self {
        Self {
            order_label: DEFAULT_ORDER_LABEL.to_string(),
            lockout_secs: 5,
            order_types: vec!["Para llevar".to_string(), "Comer aquí".to_string()],
        }
    }
}

impl CheckoutPolicy {
    pub fn lockout(&self) -> Duration {
        Duration::from_secs(self.lockout_secs)
    }

    /// Order type used when the client does not pick one.
    pub fn default_order_type(&self) -> Option<&str> {
        self.order_types.first().map(String::as_str)
    }

    /// Match a requested order type against the accepted list.
    ///
    /// Matching ignores case and surrounding whitespace and returns the
    /// configured spelling. A blank request picks the default. With no
    /// configured list the request is free text and is sanitized.
    pub fn resolve_order_type(&self, requested: &str) -> Result<String, ComandaError> {
        let requested = requested.trim();
        if self.order_types.is_empty() {
            return Ok(sanitize_free_text(requested).trim().to_string());
        }
        if requested.is_empty() {
            return self
                .default_order_type()
                .map(str::to_string)
                .ok_or_else(|| ComandaError::InvalidOrderType(String::new()));
        }
        let wanted = requested.to_lowercase();
        self.order_types
            .iter()
            .find(|t| t.trim().to_lowercase() == wanted)
            .cloned()
            .ok_or_else(|| ComandaError::InvalidOrderType(requested.to_string()))
    }
}
