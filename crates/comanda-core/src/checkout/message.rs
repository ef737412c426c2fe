//! Order message composition.

use crate::checkout::{sanitize_free_text, Order};

/// Label printed in the message header when none is configured.
pub const DEFAULT_ORDER_LABEL: &str = "PEDIDO BG-14";

const SEPARATOR: &str = "----------------------------------";

/// Turns an [`Order`] into the plain-text message sent to the restaurant.
///
/// Lines are separated by `\n`; escaping for a particular transport is the
/// handoff's job.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MessageComposer {
    label: String,
}

impl MessageComposer {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    /// Compose the message.
    ///
    /// ```text
    /// *PEDIDO BG-14*
    /// *Referencia:* ROB05091502
    /// *Cliente:* Roberto
    /// *Tipo:* Para llevar
    /// ----------------------------------
    /// *1. Torta* - $95.00
    ///    ↳ _Opción: Pollo_
    ///    ↳ _Nota: sin cebolla_
    /// ----------------------------------
    /// *TOTAL: $95.00* (Adjunto Comprobante)
    /// ```
    pub fn compose(&self, order: &Order) -> String {
        let mut out = String::new();
        out.push_str(&format!("*{}*\n", self.label));
        out.push_str(&format!("*Referencia:* {}\n", order.reference));
        out.push_str(&format!("*Cliente:* {}\n", sanitize_free_text(&order.client_name)));
        out.push_str(&format!("*Tipo:* {}\n", order.order_type));
        out.push_str(SEPARATOR);
        out.push('\n');

        for (index, line) in order.lines.iter().enumerate() {
            out.push_str(&format!(
                "*{}. {}* - {}\n",
                index + 1,
                line.name(),
                line.final_price.display()
            ));
            if let Some(option) = &line.option {
                out.push_str(&format!("   ↳ _Opción: {}_\n", option));
            }
            let note = sanitize_free_text(&line.note);
            let note = note.trim();
            if !note.is_empty() {
                out.push_str(&format!("   ↳ _Nota: {}_\n", note));
            }
        }

        out.push_str(SEPARATOR);
        out.push('\n');
        out.push_str(&format!("*TOTAL: {}* (Adjunto Comprobante)", order.total.display()));
        out
    }
}

impl Default for MessageComposer {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER_LABEL)
    }
}
