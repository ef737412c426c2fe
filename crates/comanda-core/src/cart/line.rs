//! Priced, option-resolved cart lines.

use crate::catalog::CatalogItem;
use crate::checkout::sanitize_free_text;
use crate::error::ComandaError;
use crate::ids::CartLineId;
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// One entry of the order in progress.
///
/// Lines are never edited after creation; the cart only adds and removes
/// them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CartLine {
    /// Unique line identifier.
    pub id: CartLineId,
    /// Snapshot of the menu item when it was added.
    pub item: CatalogItem,
    /// Name of the chosen option, if the item has options.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub option: Option<String>,
    /// Sanitized, trimmed note; may be empty.
    #[serde(default)]
    pub note: String,
    /// Item price plus the chosen option's extra.
    pub final_price: Money,
}

impl CartLine {
    /// Resolve the selection against the item and price the line.
    ///
    /// An item with options needs the exact name of one of them. An item
    /// without options accepts no selection.
    pub fn new(item: &CatalogItem, option: Option<&str>, note: &str) -> Result<Self, ComandaError> {
        let invalid = || ComandaError::InvalidSelection {
            item: item.name.clone(),
            option: option.map(str::to_string),
        };

        let (option, extra) = match (item.has_options(), option) {
            (false, None) => (None, Money::zero()),
            (true, Some(name)) => {
                let chosen = item.option(name).ok_or_else(invalid)?;
                (Some(chosen.name.clone()), chosen.extra)
            }
            _ => return Err(invalid()),
        };

        let final_price = item.price.checked_add(extra).ok_or_else(|| {
            ComandaError::InvalidPrice(format!("{} plus {} overflows", item.price, extra))
        })?;

        Ok(Self {
            id: CartLineId::generate(),
            item: item.clone(),
            option,
            note: sanitize_free_text(note).trim().to_string(),
            final_price,
        })
    }

    /// Display name of the item.
    pub fn name(&self) -> &str {
        &self.item.name
    }

    /// Whether the visitor left a note.
    pub fn has_note(&self) -> bool {
        !self.note.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn torta() -> CatalogItem {
        CatalogItem::new(1, "Torta", Money::new(8500))
            .with_option("Res", Money::zero())
            .with_option("Pollo", Money::new(1000))
    }

    #[test]
    fn test_line_price_includes_option_extra() {
        let line = CartLine::new(&torta(), Some("Pollo"), "  sin cebolla ").unwrap();
        assert_eq!(line.final_price, Money::new(9500));
        assert_eq!(line.option.as_deref(), Some("Pollo"));
        assert_eq!(line.note, "sin cebolla");
        assert!(line.has_note());
    }

    #[test]
    fn test_missing_or_unknown_option_is_invalid() {
        for option in [None, Some("Pastor"), Some("pollo")] {
            assert!(matches!(
                CartLine::new(&torta(), option, ""),
                Err(ComandaError::InvalidSelection { .. })
            ));
        }
    }

    #[test]
    fn test_item_without_options() {
        let agua = CatalogItem::new(2, "Agua", Money::new(2000));
        let line = CartLine::new(&agua, None, "").unwrap();
        assert_eq!(line.final_price, Money::new(2000));
        assert_eq!(line.option, None);
        assert!(!line.has_note());

        assert!(matches!(
            CartLine::new(&agua, Some("Grande"), ""),
            Err(ComandaError::InvalidSelection { .. })
        ));
    }

    #[test]
    fn test_note_is_sanitized() {
        let line = CartLine::new(&torta(), Some("Res"), "*extra*\nqueso").unwrap();
        assert_eq!(line.note, "extra queso");
    }

    #[test]
    fn test_lines_get_distinct_ids() {
        let a = CartLine::new(&torta(), Some("Res"), "").unwrap();
        let b = CartLine::new(&torta(), Some("Res"), "").unwrap();
        assert_ne!(a.id, b.id);
    }
}
