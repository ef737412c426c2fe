//! Menu item types and defensive catalog parsing.

use crate::error::ComandaError;
use crate::money::Money;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Category filter that matches every item.
pub const ALL_CATEGORIES: &str = "all";

/// A price-modifying choice offered by a menu item (e.g. a filling or size).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemOption {
    /// Option name, unique within its item.
    pub name: String,
    /// Amount added to the item price when chosen.
    #[serde(default)]
    pub extra: Money,
}

impl ItemOption {
    pub fn new(name: impl Into<String>, extra: Money) -> Self {
        Self {
            name: name.into(),
            extra,
        }
    }
}

/// A purchasable item from the menu.
///
/// Unknown fields in the source document are ignored; missing descriptive
/// fields default to empty.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogItem {
    /// Stable numeric identifier.
    pub id: u32,
    /// Display name.
    pub name: String,
    /// Base price.
    pub price: Money,
    /// Description or ingredients.
    #[serde(default)]
    pub desc: String,
    /// Category key used by the menu filter.
    #[serde(default)]
    pub cat: String,
    /// Optional image path.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub img: Option<String>,
    /// Ordered options; the first one is the default choice.
    #[serde(default)]
    pub options: Vec<ItemOption>,
}

impl CatalogItem {
    /// Create an item without options.
    pub fn new(id: u32, name: impl Into<String>, price: Money) -> Self {
        Self {
            id,
            name: name.into(),
            price,
            desc: String::new(),
            cat: String::new(),
            img: None,
            options: Vec::new(),
        }
    }

    /// Builder: set the category key.
    pub fn with_category(mut self, cat: impl Into<String>) -> Self {
        self.cat = cat.into();
        self
    }

    /// Builder: set the description.
    pub fn with_desc(mut self, desc: impl Into<String>) -> Self {
        self.desc = desc.into();
        self
    }

    /// Builder: append an option.
    pub fn with_option(mut self, name: impl Into<String>, extra: Money) -> Self {
        self.options.push(ItemOption::new(name, extra));
        self
    }

    /// Whether the item requires an option choice.
    pub fn has_options(&self) -> bool {
        !self.options.is_empty()
    }

    /// Look up an option by exact name.
    pub fn option(&self, name: &str) -> Option<&ItemOption> {
        self.options.iter().find(|o| o.name == name)
    }

    /// The option pre-selected when the visitor makes no choice.
    pub fn default_option(&self) -> Option<&ItemOption> {
        self.options.first()
    }

    /// Image path, if one is set and not blank.
    pub fn image(&self) -> Option<&str> {
        self.img.as_deref().map(str::trim).filter(|s| !s.is_empty())
    }
}

/// The loaded menu.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    items: Vec<CatalogItem>,
}

impl Catalog {
    /// Build a catalog, keeping the first item for any duplicated id.
    pub fn new(items: Vec<CatalogItem>) -> Self {
        let mut seen = HashSet::new();
        let items = items
            .into_iter()
            .filter(|item| {
                let fresh = seen.insert(item.id);
                if !fresh {
                    tracing::warn!(id = item.id, name = %item.name, "Duplicate catalog id skipped");
                }
                fresh
            })
            .collect();
        Self { items }
    }

    /// All items in menu order.
    pub fn items(&self) -> &[CatalogItem] {
        &self.items
    }

    /// Find an item by id.
    pub fn find(&self, id: u32) -> Option<&CatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Distinct category keys in first-seen order.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = HashSet::new();
        self.items
            .iter()
            .map(|item| item.cat.as_str())
            .filter(|cat| !cat.is_empty() && seen.insert(*cat))
            .collect()
    }

    /// Items in a category; [`ALL_CATEGORIES`] returns everything.
    pub fn by_category<'a>(
        &'a self,
        filter: &'a str,
    ) -> impl Iterator<Item = &'a CatalogItem> + 'a {
        self.items
            .iter()
            .filter(move |item| filter == ALL_CATEGORIES || item.cat == filter)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

/// Parse a catalog document.
///
/// The document must be a JSON array. Entries that do not match the item
/// shape are skipped with a warning rather than failing the whole menu.
pub fn parse_catalog(json: &str) -> Result<Catalog, ComandaError> {
    let value: serde_json::Value = serde_json::from_str(json)
        .map_err(|e| ComandaError::CatalogUnavailable(e.to_string()))?;

    let entries = match value {
        serde_json::Value::Array(entries) => entries,
        other => {
            return Err(ComandaError::CatalogUnavailable(format!(
                "expected a list of items, found {}",
                json_kind(&other)
            )))
        }
    };

    let total = entries.len();
    let items: Vec<CatalogItem> = entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| match serde_json::from_value(entry) {
            Ok(item) => Some(item),
            Err(e) => {
                tracing::warn!(index, error = %e, "Skipping malformed catalog entry");
                None
            }
        })
        .collect();

    let catalog = Catalog::new(items);
    tracing::debug!(loaded = catalog.len(), total, "Catalog parsed");
    Ok(catalog)
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "a list",
        serde_json::Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const MENU: &str = r#"[
        {"id": 1, "name": "Torta de milanesa", "price": 85,
         "desc": "Pan, milanesa", "cat": "tortas",
         "img": "img/torta.jpg",
         "options": [{"name": "Res", "extra": 0}, {"name": "Pollo", "extra": 10}]},
        {"id": 2, "name": "Chilaquiles", "price": 120, "cat": "desayunos", "img": ""},
        {"id": 3, "name": "Cafe de olla", "price": 35.5, "cat": "bebidas", "spicy": true}
    ]"#;

    #[test]
    fn test_parse_catalog() {
        let catalog = parse_catalog(MENU).unwrap();
        assert_eq!(catalog.len(), 3);

        let torta = catalog.find(1).unwrap();
        assert_eq!(torta.price, Money::new(8500));
        assert_eq!(torta.options.len(), 2);
        assert_eq!(torta.option("Pollo").unwrap().extra, Money::new(1000));
        assert_eq!(torta.default_option().unwrap().name, "Res");
        assert_eq!(torta.image(), Some("img/torta.jpg"));

        let chilaquiles = catalog.find(2).unwrap();
        assert!(chilaquiles.desc.is_empty());
        assert!(!chilaquiles.has_options());
        assert_eq!(chilaquiles.image(), None);

        assert_eq!(catalog.find(3).unwrap().price, Money::new(3550));
    }

    #[test]
    fn test_malformed_entries_are_skipped() {
        let json = r#"[
            {"id": 1, "name": "Ok", "price": 10},
            {"id": 2, "name": "No price"},
            {"id": 3, "name": "Negative", "price": -5},
            "not an item",
            {"id": 4, "name": "Also ok", "price": 12}
        ]"#;
        let catalog = parse_catalog(json).unwrap();
        let ids: Vec<u32> = catalog.items().iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 4]);
    }

    #[test]
    fn test_non_array_document_is_unavailable() {
        assert!(matches!(
            parse_catalog(r#"{"items": []}"#),
            Err(ComandaError::CatalogUnavailable(_))
        ));
        assert!(matches!(
            parse_catalog("not json"),
            Err(ComandaError::CatalogUnavailable(_))
        ));
    }

    #[test]
    fn test_duplicate_ids_keep_first() {
        let json = r#"[
            {"id": 7, "name": "First", "price": 10},
            {"id": 7, "name": "Second", "price": 20}
        ]"#;
        let catalog = parse_catalog(json).unwrap();
        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.find(7).unwrap().name, "First");
    }

    #[test]
    fn test_categories_and_filter() {
        let catalog = parse_catalog(MENU).unwrap();
        assert_eq!(catalog.categories(), vec!["tortas", "desayunos", "bebidas"]);
        assert_eq!(catalog.by_category(ALL_CATEGORIES).count(), 3);

        let drinks: Vec<&str> = catalog
            .by_category("bebidas")
            .map(|i| i.name.as_str())
            .collect();
        assert_eq!(drinks, vec!["Cafe de olla"]);
        assert_eq!(catalog.by_category("postres").count(), 0);
    }

    #[test]
    fn test_empty_array_is_an_empty_menu() {
        let catalog = parse_catalog("[]").unwrap();
        assert!(catalog.is_empty());
        assert!(catalog.categories().is_empty());
    }
}
