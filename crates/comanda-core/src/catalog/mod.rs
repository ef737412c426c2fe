//! Menu catalog module.
//!
//! Contains the item shape, defensive parsing and catalog providers.

mod item;
mod provider;

pub use item::{parse_catalog, Catalog, CatalogItem, ItemOption, ALL_CATEGORIES};
pub use provider::{CatalogProvider, JsonFileCatalog, StaticCatalog};
