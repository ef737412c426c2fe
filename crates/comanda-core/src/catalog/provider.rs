//! Catalog providers.
//!
//! The menu is loaded once per session; this is the only asynchronous step
//! in the core.

use crate::catalog::{parse_catalog, Catalog, CatalogItem};
use crate::error::ComandaError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

/// Source of the menu.
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    /// Load the full catalog or fail with [`ComandaError::CatalogUnavailable`].
    async fn load(&self) -> Result<Catalog, ComandaError>;
}

/// Reads a JSON menu file from disk.
#[derive(Debug, Clone)]
pub struct JsonFileCatalog {
    path: PathBuf,
}

impl JsonFileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[async_trait]
impl CatalogProvider for JsonFileCatalog {
    async fn load(&self) -> Result<Catalog, ComandaError> {
        let content = tokio::fs::read_to_string(&self.path).await.map_err(|e| {
            ComandaError::CatalogUnavailable(format!("{}: {}", self.path.display(), e))
        })?;
        let catalog = parse_catalog(&content)?;
        tracing::info!(path = %self.path.display(), items = catalog.len(), "Catalog loaded");
        Ok(catalog)
    }
}

/// A fixed in-memory menu.
#[derive(Debug, Clone, Default)]
pub struct StaticCatalog {
    items: Vec<CatalogItem>,
}

impl StaticCatalog {
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }
}

#[async_trait]
impl CatalogProvider for StaticCatalog {
    async fn load(&self) -> Result<Catalog, ComandaError> {
        Ok(Catalog::new(self.items.clone()))
    }
}
