//! CLI execution context.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context as _, Result};
use chrono::NaiveDateTime;
use comanda_core::cart::{CacheCartStore, CartEngine};
use comanda_core::catalog::JsonFileCatalog;
use comanda_core::checkout::WhatsAppLink;
use comanda_core::schedule::{Clock, FixedClock, LocalClock};
use comanda_core::StorefrontSession;

use crate::config::{ComandaConfig, CONFIG_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    /// CLI configuration.
    pub config: ComandaConfig,
    /// Output handler.
    pub output: Output,
    /// Working directory.
    pub cwd: PathBuf,
    /// Directory relative paths in the config resolve against.
    pub base_dir: PathBuf,
    /// Time override from `--at`.
    pub at: Option<NaiveDateTime>,
}

impl Context {
    /// Load context from config file.
    pub fn load(
        config_path: Option<&Path>,
        at: Option<NaiveDateTime>,
        output: Output,
    ) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, base_dir) = if let Some(path) = config_path {
            let config = ComandaConfig::load(path)?;
            (config, parent_dir(path, &cwd))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => {
                    output.debug(&format!("Using config {}", path.display()));
                    (config, parent_dir(&path, &cwd))
                }
                None => (ComandaConfig::default(), cwd.clone()),
            }
        };

        Ok(Self {
            config,
            output,
            cwd,
            base_dir,
            at,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(ComandaConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    if let Ok(config) = ComandaConfig::load(&config_path) {
                        return Some((config, config_path));
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Clock honouring the `--at` override.
    pub fn clock(&self) -> Arc<dyn Clock> {
        match self.at {
            Some(at) => Arc::new(FixedClock::new(at)),
            None => Arc::new(LocalClock),
        }
    }

    /// Menu file location.
    pub fn catalog_path(&self) -> PathBuf {
        self.resolve_path(&self.config.catalog.path)
    }

    /// Cart cache directory.
    pub fn cart_dir(&self) -> PathBuf {
        self.resolve_path(&self.config.cart.dir)
    }

    /// Build a session with the saved cart restored.
    ///
    /// The menu is loaded only when `with_catalog` is set.
    pub async fn session(&self, with_catalog: bool) -> Result<StorefrontSession> {
        let cart_dir = self.cart_dir();
        let store = CacheCartStore::open(&cart_dir, self.config.cart.key.clone())
            .with_context(|| format!("Failed to open cart store at {}", cart_dir.display()))?;

        let engine = CartEngine::new(self.config.hours, self.clock()).with_store(Box::new(store));
        let handoff = WhatsAppLink::new(self.config.handoff.base_url.clone());
        let mut session = StorefrontSession::new(
            engine,
            self.config.checkout.clone(),
            Box::new(handoff),
            self.config.handoff.destination.clone(),
        );

        if with_catalog {
            let path = self.catalog_path();
            session
                .load_catalog(&JsonFileCatalog::new(&path))
                .await
                .with_context(|| format!("Failed to load menu from {}", path.display()))?;
        }

        Ok(session)
    }

    /// Resolve a path relative to the config directory.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        if Path::new(path).is_absolute() {
            PathBuf::from(path)
        } else {
            self.base_dir.join(path)
        }
    }
}

fn parent_dir(path: &Path, cwd: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if parent.is_absolute() => parent.to_path_buf(),
        Some(parent) => cwd.join(parent),
        None => cwd.to_path_buf(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_config_walks_up() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(".comanda.toml"), "[store]\nname = \"Centro\"\n").unwrap();
        let nested = dir.path().join("a").join("b");
        std::fs::create_dir_all(&nested).unwrap();

        let (config, path) = Context::find_config(&nested).unwrap();
        assert_eq!(config.store.name, "Centro");
        assert_eq!(path, dir.path().join(".comanda.toml"));
    }

    #[test]
    fn test_paths_resolve_against_config_dir() {
        let dir = tempfile::tempdir().unwrap();
        let config_path = dir.path().join("comanda.toml");
        std::fs::write(&config_path, "[catalog]\npath = \"data/menu.json\"\n").unwrap();

        let ctx = Context::load(Some(&config_path), None, Output::new(false, true)).unwrap();
        assert_eq!(ctx.catalog_path(), dir.path().join("data").join("menu.json"));
        assert_eq!(ctx.cart_dir(), dir.path().join(".comanda"));
    }
}
