//! Type-safe key/value cache for comanda.
//!
//! Stores JSON values as files in a directory so a visitor's cart survives
//! between runs, the way a browser keeps it in local storage.
//!
//! # Example
//!
//! ```rust,ignore
//! use comanda_cache::{Cache, Slot};
//!
//! let cache = Cache::open(".comanda")?;
//!
//! // Store, read and delete a value
//! cache.set("greeting", &"hola")?;
//! let greeting: Option<String> = cache.get("greeting")?;
//! cache.delete("greeting")?;
//!
//! // A versioned value under one fixed key
//! let slot = Slot::<Vec<u32>>::new(cache, "myRestaurantCart");
//! slot.save(&vec![1, 2])?;
//! ```

mod error;
mod kv;
mod slot;

pub use error::CacheError;
pub use kv::Cache;
pub use slot::{Slot, SlotData};

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::{Cache, CacheError, Slot, SlotData};
}
