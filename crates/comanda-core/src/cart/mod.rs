//! Cart module.
//!
//! Contains cart lines, the cart, its engine and cart stores.

mod cart;
mod engine;
mod line;
mod store;

pub use cart::Cart;
pub use engine::CartEngine;
pub use line::CartLine;
#[cfg(feature = "storage")]
pub use store::CacheCartStore;
pub use store::{CartStore, MemoryCartStore};
