//! Data-driven inventory content and loaders.
//!
//! This crate reads the files a host ships alongside the engine:
//! - Item catalogs (RON)
//! - Inventory configuration (TOML)
//! - Saved inventory layouts (RON)
//! - Command scripts replayed tick by tick (RON)
//!
//! Content is resolved into `inventory-core` types and never carries logic.

#[cfg(feature = "loaders")]
pub mod loaders;

#[cfg(feature = "loaders")]
pub use loaders::{
    CommandScript, ConfigLoader, ContentFactory, ItemLoader, LayoutLoader, LoadResult,
    ScriptLoader,
};
