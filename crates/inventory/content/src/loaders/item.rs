//! Item catalog loader.

use std::path::Path;

use inventory_core::{CatalogSnapshot, ItemDescriptor};
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

/// Item catalog structure for RON files.
///
/// Descriptors are validated while parsing, so a zero footprint or stack
/// size fails the whole file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ItemCatalogFile {
    pub items: Vec<ItemDescriptor>,
}

/// Loader for item catalogs from RON files.
pub struct ItemLoader;

impl ItemLoader {
    /// Load the descriptors listed in a RON catalog.
    pub fn load(path: &Path) -> LoadResult<Vec<ItemDescriptor>> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    /// Load a catalog and index it for lookups. Duplicate handles are an error.
    pub fn load_snapshot(path: &Path) -> LoadResult<CatalogSnapshot> {
        let items = Self::load(path)?;
        CatalogSnapshot::new(items)
            .map_err(|e| anyhow::anyhow!("Invalid item catalog {}: {}", path.display(), e))
    }

    pub fn parse(content: &str) -> LoadResult<Vec<ItemDescriptor>> {
        let catalog: ItemCatalogFile = ron::from_str(content)
            .map_err(|e| anyhow::anyhow!("Failed to parse item catalog RON: {}", e))?;
        Ok(catalog.items)
    }
}
