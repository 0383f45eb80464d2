//! Content factory for loading everything a session needs from one directory.

use std::path::{Path, PathBuf};

use inventory_core::{CatalogSnapshot, InventoryConfig};

use crate::loaders::{CommandScript, ConfigLoader, ItemLoader, LoadResult, ScriptLoader};

/// Loads inventory content from a data directory.
///
/// # Directory Structure
///
/// ```text
/// data_dir/
/// ├── inventory.toml
/// ├── items.ron
/// └── scripts/
///     └── demo.ron
/// ```
pub struct ContentFactory {
    data_dir: PathBuf,
}

impl ContentFactory {
    pub fn new(data_dir: impl Into<PathBuf>) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    /// Load `inventory.toml`, or the defaults when the file is absent.
    pub fn load_config(&self) -> LoadResult<InventoryConfig> {
        let path = self.data_dir.join("inventory.toml");
        if !path.exists() {
            tracing::debug!("{} not found; using default config", path.display());
            return Ok(InventoryConfig::default());
        }
        ConfigLoader::load(&path)
    }

    /// Load and index `items.ron`.
    pub fn load_catalog(&self) -> LoadResult<CatalogSnapshot> {
        ItemLoader::load_snapshot(&self.data_dir.join("items.ron"))
    }

    /// Load `scripts/<name>.ron`.
    pub fn load_script(&self, name: &str) -> LoadResult<CommandScript> {
        let path = self.data_dir.join("scripts").join(format!("{name}.ron"));
        ScriptLoader::load(&path)
    }
}
