//! Saved inventory layouts.

use std::path::Path;

use inventory_core::{InventoryConfig, InventoryController, InventorySnapshot, ItemCatalog};

use crate::loaders::{LoadResult, read_file, write_file};

/// Reads and writes [`InventorySnapshot`]s as RON.
pub struct LayoutLoader;

impl LayoutLoader {
    pub fn load(path: &Path) -> LoadResult<InventorySnapshot> {
        let content = read_file(path)?;
        ron::from_str(&content)
            .map_err(|e| anyhow::anyhow!("Failed to parse layout RON {}: {}", path.display(), e))
    }

    pub fn save(path: &Path, snapshot: &InventorySnapshot) -> LoadResult<()> {
        let pretty = ron::ser::PrettyConfig::new().depth_limit(4);
        let content = ron::ser::to_string_pretty(snapshot, pretty)
            .map_err(|e| anyhow::anyhow!("Failed to encode layout RON: {}", e))?;
        write_file(path, &content)
    }

    /// Load a layout and rebuild the controller it describes.
    pub fn restore(
        path: &Path,
        config: InventoryConfig,
        catalog: &dyn ItemCatalog,
    ) -> LoadResult<InventoryController> {
        let snapshot = Self::load(path)?;
        InventoryController::restore(config, &snapshot, catalog)
            .map_err(|e| anyhow::anyhow!("Failed to restore layout {}: {}", path.display(), e))
    }
}
