//! Command scripts.
//!
//! A script is a list of ticks, each a list of commands applied in order:
//!
//! ```ron
//! (
//!     ticks: [
//!         [AddItem(handle: (1), quantity: 3)],
//!         [PickUp(grid: Primary, position: (x: 0, y: 0)), RotateHeld],
//!     ],
//! )
//! ```

use std::path::Path;

use inventory_core::InventoryCommand;
use serde::{Deserialize, Serialize};

use crate::loaders::{LoadResult, read_file};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandScript {
    pub ticks: Vec<Vec<InventoryCommand>>,
}

impl CommandScript {
    pub fn command_count(&self) -> usize {
        self.ticks.iter().map(Vec::len).sum()
    }
}

/// Loader for command scripts from RON files.
pub struct ScriptLoader;

impl ScriptLoader {
    pub fn load(path: &Path) -> LoadResult<CommandScript> {
        let content = read_file(path)?;
        Self::parse(&content)
    }

    pub fn parse(content: &str) -> LoadResult<CommandScript> {
        ron::from_str(content).map_err(|e| anyhow::anyhow!("Failed to parse script RON: {}", e))
    }
}
