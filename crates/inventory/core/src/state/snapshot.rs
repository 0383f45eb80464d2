//! Persistable layout snapshots.
//!
//! A grid is saved as its dimensions plus one [`PlacedItem`] per instance in
//! row-major order of the top-left cell. Instance ids are not persisted:
//! restoring allocates fresh ids and reproduces the same cell occupancy.

use super::{Grid, GridDimensions, GridPosition, InstanceIds, ItemInstance, PlacementError};
use crate::catalog::{CatalogError, ItemCatalog, ItemHandle};
use crate::error::{ErrorSeverity, InventoryError};

/// One placed instance as `(identity, position, rotation, quantity)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedItem {
    pub handle: ItemHandle,
    pub position: GridPosition,
    #[cfg_attr(feature = "serde", serde(default))]
    pub rotated: bool,
    pub quantity: u16,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridSnapshot {
    pub dimensions: GridDimensions,
    pub items: Vec<PlacedItem>,
}

impl GridSnapshot {
    pub fn empty(dimensions: GridDimensions) -> Self {
        Self {
            dimensions,
            items: Vec::new(),
        }
    }
}

/// Errors raised while rebuilding state from a snapshot.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RestoreError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error("{handle} cannot hold a quantity of {quantity}")]
    InvalidQuantity { handle: ItemHandle, quantity: u16 },

    #[error("{handle} cannot be restored at {position}: {reason}")]
    Rejected {
        handle: ItemHandle,
        position: GridPosition,
        reason: PlacementError,
    },

    #[error("snapshot grid is {found}, configuration expects {expected}")]
    DimensionMismatch {
        expected: GridDimensions,
        found: GridDimensions,
    },

    #[error("snapshot has an overflow grid, configuration has none")]
    OverflowUnavailable,

    #[error("instance ids exhausted")]
    IdsExhausted,
}

impl InventoryError for RestoreError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Catalog(error) => error.severity(),
            Self::IdsExhausted => ErrorSeverity::Fatal,
            _ => ErrorSeverity::Validation,
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Catalog(error) => error.error_code(),
            Self::InvalidQuantity { .. } => "RESTORE_INVALID_QUANTITY",
            Self::Rejected { .. } => "RESTORE_REJECTED",
            Self::DimensionMismatch { .. } => "RESTORE_DIMENSION_MISMATCH",
            Self::OverflowUnavailable => "RESTORE_OVERFLOW_UNAVAILABLE",
            Self::IdsExhausted => "RESTORE_IDS_EXHAUSTED",
        }
    }
}

impl Grid {
    pub fn snapshot(&self) -> GridSnapshot {
        GridSnapshot {
            dimensions: self.dimensions(),
            items: self
                .items()
                .filter_map(|item| {
                    Some(PlacedItem {
                        handle: item.handle(),
                        position: item.position()?,
                        rotated: item.is_rotated(),
                        quantity: item.quantity(),
                    })
                })
                .collect(),
        }
    }

    /// Rebuilds a grid, resolving descriptors through `catalog`.
    ///
    /// Every item must land on empty cells; overlapping entries are rejected
    /// rather than merged or swapped.
    pub fn restore(
        snapshot: &GridSnapshot,
        catalog: &dyn ItemCatalog,
        ids: &mut InstanceIds,
    ) -> Result<Self, RestoreError> {
        let mut grid = Grid::new(snapshot.dimensions);
        for placed in &snapshot.items {
            let mut instance = restore_instance(placed.handle, placed.quantity, catalog, ids)?;
            instance.set_rotated(placed.rotated);
            grid.insert(instance, placed.position)
                .map_err(|rejected| RestoreError::Rejected {
                    handle: placed.handle,
                    position: placed.position,
                    reason: rejected.reason,
                })?;
        }
        Ok(grid)
    }
}

pub(crate) fn restore_instance(
    handle: ItemHandle,
    quantity: u16,
    catalog: &dyn ItemCatalog,
    ids: &mut InstanceIds,
) -> Result<ItemInstance, RestoreError> {
    let descriptor = catalog.require(handle)?;
    let id = ids.allocate().ok_or(RestoreError::IdsExhausted)?;
    ItemInstance::new(id, descriptor, quantity)
        .ok_or(RestoreError::InvalidQuantity { handle, quantity })
}
