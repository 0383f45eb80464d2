//! Whole-inventory snapshots.

use std::collections::BTreeSet;

use super::{GridKind, HeldItem, InventoryController, RestrictedGrid};
use crate::catalog::{ItemCatalog, ItemHandle};
use crate::config::InventoryConfig;
use crate::state::snapshot::restore_instance;
use crate::state::{Grid, GridPosition, GridSnapshot, InstanceIds, RestoreError};

/// Held item as `(identity, rotation, quantity)` plus its origin.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HeldSnapshot {
    pub handle: ItemHandle,
    pub rotated: bool,
    pub quantity: u16,
    pub origin_grid: GridKind,
    pub origin_position: GridPosition,
    pub origin_rotated: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InventorySnapshot {
    pub primary: GridSnapshot,
    #[cfg_attr(feature = "serde", serde(default))]
    pub overflow: Option<GridSnapshot>,
    #[cfg_attr(feature = "serde", serde(default))]
    pub held: Option<HeldSnapshot>,
}

impl InventorySnapshot {
    /// SHA-256 over the bincode encoding. Equal layouts give equal digests.
    #[cfg(feature = "serde")]
    pub fn digest(&self) -> Result<[u8; 32], bincode::Error> {
        use sha2::{Digest, Sha256};

        let bytes = bincode::serialize(self)?;
        Ok(Sha256::digest(&bytes).into())
    }
}

impl InventoryController {
    pub fn snapshot(&self) -> InventorySnapshot {
        InventorySnapshot {
            primary: self.primary.snapshot(),
            overflow: self.overflow().map(Grid::snapshot),
            held: self.held.as_ref().map(|held| HeldSnapshot {
                handle: held.instance.handle(),
                rotated: held.instance.is_rotated(),
                quantity: held.instance.quantity(),
                origin_grid: held.origin_grid,
                origin_position: held.origin_position,
                origin_rotated: held.origin_rotated,
            }),
        }
    }

    /// Rebuilds a controller from `snapshot` under `config`.
    ///
    /// Grid sizes must match the configuration. Everything restored into the
    /// overflow grid becomes an overflow member, as does a held item whose
    /// origin is the overflow grid.
    pub fn restore(
        config: InventoryConfig,
        snapshot: &InventorySnapshot,
        catalog: &dyn ItemCatalog,
    ) -> Result<Self, RestoreError> {
        let mut controller = Self::new(config);
        let mut ids = InstanceIds::new();

        ensure_dimensions(&controller.primary, &snapshot.primary)?;
        controller.primary = Grid::restore(&snapshot.primary, catalog, &mut ids)?;

        if let Some(saved) = &snapshot.overflow {
            let overflow = controller
                .overflow
                .as_mut()
                .ok_or(RestoreError::OverflowUnavailable)?;
            ensure_dimensions(&overflow.grid, saved)?;
            let grid = Grid::restore(saved, catalog, &mut ids)?;
            let members: BTreeSet<_> = grid.items().map(|item| item.id()).collect();
            *overflow = RestrictedGrid { grid, members };
        }

        if let Some(saved) = &snapshot.held {
            if saved.origin_grid == GridKind::Overflow && controller.overflow.is_none() {
                return Err(RestoreError::OverflowUnavailable);
            }
            let mut instance = restore_instance(saved.handle, saved.quantity, catalog, &mut ids)?;
            instance.set_rotated(saved.rotated);
            if saved.origin_grid == GridKind::Overflow {
                if let Some(overflow) = controller.overflow.as_mut() {
                    overflow.members.insert(instance.id());
                }
            }
            controller.held = Some(HeldItem {
                instance,
                origin_grid: saved.origin_grid,
                origin_position: saved.origin_position,
                origin_rotated: saved.origin_rotated,
            });
        }

        controller.ids = ids;
        tracing::debug!(
            "restored inventory: {} primary, {} overflow, held: {}",
            controller.primary.len(),
            controller.overflow().map_or(0, Grid::len),
            controller.held.is_some()
        );
        Ok(controller)
    }
}

fn ensure_dimensions(grid: &Grid, snapshot: &GridSnapshot) -> Result<(), RestoreError> {
    if grid.dimensions() != snapshot.dimensions {
        tracing::warn!(
            "snapshot grid {} does not match configured {}",
            snapshot.dimensions,
            grid.dimensions()
        );
        return Err(RestoreError::DimensionMismatch {
            expected: grid.dimensions(),
            found: snapshot.dimensions,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{CatalogSnapshot, ItemDescriptor};
    use crate::state::{Footprint, GridDimensions};

    fn catalog() -> CatalogSnapshot {
        CatalogSnapshot::new(vec![
            ItemDescriptor::new(ItemHandle(1), Footprint::new(2, 1), 1).unwrap(),
            ItemDescriptor::new(ItemHandle(2), Footprint::new(1, 1), 10).unwrap(),
        ])
        .unwrap()
    }

    fn config() -> InventoryConfig {
        InventoryConfig::with_primary(GridDimensions::new(3, 2)).overflow(GridDimensions::new(2, 1))
    }

    fn populated(catalog: &CatalogSnapshot) -> InventoryController {
        let mut inventory = InventoryController::new(config());
        let rifle = catalog.descriptor(ItemHandle(1)).unwrap();
        let ammo = catalog.descriptor(ItemHandle(2)).unwrap();
        inventory.add_item(rifle, 3, true);
        inventory.add_item(ammo, 17, true);
        inventory
            .pick_up(GridKind::Primary, GridPosition::new(0, 1))
            .unwrap();
        inventory.rotate_held().unwrap();
        inventory
    }

    #[test]
    fn round_trip_preserves_layout_and_membership() {
        let catalog = catalog();
        let inventory = populated(&catalog);
        let snapshot = inventory.snapshot();

        let restored = InventoryController::restore(config(), &snapshot, &catalog).unwrap();

        assert_eq!(restored.snapshot(), snapshot);
        let overflow = restored.overflow().unwrap();
        for item in overflow.items() {
            assert!(restored.is_overflow_member(item.id()));
        }
        assert_eq!(
            restored.count_item(ItemHandle(2)),
            inventory.count_item(ItemHandle(2))
        );
    }

    #[test]
    fn restore_rejects_mismatched_configuration() {
        let catalog = catalog();
        let snapshot = populated(&catalog).snapshot();

        let smaller = InventoryConfig::with_primary(GridDimensions::new(2, 2));
        assert!(matches!(
            InventoryController::restore(smaller, &snapshot, &catalog),
            Err(RestoreError::DimensionMismatch { .. })
        ));

        let no_overflow = InventoryConfig::with_primary(GridDimensions::new(3, 2));
        assert_eq!(
            InventoryController::restore(no_overflow, &snapshot, &catalog),
            Err(RestoreError::OverflowUnavailable)
        );
    }

    #[cfg(feature = "serde")]
    #[test]
    fn digest_tracks_layout_changes() {
        let catalog = catalog();
        let mut inventory = populated(&catalog);
        let before = inventory.snapshot().digest().unwrap();

        assert_eq!(before, inventory.clone().snapshot().digest().unwrap());
        inventory.cancel_drag().unwrap();
        let after = inventory.snapshot().digest().unwrap();
        assert_ne!(hex::encode(before), hex::encode(after));
    }
}
