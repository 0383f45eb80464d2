//! Inventory state: coordinates, item instances, grids and snapshots.
pub mod common;
pub mod grid;
pub mod item;
pub mod snapshot;

pub use common::{Footprint, GridDimensions, GridPosition, InstanceId, InstanceIds};
pub use grid::{Grid, Overlap, PlaceRejected, PlacementError};
pub use item::ItemInstance;
pub use snapshot::{GridSnapshot, PlacedItem, RestoreError};
