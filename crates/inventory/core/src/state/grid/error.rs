//! Placement rejection reasons.

use crate::error::{ErrorSeverity, InventoryError};
use crate::state::{Footprint, GridPosition, InstanceId, ItemInstance};

/// Why a grid refused to write an instance.
///
/// None of these are faults: the caller decides whether to try another
/// position, merge, or leave the quantity unplaced.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlacementError {
    /// Footprint leaves the grid.
    #[error("footprint {footprint} at {position} is outside the grid")]
    OutOfBounds {
        position: GridPosition,
        footprint: Footprint,
    },

    /// Footprint touches two or more distinct instances.
    #[error("footprint at {position} overlaps more than one item")]
    MultipleOccupants { position: GridPosition },

    /// Footprint touches one instance of a different item.
    #[error("footprint overlaps {occupant}, which is a different item")]
    IdentityMismatch { occupant: InstanceId },

    /// Footprint touches a same-identity stack with headroom; merge instead.
    #[error("footprint overlaps stack {target}, which can absorb quantity")]
    Mergeable { target: InstanceId },

    /// Same identity, but neither side has headroom to trade.
    #[error("footprint overlaps {occupant}, and both stacks are full")]
    BothFull { occupant: InstanceId },

    /// Footprint touches an instance where only empty cells are accepted.
    #[error("footprint overlaps {occupant}")]
    Occupied { occupant: InstanceId },

    /// Slot table references an instance the grid does not own.
    #[error("slot table references unknown instance {0}")]
    Desynchronized(InstanceId),
}

impl InventoryError for PlacementError {
    fn severity(&self) -> ErrorSeverity {
        use PlacementError::*;
        match self {
            OutOfBounds { .. } | MultipleOccupants { .. } | IdentityMismatch { .. } => {
                ErrorSeverity::Recoverable
            }
            Mergeable { .. } | BothFull { .. } | Occupied { .. } => ErrorSeverity::Recoverable,
            Desynchronized(_) => ErrorSeverity::Internal,
        }
    }

    fn error_code(&self) -> &'static str {
        use PlacementError::*;
        match self {
            OutOfBounds { .. } => "PLACE_OUT_OF_BOUNDS",
            MultipleOccupants { .. } => "PLACE_MULTIPLE_OCCUPANTS",
            IdentityMismatch { .. } => "PLACE_IDENTITY_MISMATCH",
            Mergeable { .. } => "PLACE_MERGEABLE",
            BothFull { .. } => "PLACE_BOTH_FULL",
            Occupied { .. } => "PLACE_OCCUPIED",
            Desynchronized(_) => "PLACE_DESYNCHRONIZED",
        }
    }
}

/// A refused placement, handing the instance back to the caller untouched.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("cannot place {}: {reason}", .instance.id())]
pub struct PlaceRejected {
    pub instance: ItemInstance,
    pub reason: PlacementError,
}

impl PlaceRejected {
    pub fn new(instance: ItemInstance, reason: PlacementError) -> Self {
        Self { instance, reason }
    }

    pub fn into_instance(self) -> ItemInstance {
        self.instance
    }
}

impl InventoryError for PlaceRejected {
    fn severity(&self) -> ErrorSeverity {
        self.reason.severity()
    }

    fn error_code(&self) -> &'static str {
        self.reason.error_code()
    }
}
