//! Drag session errors.

use super::GridKind;
use crate::error::{ErrorSeverity, InventoryError};
use crate::state::{GridPosition, InstanceId, PlacementError};

/// Reasons a drag gesture had no effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DragError {
    #[error("no item is held")]
    NothingHeld,

    #[error("{0} is already held")]
    AlreadyHolding(InstanceId),

    #[error("{grid} cell {position} is empty")]
    EmptyCell {
        grid: GridKind,
        position: GridPosition,
    },

    #[error("the {0} grid is not configured")]
    GridUnavailable(GridKind),

    #[error("{0} is not allowed in the overflow grid")]
    NotPermitted(InstanceId),

    #[error("placement refused: {0}")]
    Rejected(PlacementError),

    #[error("no room to return {0}")]
    NoRoom(InstanceId),
}

impl InventoryError for DragError {
    fn severity(&self) -> ErrorSeverity {
        use DragError::*;
        match self {
            NothingHeld | AlreadyHolding(_) | EmptyCell { .. } => ErrorSeverity::Recoverable,
            GridUnavailable(_) | NotPermitted(_) => ErrorSeverity::Validation,
            Rejected(reason) => reason.severity(),
            NoRoom(_) => ErrorSeverity::Recoverable,
        }
    }

    fn error_code(&self) -> &'static str {
        use DragError::*;
        match self {
            NothingHeld => "DRAG_NOTHING_HELD",
            AlreadyHolding(_) => "DRAG_ALREADY_HOLDING",
            EmptyCell { .. } => "DRAG_EMPTY_CELL",
            GridUnavailable(_) => "DRAG_GRID_UNAVAILABLE",
            NotPermitted(_) => "DRAG_NOT_PERMITTED",
            Rejected(reason) => reason.error_code(),
            NoRoom(_) => "DRAG_NO_ROOM",
        }
    }
}
