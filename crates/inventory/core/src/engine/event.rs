use bitflags::bitflags;

use crate::catalog::ItemHandle;
use crate::controller::{InventoryController, ItemLocation};
use crate::state::InstanceId;

/// Observable result of one applied command.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryEvent {
    Added {
        handle: ItemHandle,
        requested: u32,
        remaining: u32,
        last: Option<ItemLocation>,
    },
    Removed {
        handle: ItemHandle,
        requested: u32,
        complete: bool,
        from_overflow: bool,
    },
    PickedUp {
        location: ItemLocation,
    },
    Placed {
        location: ItemLocation,
        displaced: Option<InstanceId>,
    },
    /// Held quantity merged into `target`; `remaining` is still held.
    Merged {
        target: ItemLocation,
        remaining: u16,
    },
    Rotated {
        id: InstanceId,
        rotated: bool,
    },
    Returned {
        location: ItemLocation,
    },
}

bitflags! {
    /// Tracks which parts of the inventory changed during a command.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
    #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
    pub struct InventoryChanges: u8 {
        const PRIMARY  = 1 << 0;
        const OVERFLOW = 1 << 1;
        const HELD     = 1 << 2;
    }
}

impl InventoryChanges {
    /// Compares two controller states.
    pub fn between(before: &InventoryController, after: &InventoryController) -> Self {
        let mut changes = Self::empty();
        if before.primary() != after.primary() {
            changes |= Self::PRIMARY;
        }
        if before.overflow() != after.overflow() {
            changes |= Self::OVERFLOW;
        }
        if before.held() != after.held() {
            changes |= Self::HELD;
        }
        changes
    }
}
