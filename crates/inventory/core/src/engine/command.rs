use crate::catalog::ItemHandle;
use crate::controller::GridKind;
use crate::state::GridPosition;

/// One host-issued request against the inventory.
///
/// Commands reference items by handle; the engine resolves descriptors
/// through the catalog it is given, so scripted or networked input never
/// carries descriptor data.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum InventoryCommand {
    AddItem {
        handle: ItemHandle,
        quantity: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        allow_overflow: bool,
    },
    RemoveItem {
        handle: ItemHandle,
        quantity: u32,
        #[cfg_attr(feature = "serde", serde(default))]
        from_overflow: bool,
    },
    PickUp {
        grid: GridKind,
        position: GridPosition,
    },
    PlaceHeld {
        grid: GridKind,
        position: GridPosition,
    },
    RotateHeld,
    CancelDrag,
}

impl InventoryCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AddItem { .. } => "add_item",
            Self::RemoveItem { .. } => "remove_item",
            Self::PickUp { .. } => "pick_up",
            Self::PlaceHeld { .. } => "place_held",
            Self::RotateHeld => "rotate_held",
            Self::CancelDrag => "cancel_drag",
        }
    }
}
