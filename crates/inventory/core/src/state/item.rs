//! Quantity-bearing instances of an item descriptor.

use super::{Footprint, GridPosition, InstanceId};
use crate::catalog::{ItemDescriptor, ItemHandle};

/// A placed or held quantity of one descriptor.
///
/// # Invariants
///
/// - `0 < quantity <= descriptor.max_stack()` whenever the instance is owned
///   by a grid or the held slot; an instance drained to zero is dropped
/// - `position` is `Some` exactly while a grid owns the instance
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ItemInstance {
    id: InstanceId,
    descriptor: ItemDescriptor,
    quantity: u16,
    rotated: bool,
    position: Option<GridPosition>,
}

impl ItemInstance {
    /// Creates an unplaced, unrotated instance.
    ///
    /// Returns `None` when `quantity` is zero or exceeds the stack limit.
    pub fn new(id: InstanceId, descriptor: ItemDescriptor, quantity: u16) -> Option<Self> {
        if quantity == 0 || quantity > descriptor.max_stack() {
            return None;
        }
        Some(Self {
            id,
            descriptor,
            quantity,
            rotated: false,
            position: None,
        })
    }

    #[inline]
    pub fn id(&self) -> InstanceId {
        self.id
    }

    #[inline]
    pub fn descriptor(&self) -> &ItemDescriptor {
        &self.descriptor
    }

    #[inline]
    pub fn handle(&self) -> ItemHandle {
        self.descriptor.handle()
    }

    #[inline]
    pub fn quantity(&self) -> u16 {
        self.quantity
    }

    #[inline]
    pub fn is_rotated(&self) -> bool {
        self.rotated
    }

    /// Top-left cell while placed; `None` while held.
    #[inline]
    pub fn position(&self) -> Option<GridPosition> {
        self.position
    }

    /// Footprint after rotation.
    pub fn footprint(&self) -> Footprint {
        let natural = self.descriptor.footprint();
        if self.rotated {
            natural.rotated()
        } else {
            natural
        }
    }

    /// Quantity that can still be merged into this stack.
    pub fn headroom(&self) -> u16 {
        self.descriptor.max_stack().saturating_sub(self.quantity)
    }

    pub fn is_full(&self) -> bool {
        self.headroom() == 0
    }

    /// Toggles rotation. Returns `false` (and does nothing) for square items.
    ///
    /// Only free instances can be rotated: grids hand out shared references,
    /// so a placed footprint never changes under the slot table.
    pub fn toggle_rotation(&mut self) -> bool {
        if self.descriptor.is_symmetrical() {
            return false;
        }
        self.rotated = !self.rotated;
        true
    }

    pub(crate) fn set_rotated(&mut self, rotated: bool) {
        self.rotated = rotated && !self.descriptor.is_symmetrical();
    }

    pub(crate) fn set_position(&mut self, position: Option<GridPosition>) {
        self.position = position;
    }

    /// Adds up to `amount`, bounded by headroom. Returns the amount absorbed.
    pub(crate) fn absorb(&mut self, amount: u32) -> u16 {
        let absorbed = amount.min(u32::from(self.headroom())) as u16;
        self.quantity += absorbed;
        absorbed
    }

    /// Removes up to `amount`. Returns the amount taken; the caller drops the
    /// instance once its quantity reaches zero.
    pub(crate) fn drain(&mut self, amount: u32) -> u16 {
        let taken = amount.min(u32::from(self.quantity)) as u16;
        self.quantity -= taken;
        taken
    }
}
