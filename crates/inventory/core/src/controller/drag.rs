//! Held-item drag session.
//!
//! `Idle → Held` on [`InventoryController::pick_up`]; a held item leaves the
//! session when it is placed, merged away, or returned by
//! [`InventoryController::cancel_drag`]. A partial merge or a refused
//! placement keeps it held.

use super::{
    DragError, GridKind, HeldItem, InventoryController, ItemLocation, stow,
};
use crate::state::{
    Grid, GridPosition, InstanceId, ItemInstance, Overlap, PlaceRejected, PlacementError,
};

/// How a held item left (or stayed in) the held slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PlaceHeldOutcome {
    /// Written into the grid. A displaced instance is now held.
    Placed {
        location: ItemLocation,
        displaced: Option<InstanceId>,
    },
    /// Entire quantity merged into an existing stack.
    MergedAway { target: ItemLocation },
    /// Stack capped out; `remaining` is still held.
    PartiallyMerged { target: ItemLocation, remaining: u16 },
}

impl InventoryController {
    /// Detaches the item under `position` and holds it.
    pub fn pick_up(&mut self, kind: GridKind, position: GridPosition) -> Result<InstanceId, DragError> {
        if let Some(held) = &self.held {
            return Err(DragError::AlreadyHolding(held.instance.id()));
        }
        let grid = self.grid_mut(kind).ok_or(DragError::GridUnavailable(kind))?;
        let empty = DragError::EmptyCell {
            grid: kind,
            position,
        };
        let origin = grid
            .get_item(position)
            .and_then(ItemInstance::position)
            .ok_or(empty)?;
        let instance = grid.pick_up(position).ok_or(empty)?;

        let id = instance.id();
        tracing::debug!("picked up {} from {} {}", id, kind, origin);
        self.held = Some(HeldItem::new(instance, kind, origin));
        Ok(id)
    }

    /// Places the held item with its top-left cell at `position`.
    ///
    /// A same-identity stack with headroom under the footprint absorbs the
    /// held quantity instead; whatever it cannot absorb stays held. Any other
    /// refusal leaves the held item untouched.
    pub fn place_held(
        &mut self,
        kind: GridKind,
        position: GridPosition,
    ) -> Result<PlaceHeldOutcome, DragError> {
        let Some(held) = self.held.take() else {
            return Err(DragError::NothingHeld);
        };
        let id = held.instance.id();
        if kind == GridKind::Overflow && self.overflow.is_some() && !self.is_overflow_member(id) {
            self.held = Some(held);
            return Err(DragError::NotPermitted(id));
        }
        let Some(grid) = self.grid_mut(kind) else {
            self.held = Some(held);
            return Err(DragError::GridUnavailable(kind));
        };

        let HeldItem {
            instance,
            origin_grid,
            origin_position,
            origin_rotated,
        } = held;
        let displaced_origin = grid
            .is_inside_boundary(position, instance.footprint())
            .then(|| single_occupant_position(grid, position, &instance))
            .flatten();

        let outcome = match grid.place(instance, position) {
            Ok(displaced) => {
                let displaced_id = displaced.as_ref().map(ItemInstance::id);
                if let Some(displaced) = displaced {
                    let origin = displaced_origin.unwrap_or(position);
                    self.held = Some(HeldItem::new(displaced, kind, origin));
                }
                tracing::debug!("placed held {} at {} {}", id, kind, position);
                PlaceHeldOutcome::Placed {
                    location: ItemLocation::new(kind, id),
                    displaced: displaced_id,
                }
            }
            Err(PlaceRejected {
                mut instance,
                reason: PlacementError::Mergeable { target },
            }) => {
                let absorbed = grid.merge_into(target, u32::from(instance.quantity()));
                instance.drain(u32::from(absorbed));
                let target = ItemLocation::new(kind, target);
                if instance.quantity() == 0 {
                    tracing::debug!("held {} merged into {}", id, target.id);
                    PlaceHeldOutcome::MergedAway { target }
                } else {
                    let remaining = instance.quantity();
                    self.held = Some(HeldItem {
                        instance,
                        origin_grid,
                        origin_position,
                        origin_rotated,
                    });
                    PlaceHeldOutcome::PartiallyMerged { target, remaining }
                }
            }
            Err(PlaceRejected { instance, reason }) => {
                self.held = Some(HeldItem {
                    instance,
                    origin_grid,
                    origin_position,
                    origin_rotated,
                });
                return Err(DragError::Rejected(reason));
            }
        };

        self.prune_overflow();
        Ok(outcome)
    }

    /// Toggles the held item's rotation. Returns `false` for square items.
    ///
    /// Whether the new footprint fits at the hover position is checked when
    /// the item is placed.
    pub fn rotate_held(&mut self) -> Result<bool, DragError> {
        let held = self.held.as_mut().ok_or(DragError::NothingHeld)?;
        Ok(held.instance.toggle_rotation())
    }

    /// Returns the held item to where it was picked up, with its original
    /// rotation. If that spot has been taken, the item is merged into stacks
    /// or moved to the first free slot of the same grid; if nothing fits it
    /// stays held.
    pub fn cancel_drag(&mut self) -> Result<ItemLocation, DragError> {
        let Some(held) = self.held.take() else {
            return Err(DragError::NothingHeld);
        };
        let HeldItem {
            mut instance,
            origin_grid,
            origin_position,
            origin_rotated,
        } = held;
        let id = instance.id();
        instance.set_rotated(origin_rotated);

        let Some(grid) = self.grid_mut(origin_grid) else {
            self.held = Some(HeldItem {
                instance,
                origin_grid,
                origin_position,
                origin_rotated,
            });
            return Err(DragError::GridUnavailable(origin_grid));
        };

        let returned = match grid.insert(instance, origin_position) {
            Ok(()) => Ok(id),
            Err(rejected) => {
                // Stow into a copy so a partial merge is not kept when no
                // slot is left for the remainder.
                let instance = rejected.into_instance();
                let mut scratch = grid.clone();
                match stow(&mut scratch, instance.clone()) {
                    Ok(target) => {
                        *grid = scratch;
                        Ok(target)
                    }
                    Err(_) => Err(instance),
                }
            }
        };
        match returned {
            Ok(target) => {
                self.prune_overflow();
                Ok(ItemLocation::new(origin_grid, target))
            }
            Err(instance) => {
                self.held = Some(HeldItem {
                    instance,
                    origin_grid,
                    origin_position,
                    origin_rotated,
                });
                Err(DragError::NoRoom(id))
            }
        }
    }

    fn grid_mut(&mut self, kind: GridKind) -> Option<&mut Grid> {
        match kind {
            GridKind::Primary => Some(&mut self.primary),
            GridKind::Overflow => self.overflow.as_mut().map(|overflow| &mut overflow.grid),
        }
    }

    fn prune_overflow(&mut self) {
        let held = self.held_id();
        if let Some(overflow) = self.overflow.as_mut() {
            overflow.prune(held);
        }
    }
}

/// Top-left cell of the lone instance under `instance`'s footprint.
fn single_occupant_position(
    grid: &Grid,
    position: GridPosition,
    instance: &ItemInstance,
) -> Option<GridPosition> {
    match grid.find_overlap(position, instance.footprint()) {
        Overlap::Single(occupant) => grid.instance(occupant).and_then(ItemInstance::position),
        Overlap::None | Overlap::Multiple => None,
    }
}
