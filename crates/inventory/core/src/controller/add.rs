use super::{GridKind, InventoryController, ItemLocation, insertion_slot, merge_stacks};
use crate::catalog::{ItemDescriptor, ItemHandle};
use crate::state::{Grid, InstanceId, InstanceIds, ItemInstance};

/// Result of [`InventoryController::add_item`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AddOutcome {
    /// Last stack merged into or instance created, if any.
    pub instance: Option<ItemLocation>,
    /// Quantity that found no room. The caller decides its fate.
    pub remaining: u32,
}

impl AddOutcome {
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }
}

impl InventoryController {
    /// Adds `quantity` of `descriptor`.
    ///
    /// Existing stacks in the primary grid are topped up first; the rest is
    /// carved into new instances of at most `max_stack` each and placed at
    /// the first free slot (rotated when only the rotated footprint fits).
    /// With `allow_overflow`, whatever the primary grid cannot take goes
    /// through the same flow in the overflow grid, and new instances there
    /// become overflow members.
    pub fn add_item(
        &mut self,
        descriptor: ItemDescriptor,
        quantity: u32,
        allow_overflow: bool,
    ) -> AddOutcome {
        let mut outcome = AddOutcome {
            instance: None,
            remaining: quantity,
        };
        if quantity == 0 {
            return outcome;
        }

        fill(
            &mut self.primary,
            &mut self.ids,
            GridKind::Primary,
            &descriptor,
            &mut outcome,
        );

        if !outcome.is_complete() && allow_overflow {
            if let Some(overflow) = self.overflow.as_mut() {
                let created = fill(
                    &mut overflow.grid,
                    &mut self.ids,
                    GridKind::Overflow,
                    &descriptor,
                    &mut outcome,
                );
                overflow.members.extend(created);
            }
        }

        if outcome.is_complete() {
            tracing::debug!("added {} x{}", descriptor.handle(), quantity);
        } else {
            tracing::debug!(
                "added {} x{}; {} left unplaced",
                descriptor.handle(),
                quantity - outcome.remaining,
                outcome.remaining
            );
        }
        outcome
    }

    /// Removes `quantity` of `handle` from the primary or overflow grid.
    ///
    /// Best effort: returns `false` on a shortfall without restoring what was
    /// already removed.
    pub fn remove_item(&mut self, handle: ItemHandle, quantity: u32, from_overflow: bool) -> bool {
        if !from_overflow {
            return self.primary.remove_quantity(handle, quantity);
        }
        let held = self.held_id();
        match self.overflow.as_mut() {
            Some(overflow) => {
                let complete = overflow.grid.remove_quantity(handle, quantity);
                overflow.prune(held);
                complete
            }
            None => quantity == 0,
        }
    }
}

/// Runs the merge-then-insert flow against one grid. Returns the ids of
/// newly created instances.
fn fill(
    grid: &mut Grid,
    ids: &mut InstanceIds,
    kind: GridKind,
    descriptor: &ItemDescriptor,
    outcome: &mut AddOutcome,
) -> Vec<InstanceId> {
    let (absorbed, last) = merge_stacks(grid, descriptor.handle(), outcome.remaining);
    outcome.remaining -= absorbed;
    if let Some(target) = last {
        outcome.instance = Some(ItemLocation::new(kind, target));
    }

    let mut created = Vec::new();
    while outcome.remaining > 0 {
        let Some((position, rotated)) = insertion_slot(grid, descriptor) else {
            break;
        };
        let carved = outcome.remaining.min(u32::from(descriptor.max_stack())) as u16;
        let Some(id) = ids.allocate() else {
            tracing::warn!("instance ids exhausted; {} left unplaced", outcome.remaining);
            break;
        };
        let Some(mut instance) = ItemInstance::new(id, *descriptor, carved) else {
            break;
        };
        instance.set_rotated(rotated);
        if let Err(rejected) = grid.insert(instance, position) {
            tracing::warn!("free slot {} refused {}: {}", position, id, rejected.reason);
            break;
        }
        outcome.remaining -= u32::from(carved);
        outcome.instance = Some(ItemLocation::new(kind, id));
        created.push(id);
    }
    created
}
