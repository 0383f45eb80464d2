//! Inventory orchestration across a primary grid and an overflow grid.
//!
//! The [`InventoryController`] turns "add N of descriptor D" into concrete
//! placements (stacking before spatial insertion, rotation fallback, overflow
//! retry) and owns the single held item of a drag session.

mod add;
mod drag;
mod error;
mod snapshot;

pub use add::AddOutcome;
pub use drag::PlaceHeldOutcome;
pub use error::DragError;
pub use snapshot::{HeldSnapshot, InventorySnapshot};

use std::collections::BTreeSet;

use crate::catalog::{ItemDescriptor, ItemHandle};
use crate::config::InventoryConfig;
use crate::state::{Grid, GridPosition, InstanceId, InstanceIds, ItemInstance};

/// Which grid of the controller an operation targets.
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    strum::Display,
    strum::EnumString,
    strum::AsRefStr,
)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[strum(serialize_all = "snake_case", ascii_case_insensitive)]
pub enum GridKind {
    Primary,
    Overflow,
}

/// Where an instance lives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemLocation {
    pub grid: GridKind,
    pub id: InstanceId,
}

impl ItemLocation {
    pub fn new(grid: GridKind, id: InstanceId) -> Self {
        Self { grid, id }
    }
}

/// Whether a drag session is in progress.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DragState {
    Idle,
    Held,
}

/// The instance detached for a drag, with where it came from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HeldItem {
    instance: ItemInstance,
    origin_grid: GridKind,
    origin_position: GridPosition,
    origin_rotated: bool,
}

impl HeldItem {
    pub(crate) fn new(instance: ItemInstance, origin_grid: GridKind, origin_position: GridPosition) -> Self {
        let origin_rotated = instance.is_rotated();
        Self {
            instance,
            origin_grid,
            origin_position,
            origin_rotated,
        }
    }

    pub fn instance(&self) -> &ItemInstance {
        &self.instance
    }

    pub fn origin_grid(&self) -> GridKind {
        self.origin_grid
    }

    /// Top-left cell the instance occupied when it was picked up.
    pub fn origin_position(&self) -> GridPosition {
        self.origin_position
    }

    /// Rotation the instance had when it was picked up.
    pub fn origin_rotated(&self) -> bool {
        self.origin_rotated
    }
}

/// Overflow grid plus the set of instances allowed into it.
#[derive(Clone, Debug, PartialEq, Eq)]
struct RestrictedGrid {
    grid: Grid,
    members: BTreeSet<InstanceId>,
}

impl RestrictedGrid {
    fn new(grid: Grid) -> Self {
        Self {
            grid,
            members: BTreeSet::new(),
        }
    }

    /// Drops memberships of instances that no longer exist.
    fn prune(&mut self, held: Option<InstanceId>) {
        let grid = &self.grid;
        self.members
            .retain(|id| grid.contains(*id) || held == Some(*id));
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct InventoryController {
    config: InventoryConfig,
    primary: Grid,
    overflow: Option<RestrictedGrid>,
    held: Option<HeldItem>,
    ids: InstanceIds,
    nonce: u64,
}

impl InventoryController {
    pub fn new(config: InventoryConfig) -> Self {
        let config = config.sanitized();
        Self {
            primary: Grid::new(config.primary),
            overflow: config.overflow.map(|dims| RestrictedGrid::new(Grid::new(dims))),
            held: None,
            ids: InstanceIds::new(),
            nonce: 0,
            config,
        }
    }

    pub fn config(&self) -> &InventoryConfig {
        &self.config
    }

    pub fn primary(&self) -> &Grid {
        &self.primary
    }

    pub fn overflow(&self) -> Option<&Grid> {
        self.overflow.as_ref().map(|overflow| &overflow.grid)
    }

    pub fn grid(&self, kind: GridKind) -> Option<&Grid> {
        match kind {
            GridKind::Primary => Some(&self.primary),
            GridKind::Overflow => self.overflow(),
        }
    }

    /// Whether `id` may be placed into the overflow grid.
    pub fn is_overflow_member(&self, id: InstanceId) -> bool {
        self.overflow
            .as_ref()
            .is_some_and(|overflow| overflow.members.contains(&id))
    }

    pub fn held(&self) -> Option<&HeldItem> {
        self.held.as_ref()
    }

    pub fn drag_state(&self) -> DragState {
        if self.held.is_some() {
            DragState::Held
        } else {
            DragState::Idle
        }
    }

    /// Number of commands applied through the engine.
    pub fn nonce(&self) -> u64 {
        self.nonce
    }

    pub(crate) fn advance_nonce(&mut self) {
        self.nonce += 1;
    }

    /// Grid holding `id`, if it is placed.
    pub fn locate(&self, id: InstanceId) -> Option<ItemLocation> {
        if self.primary.contains(id) {
            return Some(ItemLocation::new(GridKind::Primary, id));
        }
        self.overflow()
            .filter(|grid| grid.contains(id))
            .map(|_| ItemLocation::new(GridKind::Overflow, id))
    }

    /// Total quantity of `handle` across both grids and the held slot.
    pub fn count_item(&self, handle: ItemHandle) -> u32 {
        let held = self
            .held
            .as_ref()
            .filter(|held| held.instance.handle() == handle)
            .map_or(0, |held| u32::from(held.instance.quantity()));
        self.primary.count_by_identity(handle)
            + self.overflow().map_or(0, |grid| grid.count_by_identity(handle))
            + held
    }

    fn held_id(&self) -> Option<InstanceId> {
        self.held.as_ref().map(|held| held.instance.id())
    }
}

/// Merges up to `amount` of `handle` into existing stacks with headroom,
/// row-major. Returns the absorbed total and the last stack touched.
fn merge_stacks(grid: &mut Grid, handle: ItemHandle, amount: u32) -> (u32, Option<InstanceId>) {
    let mut absorbed = 0;
    let mut last = None;
    while absorbed < amount {
        let Some(target) = grid.find_by_identity(handle, true).map(ItemInstance::id) else {
            break;
        };
        let merged = grid.merge_into(target, amount - absorbed);
        if merged == 0 {
            break;
        }
        absorbed += u32::from(merged);
        last = Some(target);
    }
    (absorbed, last)
}

/// First free slot for `descriptor`, trying the natural footprint and then,
/// for non-square items, the rotated one. The flag is `true` when rotated.
fn insertion_slot(grid: &Grid, descriptor: &ItemDescriptor) -> Option<(GridPosition, bool)> {
    let natural = descriptor.footprint();
    if let Some(position) = grid.find_free_slot(natural) {
        return Some((position, false));
    }
    if descriptor.is_symmetrical() {
        return None;
    }
    grid.find_free_slot(natural.rotated())
        .map(|position| (position, true))
}

/// Puts a free instance into `grid` by merging into stacks first and then
/// taking a free slot. On success returns the instance that received the
/// last of the quantity; on failure hands back whatever was not absorbed.
fn stow(grid: &mut Grid, mut instance: ItemInstance) -> Result<InstanceId, ItemInstance> {
    let (absorbed, last) = merge_stacks(grid, instance.handle(), u32::from(instance.quantity()));
    instance.drain(absorbed);
    if instance.quantity() == 0 {
        if let Some(target) = last {
            return Ok(target);
        }
    }

    let Some((position, rotated)) = insertion_slot(grid, instance.descriptor()) else {
        return Err(instance);
    };
    instance.set_rotated(rotated);
    let id = instance.id();
    grid.insert(instance, position)
        .map(|()| id)
        .map_err(|rejected| rejected.into_instance())
}
