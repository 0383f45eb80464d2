//! Fixed-size 2D slot table.
//!
//! A [`Grid`] is the authoritative occupancy map for one inventory region.
//! It owns every instance placed in it; each cell holds at most one
//! [`InstanceId`], and an instance's id fills exactly the cells of its
//! footprint anchored at its top-left position.
//!
//! All scans are row-major (`y` outer, `x` inner, top-left origin), so
//! free-slot search and identity lookups are deterministic for a given state.

mod error;

pub use error::{PlaceRejected, PlacementError};

use std::collections::BTreeMap;

use arrayvec::ArrayVec;

use super::{Footprint, GridDimensions, GridPosition, InstanceId, ItemInstance};
use crate::catalog::ItemHandle;

/// Distinct occupants found under a footprint.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Overlap {
    /// Every cell in range is empty.
    None,
    /// Exactly one instance occupies cells in range.
    Single(InstanceId),
    /// Two or more instances occupy cells in range.
    Multiple,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Grid {
    dimensions: GridDimensions,
    cells: Vec<Option<InstanceId>>,
    items: BTreeMap<InstanceId, ItemInstance>,
}

impl Grid {
    pub fn new(dimensions: GridDimensions) -> Self {
        Self {
            dimensions,
            cells: vec![None; dimensions.cell_count()],
            items: BTreeMap::new(),
        }
    }

    #[inline]
    pub fn dimensions(&self) -> GridDimensions {
        self.dimensions
    }

    /// Number of instances owned by the grid.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn free_cell_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    pub fn contains(&self, id: InstanceId) -> bool {
        self.items.contains_key(&id)
    }

    pub fn instance(&self, id: InstanceId) -> Option<&ItemInstance> {
        self.items.get(&id)
    }

    /// Id occupying `position`, or `None` for empty or out-of-range cells.
    pub fn occupant(&self, position: GridPosition) -> Option<InstanceId> {
        let index = self.dimensions.index_of(position)?;
        self.cells[index]
    }

    /// Instance occupying `position`.
    pub fn get_item(&self, position: GridPosition) -> Option<&ItemInstance> {
        self.items.get(&self.occupant(position)?)
    }

    /// Instances in row-major order of their top-left cell.
    pub fn items(&self) -> impl Iterator<Item = &ItemInstance> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter_map(move |(index, cell)| {
                let instance = self.items.get(cell.as_ref()?)?;
                let anchor = self.dimensions.index_of(instance.position()?)?;
                (anchor == index).then_some(instance)
            })
    }

    /// Cells currently holding `id`, row-major.
    pub fn cells_of(&self, id: InstanceId) -> Vec<GridPosition> {
        let width = self.dimensions.width as usize;
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| **cell == Some(id))
            .map(|(index, _)| GridPosition::new((index % width) as i32, (index / width) as i32))
            .collect()
    }

    pub fn is_inside_boundary(&self, position: GridPosition, size: Footprint) -> bool {
        position.x >= 0
            && position.y >= 0
            && i64::from(position.x) + i64::from(size.width) <= i64::from(self.dimensions.width)
            && i64::from(position.y) + i64::from(size.height) <= i64::from(self.dimensions.height)
    }

    /// Collects the distinct occupants under `size` anchored at `position`.
    /// Cells outside the table are ignored.
    pub fn find_overlap(&self, position: GridPosition, size: Footprint) -> Overlap {
        let mut seen: ArrayVec<InstanceId, 2> = ArrayVec::new();
        for index in footprint_indices(self.dimensions, position, size) {
            let Some(id) = self.cells[index] else {
                continue;
            };
            if seen.contains(&id) {
                continue;
            }
            seen.push(id);
            if seen.is_full() {
                return Overlap::Multiple;
            }
        }
        match seen.first() {
            Some(id) => Overlap::Single(*id),
            None => Overlap::None,
        }
    }

    /// Boundary and multi-occupant check only; whether a single overlap can
    /// merge or swap is decided by [`Grid::place`].
    pub fn can_place(&self, instance: &ItemInstance, position: GridPosition) -> bool {
        let size = instance.footprint();
        self.is_inside_boundary(position, size)
            && self.find_overlap(position, size) != Overlap::Multiple
    }

    /// Places `instance` with its top-left cell at `position`.
    ///
    /// A single same-identity occupant that is full is evicted and returned
    /// when the incoming stack still has headroom; every other overlap is
    /// refused (see [`PlacementError`]) and the instance is handed back with
    /// the grid unchanged.
    pub fn place(
        &mut self,
        instance: ItemInstance,
        position: GridPosition,
    ) -> Result<Option<ItemInstance>, PlaceRejected> {
        let size = instance.footprint();
        if !self.is_inside_boundary(position, size) {
            return Err(PlaceRejected::new(
                instance,
                PlacementError::OutOfBounds {
                    position,
                    footprint: size,
                },
            ));
        }

        let displaced = match self.find_overlap(position, size) {
            Overlap::None => None,
            Overlap::Multiple => {
                return Err(PlaceRejected::new(
                    instance,
                    PlacementError::MultipleOccupants { position },
                ));
            }
            Overlap::Single(occupant) => {
                let Some(existing) = self.items.get(&occupant) else {
                    return Err(PlaceRejected::new(
                        instance,
                        PlacementError::Desynchronized(occupant),
                    ));
                };
                let reason = if existing.handle() != instance.handle() {
                    Some(PlacementError::IdentityMismatch { occupant })
                } else if !existing.is_full() {
                    Some(PlacementError::Mergeable { target: occupant })
                } else if instance.is_full() {
                    Some(PlacementError::BothFull { occupant })
                } else {
                    None
                };
                if let Some(reason) = reason {
                    return Err(PlaceRejected::new(instance, reason));
                }
                self.remove(occupant)
            }
        };

        tracing::debug!(
            "placed {} ({}) at {} displacing {:?}",
            instance.id(),
            instance.handle(),
            position,
            displaced.as_ref().map(ItemInstance::id)
        );
        self.write(instance, position);
        Ok(displaced)
    }

    /// Places `instance` only if every target cell is empty.
    pub fn insert(
        &mut self,
        instance: ItemInstance,
        position: GridPosition,
    ) -> Result<(), PlaceRejected> {
        let size = instance.footprint();
        if !self.is_inside_boundary(position, size) {
            return Err(PlaceRejected::new(
                instance,
                PlacementError::OutOfBounds {
                    position,
                    footprint: size,
                },
            ));
        }
        match self.find_overlap(position, size) {
            Overlap::None => {
                self.write(instance, position);
                Ok(())
            }
            Overlap::Single(occupant) => Err(PlaceRejected::new(
                instance,
                PlacementError::Occupied { occupant },
            )),
            Overlap::Multiple => Err(PlaceRejected::new(
                instance,
                PlacementError::MultipleOccupants { position },
            )),
        }
    }

    /// Detaches `id` and clears its cells. Removing an absent id is a no-op.
    pub fn remove(&mut self, id: InstanceId) -> Option<ItemInstance> {
        let mut instance = self.items.remove(&id)?;
        if let Some(position) = instance.position() {
            for index in footprint_indices(self.dimensions, position, instance.footprint()) {
                if self.cells[index] == Some(id) {
                    self.cells[index] = None;
                }
            }
        }
        instance.set_position(None);
        Some(instance)
    }

    /// Detaches whatever occupies `position`; ownership moves to the caller.
    pub fn pick_up(&mut self, position: GridPosition) -> Option<ItemInstance> {
        let id = self.occupant(position)?;
        self.remove(id)
    }

    /// First top-left position, row-major, where `size` fits on empty cells.
    pub fn find_free_slot(&self, size: Footprint) -> Option<GridPosition> {
        if size.width == 0
            || size.height == 0
            || size.width > self.dimensions.width
            || size.height > self.dimensions.height
        {
            return None;
        }
        for y in 0..=(self.dimensions.height - size.height) {
            for x in 0..=(self.dimensions.width - size.width) {
                let position = GridPosition::new(x as i32, y as i32);
                if self.find_overlap(position, size) == Overlap::None {
                    return Some(position);
                }
            }
        }
        None
    }

    /// First instance of `handle` in row-major cell order, optionally only
    /// stacks with headroom.
    pub fn find_by_identity(
        &self,
        handle: ItemHandle,
        require_not_full: bool,
    ) -> Option<&ItemInstance> {
        self.cells
            .iter()
            .flatten()
            .filter_map(|id| self.items.get(id))
            .find(|item| item.handle() == handle && (!require_not_full || !item.is_full()))
    }

    /// Total quantity of `handle`, counting each instance once.
    pub fn count_by_identity(&self, handle: ItemHandle) -> u32 {
        self.items
            .values()
            .filter(|item| item.handle() == handle)
            .map(|item| u32::from(item.quantity()))
            .sum()
    }

    /// Drains `amount` of `handle` across instances in row-major order,
    /// dropping instances that reach zero.
    ///
    /// Returns `true` only if the full amount was removed. A shortfall is not
    /// rolled back.
    pub fn remove_quantity(&mut self, handle: ItemHandle, amount: u32) -> bool {
        let mut remaining = amount;
        while remaining > 0 {
            let Some(id) = self.find_by_identity(handle, false).map(ItemInstance::id) else {
                break;
            };
            let Some(instance) = self.items.get_mut(&id) else {
                break;
            };
            remaining -= u32::from(instance.drain(remaining));
            if instance.quantity() == 0 {
                self.remove(id);
            }
        }
        if remaining > 0 {
            tracing::debug!("removed {} of {}; {} short", amount - remaining, handle, remaining);
        }
        remaining == 0
    }

    /// Adds up to `amount` into the placed stack `id`. Returns the amount
    /// absorbed (zero for unknown ids or full stacks).
    pub fn merge_into(&mut self, id: InstanceId, amount: u32) -> u16 {
        self.items
            .get_mut(&id)
            .map_or(0, |instance| instance.absorb(amount))
    }

    fn write(&mut self, mut instance: ItemInstance, position: GridPosition) {
        let id = instance.id();
        debug_assert!(!self.items.contains_key(&id), "instance {id} placed twice");
        for index in footprint_indices(self.dimensions, position, instance.footprint()) {
            self.cells[index] = Some(id);
        }
        instance.set_position(Some(position));
        self.items.insert(id, instance);
    }
}

/// Row-major cell indices of a footprint, clipped to the table.
fn footprint_indices(
    dimensions: GridDimensions,
    position: GridPosition,
    size: Footprint,
) -> impl Iterator<Item = usize> {
    (0..size.height).flat_map(move |dy| {
        (0..size.width).filter_map(move |dx| {
            position
                .offset(dx, dy)
                .and_then(|cell| dimensions.index_of(cell))
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ItemDescriptor;

    fn descriptor(handle: u32, width: u32, height: u32, max_stack: u16) -> ItemDescriptor {
        ItemDescriptor::new(ItemHandle(handle), Footprint::new(width, height), max_stack).unwrap()
    }

    fn instance(id: u32, descriptor: ItemDescriptor, quantity: u16) -> ItemInstance {
        ItemInstance::new(InstanceId(id), descriptor, quantity).unwrap()
    }

    fn grid(width: u32, height: u32) -> Grid {
        Grid::new(GridDimensions::new(width, height))
    }

    #[test]
    fn boundary_check_covers_every_edge() {
        let grid = grid(4, 3);
        let size = Footprint::new(2, 2);

        assert!(grid.is_inside_boundary(GridPosition::new(0, 0), size));
        assert!(grid.is_inside_boundary(GridPosition::new(2, 1), size));
        assert!(!grid.is_inside_boundary(GridPosition::new(3, 0), size));
        assert!(!grid.is_inside_boundary(GridPosition::new(0, 2), size));
        assert!(!grid.is_inside_boundary(GridPosition::new(-1, 0), size));
        assert!(!grid.is_inside_boundary(GridPosition::new(0, -1), size));
    }

    #[test]
    fn placement_fills_exactly_the_footprint() {
        let mut grid = grid(5, 5);
        let item = instance(1, descriptor(1, 3, 2, 1), 1);

        assert_eq!(grid.place(item, GridPosition::new(1, 2)), Ok(None));

        let expected: Vec<_> = (2..4)
            .flat_map(|y| (1..4).map(move |x| GridPosition::new(x, y)))
            .collect();
        assert_eq!(grid.cells_of(InstanceId(1)), expected);
        assert_eq!(grid.free_cell_count(), 25 - 6);
        assert_eq!(
            grid.instance(InstanceId(1)).and_then(ItemInstance::position),
            Some(GridPosition::new(1, 2))
        );
    }

    #[test]
    fn out_of_bounds_placement_hands_instance_back() {
        let mut grid = grid(3, 3);
        let item = instance(1, descriptor(1, 2, 1, 1), 1);

        let rejected = grid.place(item.clone(), GridPosition::new(2, 0)).unwrap_err();

        assert_eq!(rejected.instance, item);
        assert!(matches!(rejected.reason, PlacementError::OutOfBounds { .. }));
        assert!(grid.is_empty());
    }

    #[test]
    fn find_overlap_distinguishes_single_and_multiple() {
        let mut grid = grid(4, 4);
        grid.place(instance(1, descriptor(1, 1, 1, 1), 1), GridPosition::new(0, 0))
            .unwrap();
        grid.place(instance(2, descriptor(2, 1, 1, 1), 1), GridPosition::new(1, 0))
            .unwrap();

        assert_eq!(
            grid.find_overlap(GridPosition::new(2, 0), Footprint::new(2, 2)),
            Overlap::None
        );
        assert_eq!(
            grid.find_overlap(GridPosition::new(0, 0), Footprint::new(1, 2)),
            Overlap::Single(InstanceId(1))
        );
        assert_eq!(
            grid.find_overlap(GridPosition::new(0, 0), Footprint::new(2, 1)),
            Overlap::Multiple
        );
    }

    #[test]
    fn multi_occupant_placement_leaves_grid_unchanged() {
        let mut grid = grid(4, 4);
        let a = descriptor(1, 1, 1, 1);
        grid.place(instance(1, a, 1), GridPosition::new(0, 0)).unwrap();
        grid.place(instance(2, a, 1), GridPosition::new(1, 0)).unwrap();
        let before = grid.clone();

        let rejected = grid
            .place(instance(3, descriptor(2, 2, 2, 1), 1), GridPosition::new(0, 0))
            .unwrap_err();

        assert!(matches!(
            rejected.reason,
            PlacementError::MultipleOccupants { .. }
        ));
        assert_eq!(grid, before);
        assert!(!grid.can_place(&rejected.instance, GridPosition::new(0, 0)));
    }

    #[test]
    fn single_overlap_outcomes_follow_identity_and_headroom() {
        let ammo = descriptor(7, 1, 1, 10);
        let mut grid = grid(2, 1);
        grid.place(instance(1, ammo, 4), GridPosition::new(0, 0)).unwrap();

        // Same identity with headroom: caller should merge.
        let rejected = grid
            .place(instance(2, ammo, 3), GridPosition::new(0, 0))
            .unwrap_err();
        assert_eq!(
            rejected.reason,
            PlacementError::Mergeable {
                target: InstanceId(1)
            }
        );

        // Both full: nothing to trade.
        grid.merge_into(InstanceId(1), 6);
        let rejected = grid
            .place(instance(3, ammo, 10), GridPosition::new(0, 0))
            .unwrap_err();
        assert_eq!(
            rejected.reason,
            PlacementError::BothFull {
                occupant: InstanceId(1)
            }
        );

        // Existing full, incoming partial: swap.
        let displaced = grid
            .place(instance(4, ammo, 2), GridPosition::new(0, 0))
            .unwrap()
            .expect("full stack is displaced");
        assert_eq!(displaced.id(), InstanceId(1));
        assert_eq!(displaced.position(), None);
        assert_eq!(grid.occupant(GridPosition::new(0, 0)), Some(InstanceId(4)));
        assert!(!grid.contains(InstanceId(1)));
    }

    #[test]
    fn pick_up_then_place_restores_slot_table() {
        let mut grid = grid(4, 4);
        grid.place(instance(1, descriptor(1, 2, 3, 1), 1), GridPosition::new(1, 1))
            .unwrap();
        grid.place(instance(2, descriptor(2, 1, 1, 5), 3), GridPosition::new(0, 0))
            .unwrap();
        let before = grid.clone();

        let held = grid.pick_up(GridPosition::new(2, 3)).unwrap();
        assert_eq!(held.position(), None);
        assert!(grid.cells_of(InstanceId(1)).is_empty());

        assert_eq!(grid.place(held, GridPosition::new(1, 1)), Ok(None));
        assert_eq!(grid, before);
    }

    #[test]
    fn remove_is_idempotent() {
        let mut grid = grid(3, 3);
        grid.place(instance(1, descriptor(1, 2, 2, 1), 1), GridPosition::ORIGIN)
            .unwrap();

        assert!(grid.remove(InstanceId(1)).is_some());
        let after_first = grid.clone();
        assert!(grid.remove(InstanceId(1)).is_none());
        assert_eq!(grid, after_first);
        assert_eq!(grid.free_cell_count(), 9);
    }

    #[test]
    fn queries_outside_the_table_are_empty() {
        let grid = grid(2, 2);
        assert_eq!(grid.get_item(GridPosition::new(-1, 0)), None);
        assert_eq!(grid.occupant(GridPosition::new(2, 2)), None);
        assert_eq!(grid.find_free_slot(Footprint::new(3, 1)), None);
    }

    #[test]
    fn free_slot_search_is_row_major() {
        let mut grid = grid(4, 3);
        let small = descriptor(1, 1, 1, 1);
        grid.place(instance(1, small, 1), GridPosition::new(0, 0)).unwrap();
        grid.place(instance(2, small, 1), GridPosition::new(3, 0)).unwrap();

        assert_eq!(
            grid.find_free_slot(Footprint::new(2, 1)),
            Some(GridPosition::new(1, 0))
        );
        assert_eq!(
            grid.find_free_slot(Footprint::new(2, 2)),
            Some(GridPosition::new(1, 0))
        );
        assert_eq!(
            grid.find_free_slot(Footprint::new(4, 1)),
            Some(GridPosition::new(0, 1))
        );
        assert_eq!(
            grid.find_free_slot(Footprint::new(4, 1)),
            grid.find_free_slot(Footprint::new(4, 1))
        );
    }

    #[test]
    fn identity_queries_scan_row_major() {
        let ammo = descriptor(3, 1, 1, 10);
        let mut grid = grid(3, 2);
        grid.place(instance(1, ammo, 10), GridPosition::new(2, 0)).unwrap();
        grid.place(instance(2, ammo, 4), GridPosition::new(0, 1)).unwrap();
        grid.place(instance(3, descriptor(9, 1, 1, 1), 1), GridPosition::new(0, 0))
            .unwrap();

        assert_eq!(
            grid.find_by_identity(ItemHandle(3), false).map(ItemInstance::id),
            Some(InstanceId(1))
        );
        assert_eq!(
            grid.find_by_identity(ItemHandle(3), true).map(ItemInstance::id),
            Some(InstanceId(2))
        );
        assert_eq!(grid.count_by_identity(ItemHandle(3)), 14);
        assert_eq!(grid.count_by_identity(ItemHandle(4)), 0);
    }

    #[test]
    fn count_by_identity_counts_large_items_once() {
        let plate = descriptor(5, 2, 2, 3);
        let mut grid = grid(4, 4);
        grid.place(instance(1, plate, 2), GridPosition::ORIGIN).unwrap();

        assert_eq!(grid.count_by_identity(ItemHandle(5)), 2);
    }

    #[test]
    fn remove_quantity_is_best_effort() {
        let ammo = descriptor(3, 1, 1, 10);
        let mut grid = grid(3, 1);
        grid.place(instance(1, ammo, 10), GridPosition::new(0, 0)).unwrap();
        grid.place(instance(2, ammo, 5), GridPosition::new(1, 0)).unwrap();

        assert!(grid.remove_quantity(ItemHandle(3), 12));
        assert!(!grid.contains(InstanceId(1)));
        assert_eq!(grid.instance(InstanceId(2)).map(ItemInstance::quantity), Some(3));

        assert!(!grid.remove_quantity(ItemHandle(3), 5));
        assert!(grid.is_empty());
        assert!(grid.remove_quantity(ItemHandle(3), 0));
    }

    #[test]
    fn items_iterate_by_top_left_cell() {
        let mut grid = grid(4, 4);
        grid.place(instance(1, descriptor(1, 2, 2, 1), 1), GridPosition::new(2, 1))
            .unwrap();
        grid.place(instance(2, descriptor(2, 1, 3, 1), 1), GridPosition::new(0, 1))
            .unwrap();
        grid.place(instance(3, descriptor(3, 1, 1, 1), 1), GridPosition::new(3, 0))
            .unwrap();

        let order: Vec<_> = grid.items().map(ItemInstance::id).collect();
        assert_eq!(order, vec![InstanceId(3), InstanceId(2), InstanceId(1)]);
    }
}
