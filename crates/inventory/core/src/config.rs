use crate::state::GridDimensions;

/// Inventory layout configuration passed to the controller at construction.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct InventoryConfig {
    /// Size of the main inventory grid in cells.
    pub primary: GridDimensions,
    /// Size of the restricted overflow grid. `None` disables overflow.
    pub overflow: Option<GridDimensions>,
    /// Pixel size of one cell, consumed by presentation layers only.
    pub tile_size: u32,
}

impl InventoryConfig {
    // ===== defaults =====
    pub const DEFAULT_PRIMARY_WIDTH: u32 = 8;
    pub const DEFAULT_PRIMARY_HEIGHT: u32 = 8;
    pub const DEFAULT_OVERFLOW_WIDTH: u32 = 4;
    pub const DEFAULT_OVERFLOW_HEIGHT: u32 = 4;
    pub const DEFAULT_TILE_SIZE: u32 = 64;

    /// Upper bound on either grid edge; keeps slot tables small and scans bounded.
    pub const MAX_GRID_EDGE: u32 = 256;

    pub fn new() -> Self {
        Self {
            primary: GridDimensions::new(Self::DEFAULT_PRIMARY_WIDTH, Self::DEFAULT_PRIMARY_HEIGHT),
            overflow: Some(GridDimensions::new(
                Self::DEFAULT_OVERFLOW_WIDTH,
                Self::DEFAULT_OVERFLOW_HEIGHT,
            )),
            tile_size: Self::DEFAULT_TILE_SIZE,
        }
    }

    /// Single grid without overflow.
    pub fn with_primary(primary: GridDimensions) -> Self {
        Self {
            primary,
            overflow: None,
            tile_size: Self::DEFAULT_TILE_SIZE,
        }
    }

    #[must_use]
    pub fn overflow(mut self, overflow: GridDimensions) -> Self {
        self.overflow = Some(overflow);
        self
    }

    /// Clamps grid edges into `1..=MAX_GRID_EDGE`.
    #[must_use]
    pub fn sanitized(mut self) -> Self {
        self.primary = self.primary.clamped(Self::MAX_GRID_EDGE);
        self.overflow = self.overflow.map(|dims| dims.clamped(Self::MAX_GRID_EDGE));
        self
    }
}

impl Default for InventoryConfig {
    fn default() -> Self {
        Self::new()
    }
}
