use core::fmt;

/// Top-left cell coordinate inside a grid. Signed so callers can probe
/// positions left of or above the origin; such positions are simply outside.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridPosition {
    pub x: i32,
    pub y: i32,
}

impl GridPosition {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Position offset by `(dx, dy)` cells, or `None` past the `i32` range.
    pub fn offset(self, dx: u32, dy: u32) -> Option<Self> {
        let x = i32::try_from(dx).ok().and_then(|dx| self.x.checked_add(dx))?;
        let y = i32::try_from(dy).ok().and_then(|dy| self.y.checked_add(dy))?;
        Some(Self { x, y })
    }
}

impl Default for GridPosition {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for GridPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rectangular cell extent of an item.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Footprint {
    pub width: u32,
    pub height: u32,
}

impl Footprint {
    pub const UNIT: Self = Self {
        width: 1,
        height: 1,
    };

    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Width and height swapped.
    #[must_use]
    pub const fn rotated(self) -> Self {
        Self {
            width: self.height,
            height: self.width,
        }
    }

    pub const fn is_square(self) -> bool {
        self.width == self.height
    }

    pub const fn area(self) -> u32 {
        self.width * self.height
    }
}

impl fmt::Display for Footprint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Fixed size of a grid in cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridDimensions {
    pub width: u32,
    pub height: u32,
}

impl GridDimensions {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub const fn cell_count(self) -> usize {
        self.width as usize * self.height as usize
    }

    pub fn contains(self, position: GridPosition) -> bool {
        position.x >= 0
            && position.y >= 0
            && (position.x as u32) < self.width
            && (position.y as u32) < self.height
    }

    /// Row-major index of `position`, or `None` when outside.
    pub fn index_of(self, position: GridPosition) -> Option<usize> {
        self.contains(position)
            .then(|| position.y as usize * self.width as usize + position.x as usize)
    }

    /// Each edge clamped into `1..=max_edge`.
    #[must_use]
    pub fn clamped(self, max_edge: u32) -> Self {
        Self {
            width: self.width.clamp(1, max_edge),
            height: self.height.clamp(1, max_edge),
        }
    }
}

impl fmt::Display for GridDimensions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}", self.width, self.height)
    }
}

/// Unique identifier of one item instance within a controller.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct InstanceId(pub u32);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic allocator for [`InstanceId`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct InstanceIds {
    next: u64,
}

impl InstanceIds {
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts allocation after `last`, used when resuming from existing ids.
    pub fn starting_after(last: InstanceId) -> Self {
        Self {
            next: u64::from(last.0) + 1,
        }
    }

    /// Next unused id, or `None` once the `u32` space is spent. Ids are
    /// never reused.
    pub fn allocate(&mut self) -> Option<InstanceId> {
        let raw = u32::try_from(self.next).ok()?;
        self.next += 1;
        Some(InstanceId(raw))
    }
}
