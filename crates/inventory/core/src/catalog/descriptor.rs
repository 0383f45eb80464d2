use core::fmt;

use super::DescriptorError;
use crate::state::Footprint;

/// Identity of an item definition. Two instances merge only when their
/// handles are equal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ItemHandle(pub u32);

impl fmt::Display for ItemHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "item:{}", self.0)
    }
}

/// Static definition shared by every instance of one kind of item.
///
/// # Stacking
///
/// Every descriptor has a `max_stack` of at least 1:
/// - Weapons, armour plates: `max_stack = 1` (never stack)
/// - Ammunition, consumables: `max_stack > 1`
///
/// Descriptors are validated on construction, so `footprint` is never zero
/// sized and `max_stack` is never zero.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(try_from = "DescriptorSpec"))]
pub struct ItemDescriptor {
    handle: ItemHandle,
    footprint: Footprint,
    max_stack: u16,
}

impl ItemDescriptor {
    pub fn new(
        handle: ItemHandle,
        footprint: Footprint,
        max_stack: u16,
    ) -> Result<Self, DescriptorError> {
        if footprint.width == 0 || footprint.height == 0 {
            return Err(DescriptorError::EmptyFootprint { handle, footprint });
        }
        if max_stack == 0 {
            return Err(DescriptorError::ZeroStack(handle));
        }
        Ok(Self {
            handle,
            footprint,
            max_stack,
        })
    }

    #[inline]
    pub fn handle(&self) -> ItemHandle {
        self.handle
    }

    /// Natural (unrotated) footprint.
    #[inline]
    pub fn footprint(&self) -> Footprint {
        self.footprint
    }

    #[inline]
    pub fn max_stack(&self) -> u16 {
        self.max_stack
    }

    #[inline]
    pub fn is_stackable(&self) -> bool {
        self.max_stack > 1
    }

    /// Square footprints are unaffected by rotation.
    #[inline]
    pub fn is_symmetrical(&self) -> bool {
        self.footprint.is_square()
    }
}

/// Unvalidated descriptor fields as they appear in content files.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct DescriptorSpec {
    pub handle: ItemHandle,
    pub footprint: Footprint,
    pub max_stack: u16,
}

impl TryFrom<DescriptorSpec> for ItemDescriptor {
    type Error = DescriptorError;

    fn try_from(spec: DescriptorSpec) -> Result<Self, Self::Error> {
        Self::new(spec.handle, spec.footprint, spec.max_stack)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_degenerate_descriptors() {
        let handle = ItemHandle(3);
        assert_eq!(
            ItemDescriptor::new(handle, Footprint::new(0, 2), 1),
            Err(DescriptorError::EmptyFootprint {
                handle,
                footprint: Footprint::new(0, 2)
            })
        );
        assert_eq!(
            ItemDescriptor::new(handle, Footprint::new(1, 1), 0),
            Err(DescriptorError::ZeroStack(handle))
        );
    }

    #[test]
    fn stackable_and_symmetry_flags() {
        let rifle = ItemDescriptor::new(ItemHandle(1), Footprint::new(4, 1), 1).unwrap();
        let ammo = ItemDescriptor::new(ItemHandle(2), Footprint::new(1, 1), 30).unwrap();

        assert!(!rifle.is_stackable());
        assert!(!rifle.is_symmetrical());
        assert!(ammo.is_stackable());
        assert!(ammo.is_symmetrical());
    }
}
