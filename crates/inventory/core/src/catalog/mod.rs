//! Read-only item definitions.
//!
//! The catalog exposes static descriptor data (footprint, stack limit,
//! identity) keyed by [`ItemHandle`]. It is injected into the engine per call
//! so the core never reaches for a global registry.
mod descriptor;
mod error;
mod snapshot;

pub use descriptor::{DescriptorSpec, ItemDescriptor, ItemHandle};
pub use error::{CatalogError, DescriptorError};
pub use snapshot::CatalogSnapshot;

/// Lookup of item descriptors by handle.
pub trait ItemCatalog: Send + Sync {
    fn descriptor(&self, handle: ItemHandle) -> Option<ItemDescriptor>;

    /// Returns all descriptors known to this catalog.
    fn all_descriptors(&self) -> Vec<ItemDescriptor>;

    /// Returns the descriptor or a [`CatalogError::ItemNotFound`].
    fn require(&self, handle: ItemHandle) -> Result<ItemDescriptor, CatalogError> {
        self.descriptor(handle)
            .ok_or(CatalogError::ItemNotFound(handle))
    }
}
