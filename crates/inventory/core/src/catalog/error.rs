//! Catalog and descriptor errors.

use super::ItemHandle;
use crate::error::{ErrorSeverity, InventoryError};
use crate::state::Footprint;

/// Descriptor data that violates the footprint or stack invariants.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DescriptorError {
    #[error("{handle} has an empty footprint {footprint}")]
    EmptyFootprint {
        handle: ItemHandle,
        footprint: Footprint,
    },

    #[error("{0} has a max stack of zero")]
    ZeroStack(ItemHandle),
}

impl InventoryError for DescriptorError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyFootprint { .. } => "DESCRIPTOR_EMPTY_FOOTPRINT",
            Self::ZeroStack(_) => "DESCRIPTOR_ZERO_STACK",
        }
    }
}

/// Errors that occur when resolving descriptors through a catalog.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CatalogError {
    /// No descriptor is registered under the handle.
    #[error("descriptor {0} not found")]
    ItemNotFound(ItemHandle),

    /// Two descriptors share a handle.
    #[error("descriptor {0} is defined more than once")]
    DuplicateHandle(ItemHandle),
}

impl InventoryError for CatalogError {
    fn severity(&self) -> ErrorSeverity {
        ErrorSeverity::Validation
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::ItemNotFound(_) => "CATALOG_ITEM_NOT_FOUND",
            Self::DuplicateHandle(_) => "CATALOG_DUPLICATE_HANDLE",
        }
    }
}
