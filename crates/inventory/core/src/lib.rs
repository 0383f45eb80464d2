//! Deterministic grid inventory placement shared by hosts and tools.
//!
//! `inventory-core` defines the canonical placement rules (footprints,
//! stacking, overlap resolution, drag sessions) and exposes pure APIs that
//! a host application drives once per tick. All command-driven mutation
//! flows through [`engine::InventoryEngine`], which wraps the
//! [`controller::InventoryController`]; the [`state::Grid`] can also be used
//! on its own as a spatial allocator.
pub mod catalog;
pub mod config;
pub mod controller;
pub mod engine;
pub mod error;
pub mod state;

pub use catalog::{
    CatalogError, CatalogSnapshot, DescriptorError, ItemCatalog, ItemDescriptor, ItemHandle,
};
pub use config::InventoryConfig;
pub use controller::{
    AddOutcome, DragError, DragState, GridKind, HeldItem, HeldSnapshot, InventoryController,
    InventorySnapshot, ItemLocation, PlaceHeldOutcome,
};
pub use engine::{
    CommandError, CommandOutcome, InventoryChanges, InventoryCommand, InventoryEngine,
    InventoryEvent, InventoryObserver, ObserverId, ObserverList, TickReport,
};
pub use error::{ErrorSeverity, InventoryError};
pub use state::{
    Footprint, Grid, GridDimensions, GridPosition, GridSnapshot, InstanceId, InstanceIds,
    ItemInstance, Overlap, PlaceRejected, PlacedItem, PlacementError, RestoreError,
};
