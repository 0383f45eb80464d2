//! Command pipeline driven once per host tick.
//!
//! The [`InventoryEngine`] is the single entry point for scripted or
//! host-issued mutations of an [`InventoryController`]. Each command resolves
//! its descriptors through the injected catalog, runs against the
//! controller, and reports the events it produced together with the
//! [`InventoryChanges`] it caused.

mod command;
mod error;
mod event;
mod observer;

pub use command::InventoryCommand;
pub use error::CommandError;
pub use event::{InventoryChanges, InventoryEvent};
pub use observer::{InventoryObserver, ObserverId, ObserverList};

use crate::catalog::ItemCatalog;
use crate::controller::{InventoryController, ItemLocation, PlaceHeldOutcome};

/// Outcome of one successfully applied command.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CommandOutcome {
    pub changes: InventoryChanges,
    pub events: Vec<InventoryEvent>,
}

/// Everything one tick did, command by command.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TickReport {
    /// One entry per queued command, in order.
    pub outcomes: Vec<Result<CommandOutcome, CommandError>>,
    /// Union of the changes of all successful commands.
    pub changes: InventoryChanges,
}

impl TickReport {
    /// Events of the successful commands, in order.
    pub fn events(&self) -> impl Iterator<Item = &InventoryEvent> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.as_ref().ok())
            .flat_map(|outcome| outcome.events.iter())
    }

    pub fn failures(&self) -> impl Iterator<Item = &CommandError> {
        self.outcomes
            .iter()
            .filter_map(|outcome| outcome.as_ref().err())
    }
}

/// Applies [`InventoryCommand`]s to a borrowed controller.
pub struct InventoryEngine<'a> {
    controller: &'a mut InventoryController,
}

impl<'a> InventoryEngine<'a> {
    pub fn new(controller: &'a mut InventoryController) -> Self {
        Self { controller }
    }

    pub fn controller(&self) -> &InventoryController {
        self.controller
    }

    /// Applies a single command.
    ///
    /// A failed command leaves the controller untouched. The controller's
    /// nonce advances only on success.
    pub fn apply(
        &mut self,
        catalog: &dyn ItemCatalog,
        command: &InventoryCommand,
    ) -> Result<CommandOutcome, CommandError> {
        let before = self.controller.clone();
        let events = match self.dispatch(catalog, command) {
            Ok(events) => events,
            Err(error) => {
                *self.controller = before;
                return Err(error);
            }
        };
        self.controller.advance_nonce();

        let changes = InventoryChanges::between(&before, self.controller);
        tracing::debug!(
            "applied {} (nonce {}, changes {:?})",
            command.as_str(),
            self.controller.nonce(),
            changes
        );
        Ok(CommandOutcome { changes, events })
    }

    /// Processes one tick's queued commands in order.
    ///
    /// Failures are recorded in the report and do not stop the remaining
    /// commands.
    pub fn tick(&mut self, catalog: &dyn ItemCatalog, commands: &[InventoryCommand]) -> TickReport {
        let mut changes = InventoryChanges::empty();
        let outcomes = commands
            .iter()
            .map(|command| {
                let result = self.apply(catalog, command);
                match &result {
                    Ok(outcome) => changes |= outcome.changes,
                    Err(error) => tracing::warn!("{}", error),
                }
                result
            })
            .collect();
        TickReport { outcomes, changes }
    }

    fn dispatch(
        &mut self,
        catalog: &dyn ItemCatalog,
        command: &InventoryCommand,
    ) -> Result<Vec<InventoryEvent>, CommandError> {
        let name = command.as_str();
        let drag = |source| CommandError::Drag {
            command: name,
            source,
        };

        let event = match *command {
            InventoryCommand::AddItem {
                handle,
                quantity,
                allow_overflow,
            } => {
                let descriptor = catalog.require(handle).map_err(|source| CommandError::Catalog {
                    command: name,
                    source,
                })?;
                let outcome = self.controller.add_item(descriptor, quantity, allow_overflow);
                InventoryEvent::Added {
                    handle,
                    requested: quantity,
                    remaining: outcome.remaining,
                    last: outcome.instance,
                }
            }
            InventoryCommand::RemoveItem {
                handle,
                quantity,
                from_overflow,
            } => {
                let complete = self.controller.remove_item(handle, quantity, from_overflow);
                InventoryEvent::Removed {
                    handle,
                    requested: quantity,
                    complete,
                    from_overflow,
                }
            }
            InventoryCommand::PickUp { grid, position } => {
                let id = self.controller.pick_up(grid, position).map_err(drag)?;
                InventoryEvent::PickedUp {
                    location: ItemLocation::new(grid, id),
                }
            }
            InventoryCommand::PlaceHeld { grid, position } => {
                match self.controller.place_held(grid, position).map_err(drag)? {
                    PlaceHeldOutcome::Placed {
                        location,
                        displaced,
                    } => InventoryEvent::Placed {
                        location,
                        displaced,
                    },
                    PlaceHeldOutcome::MergedAway { target } => InventoryEvent::Merged {
                        target,
                        remaining: 0,
                    },
                    PlaceHeldOutcome::PartiallyMerged { target, remaining } => {
                        InventoryEvent::Merged { target, remaining }
                    }
                }
            }
            InventoryCommand::RotateHeld => {
                if !self.controller.rotate_held().map_err(drag)? {
                    return Ok(Vec::new());
                }
                let held = self
                    .controller
                    .held()
                    .map(|held| held.instance())
                    .ok_or(drag(crate::controller::DragError::NothingHeld))?;
                InventoryEvent::Rotated {
                    id: held.id(),
                    rotated: held.is_rotated(),
                }
            }
            InventoryCommand::CancelDrag => {
                let location = self.controller.cancel_drag().map_err(drag)?;
                InventoryEvent::Returned { location }
            }
        };
        Ok(vec![event])
    }
}
