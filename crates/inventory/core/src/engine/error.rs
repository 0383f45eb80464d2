//! Command pipeline errors.

use crate::catalog::CatalogError;
use crate::controller::DragError;
use crate::error::{ErrorSeverity, InventoryError};

/// Errors surfaced while applying a command.
///
/// Capacity shortfalls are not errors: they are reported through the
/// `remaining`/`complete` fields of the emitted events.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum CommandError {
    #[error("{command} failed: {source}")]
    Catalog {
        command: &'static str,
        #[source]
        source: CatalogError,
    },

    #[error("{command} failed: {source}")]
    Drag {
        command: &'static str,
        #[source]
        source: DragError,
    },
}

impl CommandError {
    pub fn command(&self) -> &'static str {
        match self {
            Self::Catalog { command, .. } | Self::Drag { command, .. } => command,
        }
    }
}

impl InventoryError for CommandError {
    fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Catalog { source, .. } => source.severity(),
            Self::Drag { source, .. } => source.severity(),
        }
    }

    fn error_code(&self) -> &'static str {
        match self {
            Self::Catalog { source, .. } => source.error_code(),
            Self::Drag { source, .. } => source.error_code(),
        }
    }
}
