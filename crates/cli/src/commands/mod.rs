//! Subcommand implementations.
//!
//! Each command owns its CLI args and execution logic.

mod inspect;
mod simulate;

pub use inspect::Inspect;
pub use simulate::Simulate;
