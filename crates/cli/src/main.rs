//! Command-line driver for the inventory engine.
//!
//! Replays command scripts against a content directory and inspects saved
//! layouts. Set `RUST_LOG=inventory_core=debug` to trace placement decisions.

mod commands;
mod render;

use anyhow::Result;
use clap::Parser;
use commands::{Inspect, Simulate};
use tracing_subscriber::EnvFilter;

/// Grid inventory simulator
#[derive(Parser)]
#[command(name = "inventory")]
#[command(about = "Run and inspect grid inventory sessions", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Parser)]
enum Command {
    /// Replay a command script tick by tick
    Simulate(Simulate),

    /// Inspect a saved layout file
    Inspect(Inspect),
}

fn main() -> Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Simulate(cmd) => cmd.execute(),
        Command::Inspect(cmd) => cmd.execute(),
    }
}
