//! Replay a command script against a content directory.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use inventory_content::{ContentFactory, LayoutLoader};
use inventory_core::{
    InventoryController, InventoryEngine, InventoryError, InventoryEvent, ObserverList,
};

use crate::render::render_inventory;

/// Replay a command script tick by tick
#[derive(Parser)]
pub struct Simulate {
    /// Script name under `<data-dir>/scripts/` (without `.ron`)
    #[arg(value_name = "SCRIPT", default_value = "demo")]
    script: String,

    /// Content directory holding `items.ron`, `inventory.toml` and `scripts/`
    #[arg(short, long, value_name = "DIR", default_value = "content")]
    data_dir: PathBuf,

    /// Write the final layout to this RON file
    #[arg(short, long, value_name = "FILE")]
    save: Option<PathBuf>,

    /// Render the grids after every tick instead of only at the end
    #[arg(long)]
    each_tick: bool,
}

impl Simulate {
    pub fn execute(self) -> Result<()> {
        let factory = ContentFactory::new(&self.data_dir);
        let config = factory.load_config()?;
        let catalog = factory
            .load_catalog()
            .with_context(|| format!("Failed to load catalog from {}", self.data_dir.display()))?;
        let script = factory.load_script(&self.script)?;

        tracing::info!(
            "simulating {} ({} ticks, {} commands)",
            self.script,
            script.ticks.len(),
            script.command_count()
        );

        let mut controller = InventoryController::new(config);
        let mut failures = 0usize;
        {
            let mut observers = ObserverList::new();
            observers.subscribe(|event: &InventoryEvent| {
                println!("    {} {:?}", style("event").dim(), event)
            });

            let mut engine = InventoryEngine::new(&mut controller);
            for (index, tick) in script.ticks.iter().enumerate() {
                println!("{} {}", style("Tick").bold().cyan(), index);
                let report = engine.tick(&catalog, tick);
                for (command, outcome) in tick.iter().zip(&report.outcomes) {
                    match outcome {
                        Ok(outcome) => {
                            println!("  {} {:?}", style("ok").green(), command);
                            observers.notify(&outcome.events);
                        }
                        Err(error) => {
                            failures += 1;
                            println!(
                                "  {} {:?}: {} [{}]",
                                style("failed").red(),
                                command,
                                error,
                                error.error_code()
                            );
                        }
                    }
                }
                if self.each_tick {
                    print!("{}", render_inventory(engine.controller()));
                }
            }
        }

        println!();
        println!("{}", style("=== Final Inventory ===").bold().green());
        print!("{}", render_inventory(&controller));

        let snapshot = controller.snapshot();
        let digest = snapshot.digest().context("Failed to encode layout")?;
        println!(
            "{} {} ({} failed command(s))",
            style("Digest:").bold().cyan(),
            hex::encode(digest),
            failures
        );

        if let Some(path) = &self.save {
            LayoutLoader::save(path, &snapshot)?;
            println!("{} {}", style("Saved:").bold().cyan(), path.display());
        }

        Ok(())
    }
}
