//! Inspect a saved layout file.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use inventory_content::{ContentFactory, LayoutLoader};
use inventory_core::{InventoryController, InventorySnapshot};

use crate::render::render_inventory;

/// Inspect a saved layout file
#[derive(Parser)]
pub struct Inspect {
    /// Layout file written by `simulate --save`
    #[arg(value_name = "LAYOUT")]
    layout: PathBuf,

    /// Content directory used to resolve item handles
    #[arg(short, long, value_name = "DIR", default_value = "content")]
    data_dir: PathBuf,

    /// Output format
    #[arg(short, long, value_enum, default_value = "summary")]
    format: OutputFormat,
}

#[derive(Clone, Copy, clap::ValueEnum)]
enum OutputFormat {
    /// Rendered grids with a legend
    Summary,
    /// Snapshot as JSON
    Json,
    /// Pretty-printed debug format
    Debug,
}

impl Inspect {
    pub fn execute(self) -> Result<()> {
        let factory = ContentFactory::new(&self.data_dir);
        let config = factory.load_config()?;
        let catalog = factory.load_catalog()?;

        let snapshot = LayoutLoader::load(&self.layout)?;
        let controller = InventoryController::restore(config, &snapshot, &catalog)
            .with_context(|| format!("Layout {} does not fit the current content", self.layout.display()))?;

        println!("{} {}", style("Layout:").bold().cyan(), self.layout.display());
        println!(
            "{} {}",
            style("Digest:").bold().cyan(),
            hex::encode(snapshot.digest().context("Failed to encode layout")?)
        );
        println!();

        match self.format {
            OutputFormat::Summary => print_summary(&controller),
            OutputFormat::Json => print_json(&snapshot)?,
            OutputFormat::Debug => println!("{:#?}", snapshot),
        }

        Ok(())
    }
}

fn print_summary(controller: &InventoryController) {
    println!("{}", style("=== Inventory Summary ===").bold().green());
    let primary = controller.primary();
    println!(
        "  Primary: {} ({} items, {} free cells)",
        primary.dimensions(),
        primary.len(),
        primary.free_cell_count()
    );
    if let Some(overflow) = controller.overflow() {
        println!(
            "  Overflow: {} ({} items, {} free cells)",
            overflow.dimensions(),
            overflow.len(),
            overflow.free_cell_count()
        );
    }
    println!("  Drag: {:?}", controller.drag_state());
    println!();
    print!("{}", render_inventory(controller));
}

fn print_json(snapshot: &InventorySnapshot) -> Result<()> {
    let json =
        serde_json::to_string_pretty(snapshot).context("Failed to serialize layout to JSON")?;
    println!("{}", json);
    Ok(())
}
