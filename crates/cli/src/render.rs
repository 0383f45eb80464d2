//! Plain-text rendering of grids.

use inventory_core::{Grid, GridPosition, InstanceId, InventoryController};

const EMPTY: char = '.';
const GLYPHS: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789";

/// One character per cell; each instance gets a stable glyph from its id.
pub fn render_ascii(grid: &Grid) -> String {
    let dims = grid.dimensions();
    let mut out = String::with_capacity((dims.width as usize + 1) * dims.height as usize);
    for y in 0..dims.height as i32 {
        for x in 0..dims.width as i32 {
            let cell = grid
                .occupant(GridPosition::new(x, y))
                .map_or(EMPTY, glyph);
            out.push(cell);
        }
        out.push('\n');
    }
    out
}

pub fn glyph(id: InstanceId) -> char {
    char::from(GLYPHS[id.0 as usize % GLYPHS.len()])
}

/// Legend lines: glyph, id, handle, quantity, top-left, rotation.
pub fn legend(grid: &Grid) -> Vec<String> {
    grid.items()
        .map(|item| {
            let position = item
                .position()
                .map_or_else(|| "-".to_string(), |position| position.to_string());
            format!(
                "{} {} {} x{} at {}{}",
                glyph(item.id()),
                item.id(),
                item.handle(),
                item.quantity(),
                position,
                if item.is_rotated() { " (rotated)" } else { "" }
            )
        })
        .collect()
}

/// Renders both grids and the held item.
pub fn render_inventory(controller: &InventoryController) -> String {
    let mut out = String::new();
    out.push_str("primary:\n");
    out.push_str(&render_ascii(controller.primary()));
    for line in legend(controller.primary()) {
        out.push_str(&format!("  {line}\n"));
    }
    if let Some(overflow) = controller.overflow() {
        out.push_str("overflow:\n");
        out.push_str(&render_ascii(overflow));
        for line in legend(overflow) {
            out.push_str(&format!("  {line}\n"));
        }
    }
    if let Some(held) = controller.held() {
        let instance = held.instance();
        out.push_str(&format!(
            "held: {} {} x{} {} from {} {}\n",
            instance.id(),
            instance.handle(),
            instance.quantity(),
            instance.footprint(),
            held.origin_grid(),
            held.origin_position()
        ));
    }
    out
}
