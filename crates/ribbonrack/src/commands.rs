#![forbid(unsafe_code)]

//! One-shot subcommands that print to a writer instead of the terminal UI.

use std::io::Write;

use rack_catalog::{ImageStore, PrecedenceCatalog};
use rack_core::Side;
use tracing::debug;

use crate::config::RackConfig;
use crate::error::Result;
use crate::rack::RackCells;
use crate::view::rack_lines;

/// Display columns per rack cell in headless output.
const CELL_WIDTH: usize = 24;

/// Branch names with their ribbon counts.
///
/// # Errors
///
/// Write failures.
pub fn branches(catalog: &PrecedenceCatalog, out: &mut impl Write) -> Result<()> {
    for branch in catalog.branches() {
        let count = catalog.load(branch)?.len();
        writeln!(out, "{branch}\t{count}")?;
    }
    Ok(())
}

/// The configured branch in precedence order.
///
/// # Errors
///
/// Unknown branch, or write failures.
pub fn precedence(
    catalog: &PrecedenceCatalog,
    config: &RackConfig,
    out: &mut impl Write,
) -> Result<()> {
    for item in catalog.load(&config.branch)? {
        writeln!(out, "{:>3}  {}", item.rank, item.name)?;
    }
    Ok(())
}

/// Select `names` from the configured branch and print the resulting rack,
/// followed by each cell's position and image file.
///
/// # Errors
///
/// Unknown branch, a name not in the catalog (or listed twice), or write
/// failures.
pub fn rack(
    catalog: &PrecedenceCatalog,
    config: &RackConfig,
    names: &[String],
    out: &mut impl Write,
) -> Result<()> {
    let mut engine = catalog.engine(&config.branch, config.grid)?;
    for name in names {
        engine.transfer(name, Side::Catalog)?;
    }
    debug!(
        target: "rack.app",
        branch = %config.branch,
        selected = engine.selected().len(),
        "headless rack built"
    );

    let layout = engine.layout(Side::Selected);
    let mut cells = RackCells::new(config.grid);
    cells.rebuild(&layout);
    for line in rack_lines(&cells, config.grid.width * CELL_WIDTH) {
        writeln!(out, "{}", line.trim_end())?;
    }

    let images = ImageStore::new(&config.image_dir);
    for placement in &layout {
        let image = images
            .find(&config.branch, &placement.item.name)
            .map_or_else(|| "missing".to_string(), |path| path.display().to_string());
        writeln!(
            out,
            "{}\t{}\t{}",
            placement.position, placement.item.name, image
        )?;
    }
    Ok(())
}
