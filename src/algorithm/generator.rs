//! Back-off sampling of new grids from a trained table
//!
//! Cells are filled strictly in row-major order. A causal kernel only
//! references offsets above or to the left, so every predecessor read while
//! generating a cell has already been written.

use tracing::{instrument, warn};

use crate::algorithm::selection::{TileDraw, sample_tile};
use crate::analysis::marginals::MarginalsTable;
use crate::analysis::pattern::PredecessorPattern;
use crate::io::configuration::{MAX_GRID_DIMENSION, UNRESOLVED_TILE};
use crate::io::error::{Result, invalid_parameter};
use crate::spatial::{Kernel, TileGrid};

/// Result of one generation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Generation {
    /// Generated grid
    pub grid: TileGrid,
    /// Cells for which no sub-kernel had statistics, filled with `UNRESOLVED_TILE`
    pub unresolved: usize,
    /// Resolved cells per back-off rank (index 0 is the full kernel)
    pub fallbacks: Vec<usize>,
}

impl Generation {
    /// Whether every cell was drawn from trained statistics
    pub const fn is_complete(&self) -> bool {
        self.unresolved == 0
    }
}

/// Check requested output dimensions
///
/// # Errors
///
/// Returns an error if either dimension is zero or exceeds `MAX_GRID_DIMENSION`
pub fn validate_dimensions(width: usize, height: usize) -> Result<()> {
    for (parameter, value) in [("width", width), ("height", height)] {
        if value == 0 {
            return Err(invalid_parameter(parameter, &value, &"must be positive"));
        }
        if value > MAX_GRID_DIMENSION {
            return Err(invalid_parameter(
                parameter,
                &value,
                &format!("must not exceed {MAX_GRID_DIMENSION}"),
            ));
        }
    }
    Ok(())
}

/// Generate a `height` x `width` grid
///
/// # Errors
///
/// Returns an error if the dimensions are invalid
pub fn generate<D: TileDraw + ?Sized>(
    table: &MarginalsTable,
    family: &[Kernel],
    width: usize,
    height: usize,
    draw: &mut D,
) -> Result<Generation> {
    generate_with_progress(table, family, width, height, draw, |_| {})
}

/// Generate a grid, reporting the number of completed rows after each row
///
/// # Errors
///
/// Returns an error if the dimensions are invalid
#[instrument(skip(table, family, draw, on_row), fields(sub_kernels = family.len()))]
pub fn generate_with_progress<D, F>(
    table: &MarginalsTable,
    family: &[Kernel],
    width: usize,
    height: usize,
    draw: &mut D,
    mut on_row: F,
) -> Result<Generation>
where
    D: TileDraw + ?Sized,
    F: FnMut(usize),
{
    validate_dimensions(width, height)?;

    let mut grid = TileGrid::filled(height, width, UNRESOLVED_TILE);
    let mut unresolved = 0;
    let mut fallbacks = vec![0; family.len()];

    for row in 0..height {
        for col in 0..width {
            let tile = if let Some((rank, tile)) = next_tile(table, family, &grid, row, col, draw)
            {
                if let Some(count) = fallbacks.get_mut(rank) {
                    *count += 1;
                }
                tile
            } else {
                unresolved += 1;
                UNRESOLVED_TILE
            };
            grid.set(row, col, tile);
        }
        on_row(row + 1);
    }

    if unresolved > 0 {
        warn!(
            unresolved,
            cells = width * height,
            "cells left unresolved, the table has no statistics for the unconditional kernel"
        );
    }

    Ok(Generation {
        grid,
        unresolved,
        fallbacks,
    })
}

/// Draw the tile for `(row, col)` from the most specific known context
///
/// Tries `family` in order and samples from the first sub-kernel whose
/// pattern at this position has statistics. Returns the rank of that
/// sub-kernel with the tile, or `None` when nothing matched.
pub fn next_tile<D: TileDraw + ?Sized>(
    table: &MarginalsTable,
    family: &[Kernel],
    grid: &TileGrid,
    row: usize,
    col: usize,
    draw: &mut D,
) -> Option<(usize, char)> {
    family.iter().enumerate().find_map(|(rank, kernel)| {
        let counts = table.get(&PredecessorPattern::build(kernel, grid, row, col))?;
        sample_tile(counts, draw).map(|tile| (rank, tile))
    })
}
