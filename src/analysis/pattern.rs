//! Canonical predecessor patterns used as statistical table keys

use ndarray::Array2;
use std::fmt;

use crate::spatial::{Kernel, TileGrid};

/// One cell of a predecessor pattern
///
/// Both sentinels are out of band, so no tile symbol can collide with them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PatternCell {
    /// The kernel does not condition on this offset
    Inactive,
    /// The kernel conditions on this offset but it lies outside the grid
    Outside,
    /// Tile observed at this offset
    Tile(char),
}

impl PatternCell {
    /// Symbol used when rendering patterns for diagnostics
    pub const fn symbol(self) -> char {
        match self {
            Self::Inactive => '.',
            Self::Outside => '#',
            Self::Tile(tile) => tile,
        }
    }
}

/// Snapshot of neighbor tiles sampled through a kernel at one position
///
/// Equality and hashing cover the dimensions and every cell, so patterns
/// taken at different positions or from different grids are the same key
/// whenever their content matches.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PredecessorPattern {
    cells: Array2<PatternCell>,
}

impl PredecessorPattern {
    /// Sample `grid` through `kernel` at `(row, col)`
    ///
    /// Active offset `(i, j)` reads `grid[row - i][col - j]` when that lies
    /// inside the grid and becomes [`PatternCell::Outside`] otherwise.
    /// Inactive offsets are always [`PatternCell::Inactive`].
    pub fn build(kernel: &Kernel, grid: &TileGrid, row: usize, col: usize) -> Self {
        let side = kernel.side();
        let mut cells = Array2::from_elem((side, side), PatternCell::Inactive);

        for (i, j) in kernel.active_offsets() {
            let source = row
                .checked_sub(i)
                .zip(col.checked_sub(j))
                .and_then(|(source_row, source_col)| grid.get(source_row, source_col));
            if let Some(cell) = cells.get_mut((i, j)) {
                *cell = source.map_or(PatternCell::Outside, PatternCell::Tile);
            }
        }

        Self { cells }
    }

    /// Side length, equal to the originating kernel's
    pub fn side(&self) -> usize {
        self.cells.nrows()
    }

    /// Cell at `(row, col)`, `None` outside the pattern
    pub fn cell(&self, row: usize, col: usize) -> Option<PatternCell> {
        self.cells.get((row, col)).copied()
    }

    /// Number of conditioned cells, which is the originating kernel's predecessor count
    pub fn order(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell != PatternCell::Inactive)
            .count()
    }

    /// Number of conditioned cells that fell outside the grid
    pub fn outside_count(&self) -> usize {
        self.cells
            .iter()
            .filter(|&&cell| cell == PatternCell::Outside)
            .count()
    }
}

impl fmt::Display for PredecessorPattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                write!(f, "{}", cell.symbol())?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
