//! Marginal-count accumulation over training grids
//!
//! Every cell of every grid is observed once per sub-kernel of the family,
//! so each back-off level gets its own statistics. Accumulation is
//! commutative, which makes training across grids parallel by construction:
//! workers fill private tables that are merged afterwards.

use rayon::prelude::*;
use tracing::{debug, instrument};

use crate::analysis::marginals::MarginalsTable;
use crate::analysis::pattern::PredecessorPattern;
use crate::io::configuration::UNRESOLVED_TILE;
use crate::io::error::{MarkovError, Result};
use crate::spatial::{Kernel, TileGrid};

/// Work done by a training pass
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TrainingReport {
    /// Number of grids scanned
    pub grids: usize,
    /// Number of cells scanned across all grids
    pub cells: usize,
    /// Number of table increments performed
    pub observations: usize,
}

impl TrainingReport {
    /// Combine the work of two passes
    pub const fn absorb(self, other: Self) -> Self {
        Self {
            grids: self.grids + other.grids,
            cells: self.cells + other.cells,
            observations: self.observations + other.observations,
        }
    }
}

/// Record every cell of one grid under every sub-kernel of `family`
pub fn train_grid(table: &mut MarginalsTable, family: &[Kernel], grid: &TileGrid) -> TrainingReport {
    for ((row, col), &tile) in grid.tiles().indexed_iter() {
        for kernel in family {
            table.increment(PredecessorPattern::build(kernel, grid, row, col), tile);
        }
    }

    let cells = grid.rows() * grid.cols();
    TrainingReport {
        grids: 1,
        cells,
        observations: cells * family.len(),
    }
}

/// Train `table` on `grids` one after another
///
/// # Errors
///
/// Returns `EmptyTrainingSet` if `grids` is empty, or `ReservedTile` if a grid
/// holds `UNRESOLVED_TILE`
#[instrument(skip_all, fields(grids = grids.len(), sub_kernels = family.len()))]
pub fn train(
    table: &mut MarginalsTable,
    family: &[Kernel],
    grids: &[TileGrid],
) -> Result<TrainingReport> {
    if grids.is_empty() {
        return Err(MarkovError::EmptyTrainingSet);
    }
    check_reserved_tiles(grids)?;

    let report = grids.iter().fold(TrainingReport::default(), |report, grid| {
        report.absorb(train_grid(table, family, grid))
    });

    debug!(
        cells = report.cells,
        observations = report.observations,
        patterns = table.len(),
        "training finished"
    );
    Ok(report)
}

/// Train `table` on `grids` with one worker table per grid
///
/// Worker tables are merged in grid order, so the result, including the
/// first-observed order of tiles, equals that of [`train`].
///
/// # Errors
///
/// Returns `EmptyTrainingSet` if `grids` is empty, or `ReservedTile` if a grid
/// holds `UNRESOLVED_TILE`
#[instrument(skip_all, fields(grids = grids.len(), sub_kernels = family.len()))]
pub fn train_parallel(
    table: &mut MarginalsTable,
    family: &[Kernel],
    grids: &[TileGrid],
) -> Result<TrainingReport> {
    if grids.is_empty() {
        return Err(MarkovError::EmptyTrainingSet);
    }
    check_reserved_tiles(grids)?;

    let (trained, report) = grids
        .par_iter()
        .map(|grid| {
            let mut worker_table = MarginalsTable::new();
            let report = train_grid(&mut worker_table, family, grid);
            (worker_table, report)
        })
        .reduce(
            || (MarginalsTable::new(), TrainingReport::default()),
            |(mut left, left_report), (right, right_report)| {
                left.merge(right);
                (left, left_report.absorb(right_report))
            },
        );
    table.merge(trained);

    debug!(
        cells = report.cells,
        observations = report.observations,
        patterns = table.len(),
        "parallel training finished"
    );
    Ok(report)
}

// Generated output uses the unresolved tile as a marker, so it cannot be learned
fn check_reserved_tiles(grids: &[TileGrid]) -> Result<()> {
    for (grid, map) in grids.iter().enumerate() {
        if let Some(((row, col), &tile)) = map
            .tiles()
            .indexed_iter()
            .find(|&(_, &cell)| cell == UNRESOLVED_TILE)
        {
            return Err(MarkovError::ReservedTile {
                grid,
                row,
                col,
                tile,
            });
        }
    }
    Ok(())
}
