use rayon::prelude::*;
use std::sync::Arc;
use tracing::{debug, info};

use crate::algorithm::cache::SubKernelCache;
use crate::algorithm::decomposition::sub_kernels;
use crate::algorithm::generator::{self, Generation};
use crate::algorithm::selection::{RandomSelector, TileDraw};
use crate::algorithm::trainer::{self, TrainingReport};
use crate::analysis::marginals::MarginalsTable;
use crate::analysis::statistics::ModelSummary;
use crate::io::error::{MarkovError, Result, WithContext};
use crate::spatial::{Kernel, TileGrid};

/// Trained variable-order Markov field
///
/// Bundles the configured kernel, its back-off family and the table trained
/// with that family. The chain is immutable after training and can be shared
/// across threads for concurrent generation.
#[derive(Debug, Clone)]
pub struct MarkovChain {
    kernel: Kernel,
    family: Arc<[Kernel]>,
    table: MarginalsTable,
    report: TrainingReport,
}

impl MarkovChain {
    /// Train a chain on `grids` sequentially
    ///
    /// # Errors
    ///
    /// Returns `EmptyTrainingSet` if `grids` is empty, or `ReservedTile` if a
    /// grid holds the unresolved tile
    pub fn train(kernel: Kernel, grids: &[TileGrid], cache: &mut SubKernelCache) -> Result<Self> {
        Self::build(kernel, grids, cache, false)
    }

    /// Train a chain with one worker per grid
    ///
    /// Produces the same table as [`MarkovChain::train`].
    ///
    /// # Errors
    ///
    /// Returns `EmptyTrainingSet` if `grids` is empty, or `ReservedTile` if a
    /// grid holds the unresolved tile
    pub fn train_parallel(
        kernel: Kernel,
        grids: &[TileGrid],
        cache: &mut SubKernelCache,
    ) -> Result<Self> {
        Self::build(kernel, grids, cache, true)
    }

    /// Parse raw maps and train a chain on them
    ///
    /// # Errors
    ///
    /// Returns an error if no map is given, a map is empty or jagged, or a map
    /// holds the unresolved tile; grid errors carry the index of the offending map
    pub fn from_texts<S: AsRef<str>>(
        kernel: Kernel,
        maps: &[S],
        cache: &mut SubKernelCache,
    ) -> Result<Self> {
        let grids = maps
            .iter()
            .enumerate()
            .map(|(index, text)| TileGrid::parse(text.as_ref()).with_grid(index))
            .collect::<Result<Vec<_>>>()?;
        Self::train(kernel, &grids, cache)
    }

    fn build(
        kernel: Kernel,
        grids: &[TileGrid],
        cache: &mut SubKernelCache,
        parallel: bool,
    ) -> Result<Self> {
        if grids.is_empty() {
            return Err(MarkovError::EmptyTrainingSet);
        }

        let family = sub_kernels(&kernel, cache);
        debug!(
            predecessors = kernel.predecessor_count(),
            sub_kernels = family.len(),
            cache_hits = cache.stats.hits,
            cache_misses = cache.stats.misses,
            "kernel decomposed"
        );

        let mut table = MarginalsTable::new();
        let report = if parallel {
            trainer::train_parallel(&mut table, &family, grids)?
        } else {
            trainer::train(&mut table, &family, grids)?
        };
        info!(
            grids = report.grids,
            cells = report.cells,
            patterns = table.len(),
            "chain trained"
        );

        Ok(Self {
            kernel,
            family,
            table,
            report,
        })
    }

    /// Generate a `height` x `width` grid with the given random source
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid
    pub fn generate<D: TileDraw + ?Sized>(
        &self,
        width: usize,
        height: usize,
        draw: &mut D,
    ) -> Result<Generation> {
        generator::generate(&self.table, &self.family, width, height, draw)
    }

    /// Generate a grid, reporting completed rows to `on_row`
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid
    pub fn generate_with_progress<D, F>(
        &self,
        width: usize,
        height: usize,
        draw: &mut D,
        on_row: F,
    ) -> Result<Generation>
    where
        D: TileDraw + ?Sized,
        F: FnMut(usize),
    {
        generator::generate_with_progress(&self.table, &self.family, width, height, draw, on_row)
    }

    /// Generate a grid from a seeded [`RandomSelector`]
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid
    pub fn generate_seeded(&self, width: usize, height: usize, seed: u64) -> Result<Generation> {
        self.generate(width, height, &mut RandomSelector::new(seed))
    }

    /// Generate `count` independent grids in parallel
    ///
    /// Grid `k` is seeded with `seed + k`, so the batch is reproducible and
    /// its first grid equals [`MarkovChain::generate_seeded`] with `seed`.
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid
    pub fn generate_batch(
        &self,
        count: usize,
        width: usize,
        height: usize,
        seed: u64,
    ) -> Result<Vec<Generation>> {
        self.generate_batch_with_progress(count, width, height, seed, |_| {})
    }

    /// Generate `count` grids in parallel, calling `on_map` with each finished index
    ///
    /// # Errors
    ///
    /// Returns an error if the dimensions are invalid
    pub fn generate_batch_with_progress<F>(
        &self,
        count: usize,
        width: usize,
        height: usize,
        seed: u64,
        on_map: F,
    ) -> Result<Vec<Generation>>
    where
        F: Fn(usize) + Sync,
    {
        generator::validate_dimensions(width, height)?;
        (0..count)
            .into_par_iter()
            .map(|index| {
                let generation =
                    self.generate_seeded(width, height, seed.wrapping_add(index as u64));
                on_map(index);
                generation
            })
            .collect()
    }

    /// Configured kernel
    pub const fn kernel(&self) -> &Kernel {
        &self.kernel
    }

    /// Back-off family, most specific first
    pub fn sub_kernels(&self) -> &[Kernel] {
        &self.family
    }

    /// Trained table
    pub const fn table(&self) -> &MarginalsTable {
        &self.table
    }

    /// Work done while training
    pub const fn report(&self) -> TrainingReport {
        self.report
    }

    /// Aggregate statistics of the trained table
    pub fn summary(&self) -> ModelSummary {
        ModelSummary::from_table(&self.table)
    }
}
