//! Command-line interface for training on text maps and generating new ones

use crate::algorithm::cache::SubKernelCache;
use crate::algorithm::chain::MarkovChain;
use crate::algorithm::generator::Generation;
use crate::algorithm::selection::RandomSelector;
use crate::io::configuration::{
    DEFAULT_HEIGHT, DEFAULT_KERNEL, DEFAULT_SEED, DEFAULT_TILE_SCALE, DEFAULT_WIDTH,
    OUTPUT_SUFFIX,
};
use crate::io::error::{ErrorContext, MarkovError, Result, WithContext, invalid_parameter};
use crate::io::image::export_grid_as_png;
use crate::io::progress::ProgressManager;
use crate::io::text::{
    collect_map_files, indexed_output_path, read_kernel, read_map, read_maps, write_map,
};
use crate::spatial::Kernel;
use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "markovtile")]
#[command(
    author,
    version,
    about = "Generate tile maps from a variable-order Markov model of example maps"
)]
/// Command-line arguments for the map generation tool
pub struct Cli {
    /// Training map files or directories of .txt maps
    #[arg(value_name = "TARGET", required = true)]
    pub targets: Vec<PathBuf>,

    /// Kernel file with rows of 0/1 (defaults to the built-in 4x4 kernel)
    #[arg(short, long, value_name = "FILE")]
    pub kernel: Option<PathBuf>,

    /// Number of columns of each generated map
    #[arg(short, long, default_value_t = DEFAULT_WIDTH)]
    pub width: usize,

    /// Number of rows of each generated map
    #[arg(short = 'H', long, default_value_t = DEFAULT_HEIGHT)]
    pub height: usize,

    /// Random seed for reproducible generation
    #[arg(short, long, default_value_t = DEFAULT_SEED)]
    pub seed: u64,

    /// Number of maps to generate
    #[arg(short, long, default_value_t = 1)]
    pub count: usize,

    /// Output text file (stdout if omitted); batches get an index suffix
    #[arg(short, long, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Also render each generated map as a PNG preview
    #[arg(long, value_name = "FILE")]
    pub png: Option<PathBuf>,

    /// Pixels per tile in PNG previews
    #[arg(long, default_value_t = DEFAULT_TILE_SCALE)]
    pub scale: u32,

    /// Train on all maps in parallel
    #[arg(short, long)]
    pub parallel: bool,

    /// Print the back-off family of the kernel and exit
    #[arg(long)]
    pub sub_kernels: bool,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,
}

impl Cli {
    /// Check if progress should be displayed
    pub const fn should_show_progress(&self) -> bool {
        !self.quiet
    }

    /// Load the configured kernel or fall back to the default one
    ///
    /// # Errors
    ///
    /// Returns an error if the kernel file cannot be read or is invalid
    pub fn load_kernel(&self) -> Result<Kernel> {
        match &self.kernel {
            Some(path) => read_kernel(path),
            None => Kernel::from_matrix(&DEFAULT_KERNEL),
        }
    }
}

/// Install the stderr log subscriber
///
/// `RUST_LOG` takes precedence; otherwise only warnings are shown, or only
/// errors with `quiet`.
pub fn init_tracing(quiet: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if quiet { "error" } else { "warn" }));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Orchestrates loading, training and generation for one invocation
pub struct MapProcessor {
    cli: Cli,
    progress_manager: Option<ProgressManager>,
    cache: SubKernelCache,
}

impl MapProcessor {
    /// Create a new map processor with the given CLI arguments
    pub fn new(cli: Cli) -> Self {
        let progress_manager = cli.should_show_progress().then(ProgressManager::new);

        Self {
            cli,
            progress_manager,
            cache: SubKernelCache::new(),
        }
    }

    /// Run the invocation described by the CLI arguments
    ///
    /// # Errors
    ///
    /// Returns an error if the kernel or maps are invalid, no map is found,
    /// or an output cannot be written
    pub fn process(&mut self) -> Result<()> {
        let kernel = self.cli.load_kernel()?;

        if self.cli.sub_kernels {
            let family = kernel.sub_kernels(&mut self.cache);
            Self::print_sub_kernels(&family);
            return Ok(());
        }

        if self.cli.count == 0 {
            return Err(invalid_parameter("count", &0, &"must be positive"));
        }

        let start_time = Instant::now();
        let chain = self.train(kernel)?;
        info!(
            elapsed_ms = start_time.elapsed().as_millis(),
            summary = %chain.summary(),
            "model ready"
        );

        let generations = self.generate(&chain)?;

        if let Some(ref pm) = self.progress_manager {
            pm.finish();
        }

        self.report_unresolved(&generations);
        self.write_outputs(&generations)
    }

    fn train(&mut self, kernel: Kernel) -> Result<MarkovChain> {
        let files = collect_map_files(&self.cli.targets)?;
        if files.is_empty() {
            return Err(MarkovError::EmptyTrainingSet);
        }

        let grids = if let Some(ref mut pm) = self.progress_manager {
            let bar = pm.start_loading(files.len());
            let mut grids = Vec::with_capacity(files.len());
            for (index, file) in files.iter().enumerate() {
                ProgressManager::loading_file(&bar, file);
                grids.push(read_map(file).with_context(ErrorContext {
                    grid: Some(index),
                    path: Some(file.clone()),
                })?);
                bar.inc(1);
            }
            grids
        } else {
            read_maps(&files)?
        };

        if self.cli.parallel {
            MarkovChain::train_parallel(kernel, &grids, &mut self.cache)
        } else {
            MarkovChain::train(kernel, &grids, &mut self.cache)
        }
    }

    fn generate(&mut self, chain: &MarkovChain) -> Result<Vec<Generation>> {
        let (width, height, seed, count) =
            (self.cli.width, self.cli.height, self.cli.seed, self.cli.count);

        if count == 1 {
            let mut selector = RandomSelector::new(seed);
            let bar = self
                .progress_manager
                .as_mut()
                .filter(|_| ProgressManager::tracks_rows(width, height))
                .map(|pm| pm.start_rows(height));
            let generation = chain.generate_with_progress(width, height, &mut selector, |row| {
                if let Some(ref bar) = bar {
                    bar.set_position(row as u64);
                }
            })?;
            return Ok(vec![generation]);
        }

        let bar = self.progress_manager.as_mut().map(|pm| pm.start_batch(count));
        chain.generate_batch_with_progress(count, width, height, seed, |_| {
            if let Some(ref bar) = bar {
                bar.inc(1);
            }
        })
    }

    // Allow print for user feedback on model quality
    #[allow(clippy::print_stderr)]
    fn report_unresolved(&self, generations: &[Generation]) {
        let unresolved: usize = generations.iter().map(|g| g.unresolved).sum();
        if unresolved > 0 && !self.cli.quiet {
            eprintln!("{unresolved} cells could not be resolved from the trained model");
        }
    }

    // Allow print for writing generated maps to stdout
    #[allow(clippy::print_stdout)]
    fn write_outputs(&self, generations: &[Generation]) -> Result<()> {
        let batch = generations.len() > 1;
        for (index, generation) in generations.iter().enumerate() {
            match &self.cli.output {
                Some(path) => write_map(&generation.grid, &Self::output_path(path, index, batch))?,
                None => {
                    if batch && index > 0 {
                        println!();
                    }
                    print!("{}", generation.grid);
                }
            }

            if let Some(path) = &self.cli.png {
                export_grid_as_png(
                    &generation.grid,
                    self.cli.scale,
                    &Self::output_path(path, index, batch),
                )?;
            }
        }
        Ok(())
    }

    fn output_path(path: &Path, index: usize, batch: bool) -> PathBuf {
        if batch {
            indexed_output_path(path, index, OUTPUT_SUFFIX)
        } else {
            path.to_path_buf()
        }
    }

    // Allow print for listing the back-off family
    #[allow(clippy::print_stdout)]
    fn print_sub_kernels(family: &[Kernel]) {
        for (rank, kernel) in family.iter().enumerate() {
            println!("#{rank} ({} predecessors)", kernel.predecessor_count());
            print!("{kernel}");
        }
    }
}
