//! Model constants and runtime configuration defaults

/// Tile written when no sub-kernel, not even the empty one, has statistics
///
/// Only reachable with an untrained table. Reserved: training maps that
/// contain it are rejected.
pub const UNRESOLVED_TILE: char = '?';

/// Default conditioning kernel, `1` marks offset (-row, -col) as a predecessor
pub const DEFAULT_KERNEL: [[u8; 4]; 4] = [[0, 1, 1, 1], [1, 1, 1, 0], [1, 1, 1, 0], [1, 0, 0, 1]];

// Safety limit to prevent excessive memory allocation
/// Maximum allowed grid dimension
pub const MAX_GRID_DIMENSION: usize = 10_000;

/// Maximum kernel side length accepted from user input
///
/// A full 5x5 kernel already has 677 sub-kernels, each trained per cell.
pub const MAX_KERNEL_SIDE: usize = 5;

/// Maximum number of pixels in a PNG preview
pub const MAX_IMAGE_PIXELS: u64 = 100_000_000;

/// Extension of training map files when a directory is given
pub const MAP_EXTENSION: &str = "txt";

// Default values for configurable parameters
/// Fixed seed for reproducible generation
pub const DEFAULT_SEED: u64 = 42;

/// Default number of columns in a generated map
pub const DEFAULT_WIDTH: usize = 40;

/// Default number of rows in a generated map
pub const DEFAULT_HEIGHT: usize = 40;

/// Default pixels per tile in PNG previews
pub const DEFAULT_TILE_SCALE: u32 = 8;

// Output settings
/// Suffix inserted before the index when several maps are written
pub const OUTPUT_SUFFIX: &str = "_";

// Progress bar display settings
/// Grids smaller than this many cells are generated without a progress bar
pub const PROGRESS_MIN_CELLS: usize = 4096;
/// Width of progress bars in characters
pub const PROGRESS_BAR_WIDTH: u16 = 40;
