//! Variable-order Markov field synthesis of 2-D tile maps
//!
//! A kernel selects which already-placed neighbors condition each cell. The
//! model is trained on example maps under every sub-kernel of that kernel, so
//! generation can back off from the most specific observed context down to
//! the unconditional tile distribution.

#![forbid(unsafe_code)]

/// Sub-kernel decomposition, training, and back-off generation
pub mod algorithm;
/// Predecessor patterns and the statistical table
pub mod analysis;
/// Input/output operations and error handling
pub mod io;
/// Tile grids and conditioning kernels
pub mod spatial;

pub use algorithm::cache::SubKernelCache;
pub use algorithm::chain::MarkovChain;
pub use algorithm::generator::Generation;
pub use algorithm::selection::{RandomSelector, TileDraw};
pub use io::error::{MarkovError, Result};
pub use spatial::{Kernel, TileGrid};
