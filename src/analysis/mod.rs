//! Analysis modules for pattern extraction and statistical accumulation

/// Tile distributions keyed by predecessor pattern
pub mod marginals;
/// Canonical predecessor patterns sampled through a kernel
pub mod pattern;
/// Summary statistics of a trained table
pub mod statistics;
