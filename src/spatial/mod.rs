//! Spatial data structures
//!
//! This module contains the grid and neighborhood types shared by training
//! and generation:
//! - Rectangular tile grids parsed from text rows
//! - Conditioning kernels and their distance shells

/// Rectangular tile grids
pub mod grid;
/// Conditioning neighborhood shapes
pub mod kernel;

pub use grid::TileGrid;
pub use kernel::Kernel;
