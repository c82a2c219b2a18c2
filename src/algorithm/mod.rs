/// Memoization of sub-kernel families
pub mod cache;
/// Trained chain bundling kernel, back-off family and table
pub mod chain;
/// Sub-kernel enumeration for back-off
pub mod decomposition;
/// Back-off sampling of new grids
pub mod generator;
/// Injectable randomness and weighted tile selection
pub mod selection;
/// Marginal-count accumulation over training grids
pub mod trainer;
