//! Input/output collaborators around the model core

/// Command-line interface and invocation orchestration
pub mod cli;
/// Model constants and runtime configuration defaults
pub mod configuration;
/// Error types and context management
pub mod error;
/// PNG previews of tile grids
pub mod image;
/// Progress display for loading and generation
pub mod progress;
/// Plain-text map and kernel files
pub mod text;
