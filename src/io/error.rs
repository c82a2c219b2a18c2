//! Error types and context management for training and generation

use std::fmt;
use std::path::PathBuf;

/// Main error type for all model operations
#[derive(Debug)]
pub enum MarkovError {
    /// Training was requested with zero example grids
    EmptyTrainingSet,

    /// A grid was built from text with no rows or no columns
    EmptyGrid,

    /// A grid row does not match the width of the first row
    JaggedGrid {
        /// Index of the training map, when known
        grid: Option<usize>,
        /// Zero-based row index of the offending row
        row: usize,
        /// Width of the first row
        expected: usize,
        /// Width of the offending row
        found: usize,
    },

    /// A training map holds the tile reserved for unresolved output cells
    ReservedTile {
        /// Index of the training map
        grid: usize,
        /// Row of the offending tile
        row: usize,
        /// Column of the offending tile
        col: usize,
        /// The reserved tile
        tile: char,
    },

    /// A kernel row length differs from the kernel height
    NonSquareKernel {
        /// Zero-based row index of the offending row
        row: usize,
        /// Required row length (number of rows)
        expected: usize,
        /// Actual row length
        found: usize,
    },

    /// The kernel matrix has no cells at all
    EmptyKernel,

    /// A kernel matrix entry is something other than 0 or 1
    InvalidKernelValue {
        /// Row of the entry
        row: usize,
        /// Column of the entry
        col: usize,
        /// Offending value as written
        value: String,
    },

    /// The kernel conditions a cell on itself
    ///
    /// Offset (0, 0) is never filled before the cell it belongs to in
    /// row-major generation order.
    NonCausalKernel,

    /// Parameter validation failed
    InvalidParameter {
        /// Name of the invalid parameter
        parameter: &'static str,
        /// Provided value that failed validation
        value: String,
        /// Explanation of why the value is invalid
        reason: String,
    },

    /// Failed to save a rendered grid to disk
    ImageExport {
        /// Path where export was attempted
        path: PathBuf,
        /// Underlying image export error
        source: image::ImageError,
    },

    /// General file system operation failure
    FileSystem {
        /// Path involved in the operation
        path: PathBuf,
        /// Description of the operation that failed
        operation: &'static str,
        /// Underlying I/O error
        source: std::io::Error,
    },
}

impl MarkovError {
    /// Whether the error stems from invalid model configuration
    ///
    /// Configuration errors are raised before any training or generation
    /// work starts.
    pub const fn is_configuration(&self) -> bool {
        !matches!(self, Self::ImageExport { .. } | Self::FileSystem { .. })
    }
}

impl fmt::Display for MarkovError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyTrainingSet => {
                write!(f, "At least one training map is required")
            }
            Self::EmptyGrid => write!(f, "Grid must have at least one row and one column"),
            Self::JaggedGrid {
                grid,
                row,
                expected,
                found,
            } => {
                if let Some(index) = grid {
                    write!(f, "Training map {index}: ")?;
                }
                write!(
                    f,
                    "row {row} has {found} tiles, expected {expected} like the first row"
                )
            }
            Self::ReservedTile {
                grid,
                row,
                col,
                tile,
            } => {
                write!(
                    f,
                    "Training map {grid}: tile '{tile}' at ({row}, {col}) is reserved for unresolved cells"
                )
            }
            Self::NonSquareKernel {
                row,
                expected,
                found,
            } => {
                write!(
                    f,
                    "Kernel must be square: row {row} has {found} entries, expected {expected}"
                )
            }
            Self::EmptyKernel => write!(f, "Kernel must have at least one cell"),
            Self::InvalidKernelValue { row, col, value } => {
                write!(
                    f,
                    "Kernel entry ({row}, {col}) is '{value}', expected 0 or 1"
                )
            }
            Self::NonCausalKernel => {
                write!(
                    f,
                    "Kernel entry (0, 0) is active but the current cell cannot condition itself"
                )
            }
            Self::InvalidParameter {
                parameter,
                value,
                reason,
            } => {
                write!(f, "Invalid parameter '{parameter}' = '{value}': {reason}")
            }
            Self::ImageExport { path, source } => {
                write!(
                    f,
                    "Failed to export image to '{}': {source}",
                    path.display()
                )
            }
            Self::FileSystem {
                path,
                operation,
                source,
            } => {
                write!(
                    f,
                    "File system error during {operation} on '{}': {source}",
                    path.display()
                )
            }
        }
    }
}

impl std::error::Error for MarkovError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::ImageExport { source, .. } => Some(source),
            Self::FileSystem { source, .. } => Some(source),
            _ => None,
        }
    }
}

/// Convenience type alias for model results
pub type Result<T> = std::result::Result<T, MarkovError>;

/// Additional context to enrich error messages
#[derive(Debug, Clone, Default)]
pub struct ErrorContext {
    /// Index of the training map being processed
    pub grid: Option<usize>,
    /// File the failing data was read from
    pub path: Option<PathBuf>,
}

/// Enriches errors with the training input they came from
pub trait WithContext<T> {
    /// Add error context to a Result
    ///
    /// # Errors
    ///
    /// Propagates the original error with additional context applied
    fn with_context(self, context: ErrorContext) -> Result<T>;

    /// Add just the training map index
    ///
    /// # Errors
    ///
    /// Propagates the original error with the map index applied
    fn with_grid(self, grid: usize) -> Result<T>;
}

impl<T, E> WithContext<T> for std::result::Result<T, E>
where
    E: Into<MarkovError>,
{
    fn with_context(self, context: ErrorContext) -> Result<T> {
        self.map_err(|e| {
            let mut error = e.into();
            match &mut error {
                MarkovError::JaggedGrid { grid, .. } => {
                    if context.grid.is_some() {
                        *grid = context.grid;
                    }
                }
                MarkovError::FileSystem { path, .. } | MarkovError::ImageExport { path, .. } => {
                    if let Some(context_path) = context.path {
                        *path = context_path;
                    }
                }
                _ => {}
            }
            error
        })
    }

    fn with_grid(self, grid: usize) -> Result<T> {
        self.with_context(ErrorContext {
            grid: Some(grid),
            ..Default::default()
        })
    }
}

impl From<image::ImageError> for MarkovError {
    fn from(err: image::ImageError) -> Self {
        Self::ImageExport {
            path: PathBuf::from("<unknown>"),
            source: err,
        }
    }
}

impl From<std::io::Error> for MarkovError {
    fn from(err: std::io::Error) -> Self {
        Self::FileSystem {
            path: PathBuf::from("<unknown>"),
            operation: "unknown",
            source: err,
        }
    }
}

/// Create an invalid parameter error
pub fn invalid_parameter(
    parameter: &'static str,
    value: &impl ToString,
    reason: &impl ToString,
) -> MarkovError {
    MarkovError::InvalidParameter {
        parameter,
        value: value.to_string(),
        reason: reason.to_string(),
    }
}

/// Create a file system error for a known path
pub fn file_system_error(
    path: impl Into<PathBuf>,
    operation: &'static str,
    source: std::io::Error,
) -> MarkovError {
    MarkovError::FileSystem {
        path: path.into(),
        operation,
        source,
    }
}
