//! Rectangular tile grids used for training input and generated output
//!
//! Grids are row-major with a fixed width. Text input is validated once at
//! construction so the rest of the crate can rely on rectangular shape.

use ndarray::Array2;
use std::collections::BTreeSet;
use std::fmt;

use crate::io::error::{MarkovError, Result, invalid_parameter};

/// Rectangular array of single-character tile symbols
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TileGrid {
    tiles: Array2<char>,
}

impl TileGrid {
    /// Create a grid with every cell set to `tile`
    pub fn filled(rows: usize, cols: usize, tile: char) -> Self {
        Self {
            tiles: Array2::from_elem((rows, cols), tile),
        }
    }

    /// Build a grid from rows of tile symbols
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - There are no rows or the first row is empty
    /// - Any row has a different number of symbols than the first
    pub fn from_rows<S: AsRef<str>>(rows: &[S]) -> Result<Self> {
        let width = rows
            .first()
            .map(|row| row.as_ref().chars().count())
            .unwrap_or_default();
        if width == 0 {
            return Err(MarkovError::EmptyGrid);
        }

        let mut data = Vec::with_capacity(rows.len() * width);
        for (row, line) in rows.iter().enumerate() {
            let before = data.len();
            data.extend(line.as_ref().chars());
            let found = data.len() - before;
            if found != width {
                return Err(MarkovError::JaggedGrid {
                    grid: None,
                    row,
                    expected: width,
                    found,
                });
            }
        }

        let tiles = Array2::from_shape_vec((rows.len(), width), data)
            .map_err(|e| invalid_parameter("grid", &e, &"tile count does not match shape"))?;
        Ok(Self { tiles })
    }

    /// Parse newline-separated rows
    ///
    /// `\r\n` line endings and trailing newlines are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error for the same reasons as [`TileGrid::from_rows`]
    pub fn parse(text: &str) -> Result<Self> {
        let rows: Vec<&str> = text.trim_end_matches(['\n', '\r']).lines().collect();
        Self::from_rows(&rows)
    }

    /// Number of rows
    pub fn rows(&self) -> usize {
        self.tiles.nrows()
    }

    /// Number of columns
    pub fn cols(&self) -> usize {
        self.tiles.ncols()
    }

    /// Grid dimensions (rows, cols)
    pub fn dimensions(&self) -> (usize, usize) {
        self.tiles.dim()
    }

    /// Tile at the given position, `None` outside the grid
    pub fn get(&self, row: usize, col: usize) -> Option<char> {
        self.tiles.get((row, col)).copied()
    }

    /// Overwrite the tile at the given position
    ///
    /// Positions outside the grid are ignored.
    pub fn set(&mut self, row: usize, col: usize, tile: char) {
        if let Some(cell) = self.tiles.get_mut((row, col)) {
            *cell = tile;
        }
    }

    /// Underlying tile array
    pub const fn tiles(&self) -> &Array2<char> {
        &self.tiles
    }

    /// Rows rendered as strings
    pub fn to_rows(&self) -> Vec<String> {
        self.tiles
            .rows()
            .into_iter()
            .map(|row| row.iter().collect())
            .collect()
    }

    /// Distinct tile symbols in ascending order
    pub fn alphabet(&self) -> Vec<char> {
        self.tiles
            .iter()
            .copied()
            .collect::<BTreeSet<_>>()
            .into_iter()
            .collect()
    }

    /// Number of cells holding `tile`
    pub fn count_of(&self, tile: char) -> usize {
        self.tiles.iter().filter(|&&cell| cell == tile).count()
    }
}

impl fmt::Display for TileGrid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.tiles.rows() {
            for tile in row {
                write!(f, "{tile}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
