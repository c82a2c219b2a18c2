//! Conditioning neighborhood shapes
//!
//! A kernel is a square boolean matrix. An active entry at `(i, j)` means the
//! tile at offset `(-i, -j)` from the current cell conditions its
//! distribution. Kernels compare and hash by shape and content only, which is
//! what lets them key the sub-kernel cache.

use bitvec::prelude::{BitVec, bitvec};
use std::fmt;
use std::sync::Arc;

use crate::algorithm::cache::SubKernelCache;
use crate::algorithm::decomposition;
use crate::io::configuration::MAX_KERNEL_SIDE;
use crate::io::error::{MarkovError, Result, invalid_parameter};

/// Immutable square matrix of conditioning offsets
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Kernel {
    side: usize,
    /// Row-major activity flags, `side * side` bits
    active: BitVec,
}

impl Kernel {
    /// Build a kernel from rows of activity flags
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The matrix has no rows
    /// - A row length differs from the number of rows
    /// - The side length exceeds `MAX_KERNEL_SIDE`
    /// - Entry (0, 0) is active, since a cell cannot condition itself
    pub fn new<R: AsRef<[bool]>>(rows: &[R]) -> Result<Self> {
        let side = rows.len();
        if side == 0 {
            return Err(MarkovError::EmptyKernel);
        }
        if side > MAX_KERNEL_SIDE {
            return Err(invalid_parameter(
                "kernel",
                &format!("{side}x{side}"),
                &format!("side length must not exceed {MAX_KERNEL_SIDE}"),
            ));
        }

        let mut active = BitVec::with_capacity(side * side);
        for (row, values) in rows.iter().enumerate() {
            let values = values.as_ref();
            if values.len() != side {
                return Err(MarkovError::NonSquareKernel {
                    row,
                    expected: side,
                    found: values.len(),
                });
            }
            active.extend(values.iter().copied());
        }

        if active.first().is_some_and(|bit| *bit) {
            return Err(MarkovError::NonCausalKernel);
        }

        Ok(Self { side, active })
    }

    /// Build a kernel from a 0/1 integer matrix
    ///
    /// # Errors
    ///
    /// Returns an error if an entry is neither 0 nor 1, or for any reason
    /// listed on [`Kernel::new`]
    pub fn from_matrix<R: AsRef<[u8]>>(rows: &[R]) -> Result<Self> {
        let mut flags = Vec::with_capacity(rows.len());
        for (row, values) in rows.iter().enumerate() {
            let mut flag_row = Vec::with_capacity(values.as_ref().len());
            for (col, &value) in values.as_ref().iter().enumerate() {
                match value {
                    0 => flag_row.push(false),
                    1 => flag_row.push(true),
                    _ => {
                        return Err(MarkovError::InvalidKernelValue {
                            row,
                            col,
                            value: value.to_string(),
                        });
                    }
                }
            }
            flags.push(flag_row);
        }
        Self::new(&flags)
    }

    /// Parse a kernel from text rows of `0` and `1`
    ///
    /// Whitespace between digits and blank lines are ignored, so both
    /// `"011\n110"` and `"0 1 1\n1 1 0"` are accepted.
    ///
    /// # Errors
    ///
    /// Returns an error if a character other than `0`, `1` or whitespace
    /// appears, or for any reason listed on [`Kernel::new`]
    pub fn parse(text: &str) -> Result<Self> {
        let mut flags = Vec::new();
        for line in text.lines().filter(|line| !line.trim().is_empty()) {
            let row = flags.len();
            let mut flag_row = Vec::new();
            for (col, symbol) in line.chars().filter(|c| !c.is_whitespace()).enumerate() {
                match symbol {
                    '0' => flag_row.push(false),
                    '1' => flag_row.push(true),
                    _ => {
                        return Err(MarkovError::InvalidKernelValue {
                            row,
                            col,
                            value: symbol.to_string(),
                        });
                    }
                }
            }
            flags.push(flag_row);
        }
        Self::new(&flags)
    }

    /// Fully inactive kernel of the given side length
    ///
    /// Matches every position unconditionally.
    pub fn empty(side: usize) -> Self {
        Self {
            side,
            active: bitvec![0; side * side],
        }
    }

    /// Side length of the square matrix
    pub const fn side(&self) -> usize {
        self.side
    }

    /// Number of active cells, used as the specificity of the kernel
    pub fn predecessor_count(&self) -> usize {
        self.active.count_ones()
    }

    /// Whether the kernel conditions on nothing
    pub fn is_fully_inactive(&self) -> bool {
        self.active.not_any()
    }

    /// Whether offset `(-row, -col)` is a conditioning predecessor
    ///
    /// Cells outside the matrix are reported inactive.
    pub fn is_active(&self, row: usize, col: usize) -> bool {
        self.index(row, col)
            .and_then(|index| self.active.get(index))
            .is_some_and(|bit| *bit)
    }

    /// Active cells as `(row, col)` pairs in row-major order
    pub fn active_offsets(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        self.active
            .iter_ones()
            .map(|index| (index / self.side, index % self.side))
    }

    /// Copy of this kernel with one cell deactivated
    pub fn without(&self, row: usize, col: usize) -> Self {
        let mut kernel = self.clone();
        if let Some(index) = self.index(row, col) {
            kernel.active.set(index, false);
        }
        kernel
    }

    /// Cells at Chebyshev distance `distance` from the origin, in decomposition order
    ///
    /// The diagonal cell `(d, d)` comes first, then for `k = 1..=d` the
    /// column cell `(d - k, d)` followed by the row cell `(d, d - k)`.
    pub fn shell(distance: usize) -> Vec<(usize, usize)> {
        let mut cells = Vec::with_capacity(2 * distance + 1);
        cells.push((distance, distance));
        for k in 1..=distance {
            cells.push((distance - k, distance));
            cells.push((distance, distance - k));
        }
        cells
    }

    /// Largest distance whose shell holds an active cell
    ///
    /// Returns 0 when no shell beyond the origin is active.
    pub fn highest_distance(&self) -> usize {
        (1..self.side)
            .rev()
            .find(|&distance| {
                Self::shell(distance)
                    .into_iter()
                    .any(|(row, col)| self.is_active(row, col))
            })
            .unwrap_or(0)
    }

    /// Back-off family of this kernel, most specific first
    ///
    /// Convenience wrapper over [`decomposition::sub_kernels`].
    pub fn sub_kernels(&self, cache: &mut SubKernelCache) -> Arc<[Self]> {
        decomposition::sub_kernels(self, cache)
    }

    const fn index(&self, row: usize, col: usize) -> Option<usize> {
        if row < self.side && col < self.side {
            Some(row * self.side + col)
        } else {
            None
        }
    }
}

impl fmt::Display for Kernel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.side {
            for col in 0..self.side {
                let digit = if self.is_active(row, col) { '1' } else { '0' };
                write!(f, "{digit}")?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
