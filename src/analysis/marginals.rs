//! Empirical tile distributions keyed by predecessor pattern

use std::collections::HashMap;
use std::collections::hash_map::Entry;

use crate::analysis::pattern::PredecessorPattern;

/// Insertion-ordered tile frequencies observed after one pattern
///
/// ## Invariants
/// - Each tile appears at most once
/// - Every count is strictly positive
/// - Tiles keep the order in which they were first observed
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TileCounts {
    entries: Vec<(char, u64)>,
}

impl TileCounts {
    /// Create an empty distribution
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one more observation of `tile`
    pub fn increment(&mut self, tile: char) {
        self.add(tile, 1);
    }

    fn add(&mut self, tile: char, count: u64) {
        if let Some((_, existing)) = self.entries.iter_mut().find(|(t, _)| *t == tile) {
            *existing += count;
        } else {
            self.entries.push((tile, count));
        }
    }

    /// Sum of all observation counts
    pub fn total(&self) -> u64 {
        self.entries.iter().map(|&(_, count)| count).sum()
    }

    /// Observation count of `tile`, zero if never seen
    pub fn count_of(&self, tile: char) -> u64 {
        self.entries
            .iter()
            .find(|(t, _)| *t == tile)
            .map_or(0, |&(_, count)| count)
    }

    /// Number of distinct tiles
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no tile has been recorded
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// (tile, count) pairs in first-observed order
    pub fn iter(&self) -> impl Iterator<Item = (char, u64)> + '_ {
        self.entries.iter().copied()
    }

    /// Tile selected by a draw in `[1, total]`
    ///
    /// Walks the entries accumulating counts and returns the first tile whose
    /// running sum reaches `draw`. Draws outside the range yield `None`.
    pub fn select(&self, draw: u64) -> Option<char> {
        if draw == 0 {
            return None;
        }

        let mut running = 0;
        for &(tile, count) in &self.entries {
            running += count;
            if running >= draw {
                return Some(tile);
            }
        }
        None
    }

    /// Add the counts of `other`, appending tiles not seen here in `other`'s order
    pub fn merge(&mut self, other: &Self) {
        for &(tile, count) in &other.entries {
            self.add(tile, count);
        }
    }
}

/// Trained mapping from predecessor pattern to tile distribution
///
/// Mutated only while training. Once training completes the table is read
/// without locking by any number of generators.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MarginalsTable {
    table: HashMap<PredecessorPattern, TileCounts>,
}

impl MarginalsTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// Record that `tile` followed `pattern`
    pub fn increment(&mut self, pattern: PredecessorPattern, tile: char) {
        self.table.entry(pattern).or_default().increment(tile);
    }

    /// Distribution recorded for `pattern`
    pub fn get(&self, pattern: &PredecessorPattern) -> Option<&TileCounts> {
        self.table.get(pattern)
    }

    /// Whether any observation was recorded for `pattern`
    pub fn contains(&self, pattern: &PredecessorPattern) -> bool {
        self.table.contains_key(pattern)
    }

    /// Number of distinct patterns
    pub fn len(&self) -> usize {
        self.table.len()
    }

    /// Whether the table holds no statistics at all
    pub fn is_empty(&self) -> bool {
        self.table.is_empty()
    }

    /// Patterns with their distributions, in arbitrary order
    pub fn iter(&self) -> impl Iterator<Item = (&PredecessorPattern, &TileCounts)> + '_ {
        self.table.iter()
    }

    /// Sum of every count in the table
    pub fn total_observations(&self) -> u64 {
        self.table.values().map(TileCounts::total).sum()
    }

    /// Fold another table into this one by summing counts per pattern and tile
    ///
    /// Merging is commutative and associative with respect to counts, so
    /// tables trained on separate grids can be combined in any grouping.
    pub fn merge(&mut self, other: Self) {
        for (pattern, counts) in other.table {
            match self.table.entry(pattern) {
                Entry::Occupied(mut entry) => entry.get_mut().merge(&counts),
                Entry::Vacant(entry) => {
                    entry.insert(counts);
                }
            }
        }
    }
}
