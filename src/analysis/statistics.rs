//! Summary statistics of a trained table for diagnostics

use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use crate::analysis::marginals::MarginalsTable;

/// Aggregate view of a trained table
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModelSummary {
    /// Number of distinct predecessor patterns
    pub patterns: usize,
    /// Sum of all observation counts
    pub observations: u64,
    /// Tiles that can be generated, ascending
    pub alphabet: Vec<char>,
    /// Pattern count per conditioning order (number of conditioned cells)
    pub patterns_by_order: BTreeMap<usize, usize>,
}

impl ModelSummary {
    /// Summarize `table`
    pub fn from_table(table: &MarginalsTable) -> Self {
        let mut alphabet = BTreeSet::new();
        let mut patterns_by_order = BTreeMap::new();

        for (pattern, counts) in table.iter() {
            *patterns_by_order.entry(pattern.order()).or_insert(0) += 1;
            alphabet.extend(counts.iter().map(|(tile, _)| tile));
        }

        Self {
            patterns: table.len(),
            observations: table.total_observations(),
            alphabet: alphabet.into_iter().collect(),
            patterns_by_order,
        }
    }

    /// Number of patterns recorded for the unconditional, order-zero context
    ///
    /// Zero means generation cannot resolve any cell.
    pub fn unconditional_patterns(&self) -> usize {
        self.patterns_by_order.get(&0).copied().unwrap_or(0)
    }
}

impl fmt::Display for ModelSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let alphabet: String = self.alphabet.iter().collect();
        writeln!(
            f,
            "{} patterns, {} observations, alphabet \"{alphabet}\"",
            self.patterns, self.observations
        )?;
        for (order, count) in self.patterns_by_order.iter().rev() {
            writeln!(f, "  order {order:>2}: {count} patterns")?;
        }
        Ok(())
    }
}
