use crate::analysis::marginals::TileCounts;
use rand::{Rng, SeedableRng, rngs::StdRng};

/// Source of the uniform integer draws used for tile sampling
///
/// Generation asks for exactly one draw per resolved cell. Implementations
/// must return a value in `[1, total]` when `total > 0`.
pub trait TileDraw {
    /// Draw an integer uniformly from `[1, total]`
    fn draw(&mut self, total: u64) -> u64;
}

/// Seeded random selector for reproducible stochastic choices
#[derive(Debug, Clone)]
pub struct RandomSelector {
    rng: StdRng,
}

impl RandomSelector {
    /// Create a deterministic random selector
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl TileDraw for RandomSelector {
    fn draw(&mut self, total: u64) -> u64 {
        if total == 0 {
            return 0;
        }
        self.rng.random_range(1..=total)
    }
}

/// Weighted random selection of a tile
///
/// Draws once in `[1, total]` and walks the counts in first-observed order,
/// so a tile's chance is its share of the total count.
pub fn sample_tile<D: TileDraw + ?Sized>(counts: &TileCounts, draw: &mut D) -> Option<char> {
    let total = counts.total();
    if total == 0 {
        return None;
    }
    counts.select(draw.draw(total))
}
