use ndarray::Array2;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use super::*;

/// Generation strategy that flips an independent biased coin for every tile.
///
/// The number of mines is not fixed: it follows a binomial distribution over the
/// board area, so two boards with the same config usually differ in mine count.
#[derive(Clone, Debug, PartialEq)]
pub struct BernoulliGenerator<R> {
    rng: R,
}

impl<R: Rng> BernoulliGenerator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl BernoulliGenerator<SmallRng> {
    /// Reproducible generator, the same seed always yields the same layout.
    pub fn from_seed(seed: u64) -> Self {
        Self::new(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> MineLayoutGenerator for BernoulliGenerator<R> {
    fn generate(mut self, config: BoardConfig) -> Result<MineLayout> {
        let config = config.validate()?;
        let probability = config.mine_probability;

        let mine_mask = Array2::from_shape_fn(config.size.to_nd_index(), |_| {
            self.rng.random_bool(probability)
        });
        let layout = MineLayout::from_mine_mask(mine_mask);

        log::debug!(
            "Generated {}x{} layout with {} mines in {} tiles (p = {})",
            config.size.0,
            config.size.1,
            layout.mine_count(),
            config.total_cells(),
            probability
        );
        Ok(layout)
    }
}
