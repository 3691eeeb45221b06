use crate::*;
pub use bernoulli::*;

mod bernoulli;

/// Strategy that decides where the mines of a new board go.
pub trait MineLayoutGenerator {
    fn generate(self, config: BoardConfig) -> Result<MineLayout>;
}
