use ndarray::Array2;
use rand::prelude::*;

use super::*;

/// Places mines in the first cells, then mixes them with `width * height`
/// swaps between two random positions.
///
/// The swaps do not produce a uniform permutation, which is fine for play.
/// Use [`UniformGenerator`] when every layout must be equally likely.
#[derive(Clone, Debug)]
pub struct SwapShuffleGenerator<R = SmallRng> {
    rng: R,
}

impl SwapShuffleGenerator {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> SwapShuffleGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MinefieldGenerator for SwapShuffleGenerator<R> {
    fn generate(mut self, config: GameConfig) -> Result<MineLayout> {
        let (width, height) = config.size();
        let mut mines: Array2<bool> = Array2::default(config.size().to_nd_index());
        for cell in mines.iter_mut().take(config.mines().into()) {
            *cell = true;
        }

        for _ in 0..config.total_cells() {
            let a = (
                self.rng.random_range(0..width),
                self.rng.random_range(0..height),
            );
            let b = (
                self.rng.random_range(0..width),
                self.rng.random_range(0..height),
            );
            mines.swap(a.to_nd_index(), b.to_nd_index());
        }

        log::debug!(
            "Swap-shuffled {} mines over a {}x{} board",
            config.mines(),
            width,
            height
        );
        MineLayout::from_mine_mask(mines)
    }
}

/// Uniformly random layout through a full Fisher-Yates shuffle.
#[derive(Clone, Debug)]
pub struct UniformGenerator<R = SmallRng> {
    rng: R,
}

impl UniformGenerator {
    pub fn new(seed: u64) -> Self {
        Self::with_rng(SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> UniformGenerator<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> MinefieldGenerator for UniformGenerator<R> {
    fn generate(mut self, config: GameConfig) -> Result<MineLayout> {
        let mut cells = alloc::vec![false; config.total_cells().into()];
        for cell in cells.iter_mut().take(config.mines().into()) {
            *cell = true;
        }
        cells.shuffle(&mut self.rng);

        let mines = Array2::from_shape_vec(config.size().to_nd_index(), cells)
            .map_err(|_| ConfigError::InvalidBoardShape)?;
        log::debug!(
            "Uniformly placed {} mines over a {}x{} board",
            config.mines(),
            config.width(),
            config.height()
        );
        MineLayout::from_mine_mask(mines)
    }
}
