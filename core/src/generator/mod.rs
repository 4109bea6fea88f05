use crate::*;
pub use shuffle::*;

mod shuffle;

/// Source of mine layouts for new sessions.
pub trait MinefieldGenerator {
    fn generate(self, config: GameConfig) -> Result<MineLayout>;
}

/// Replays a layout that was decided elsewhere.
impl MinefieldGenerator for MineLayout {
    fn generate(self, config: GameConfig) -> Result<MineLayout> {
        if self.size() != config.size() || self.mine_count() != config.mines() {
            return Err(ConfigError::LayoutMismatch);
        }
        Ok(self)
    }
}
