use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

pub const MIN_WIDTH: Coord = 8;
pub const MAX_WIDTH: Coord = 30;
pub const MIN_HEIGHT: Coord = 8;
pub const MAX_HEIGHT: Coord = 24;
pub const MIN_MINES: CellCount = 10;
pub const MAX_MINES: CellCount = 667;

/// Validated board dimensions and mine count.
///
/// Only [`GameConfig::new`] and deserialization create one, so every value in
/// circulation satisfies the range checks and leaves at least one safe cell.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawGameConfig")]
pub struct GameConfig {
    size: Coord2,
    mines: CellCount,
}

#[derive(Deserialize)]
struct RawGameConfig {
    size: Coord2,
    mines: CellCount,
}

impl TryFrom<RawGameConfig> for GameConfig {
    type Error = ConfigError;

    fn try_from(raw: RawGameConfig) -> Result<Self> {
        Self::new(raw.size, raw.mines)
    }
}

impl GameConfig {
    /// Skips the range checks, used for layouts built from explicit mine coordinates.
    pub(crate) const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    pub fn new((width, height): Coord2, mines: CellCount) -> Result<Self> {
        if !(MIN_WIDTH..=MAX_WIDTH).contains(&width) {
            return Err(ConfigError::WidthOutOfRange(width));
        }
        if !(MIN_HEIGHT..=MAX_HEIGHT).contains(&height) {
            return Err(ConfigError::HeightOutOfRange(height));
        }
        if !(MIN_MINES..=MAX_MINES).contains(&mines) {
            return Err(ConfigError::MineCountOutOfRange(mines));
        }
        let cells = mult(width, height);
        if mines >= cells {
            return Err(ConfigError::TooManyMines { mines, cells });
        }
        Ok(Self::new_unchecked((width, height), mines))
    }

    pub const fn size(&self) -> Coord2 {
        self.size
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    /// The preset this config matches, or [`Tier::Custom`].
    pub fn tier(&self) -> Tier {
        Tier::RANKED
            .into_iter()
            .find(|tier| tier.config().as_ref() == Some(self))
            .unwrap_or(Tier::Custom)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        BEGINNER
    }
}

const BEGINNER: GameConfig = GameConfig::new_unchecked((8, 8), 10);
const INTERMEDIATE: GameConfig = GameConfig::new_unchecked((16, 16), 40);
const EXPERT: GameConfig = GameConfig::new_unchecked((30, 24), 99);

/// Difficulty preset, also the key best times are tracked under.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Beginner,
    Intermediate,
    Expert,
    Custom,
}

impl Tier {
    /// Tiers that keep a best time.
    pub const RANKED: [Tier; 3] = [Tier::Beginner, Tier::Intermediate, Tier::Expert];

    /// Preset board for this tier, `None` for [`Tier::Custom`].
    pub const fn config(self) -> Option<GameConfig> {
        match self {
            Self::Beginner => Some(BEGINNER),
            Self::Intermediate => Some(INTERMEDIATE),
            Self::Expert => Some(EXPERT),
            Self::Custom => None,
        }
    }

    pub const fn is_ranked(self) -> bool {
        !matches!(self, Self::Custom)
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Beginner => "beginner",
            Self::Intermediate => "intermediate",
            Self::Expert => "expert",
            Self::Custom => "custom",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Tier {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        [Self::Beginner, Self::Intermediate, Self::Expert, Self::Custom]
            .into_iter()
            .find(|tier| tier.name().eq_ignore_ascii_case(s))
            .ok_or(ConfigError::UnknownTier)
    }
}
