use thiserror::Error;

use crate::{CellCount, Coord};

/// Errors raised while building a board. Gameplay operations never fail: bad
/// coordinates and moves on a finished game are ignored instead.
#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Width {0} is outside the allowed range 8..=30")]
    WidthOutOfRange(Coord),
    #[error("Height {0} is outside the allowed range 8..=24")]
    HeightOutOfRange(Coord),
    #[error("Mine count {0} is outside the allowed range 10..=667")]
    MineCountOutOfRange(CellCount),
    #[error("Too many mines: {mines} mines do not fit in {cells} cells with one left free")]
    TooManyMines { mines: CellCount, cells: CellCount },
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("Board shape does not match declared size")]
    InvalidBoardShape,
    #[error("Mine layout does not match the requested config")]
    LayoutMismatch,
    #[error("Unknown difficulty tier")]
    UnknownTier,
}

pub type Result<T> = core::result::Result<T, ConfigError>;
