use serde::{Deserialize, Serialize};

/// Player-visible state of a single cell.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    /// Hidden cell shown depressed while a button is held over it.
    Pressed,
    Flagged,
    Questioned,
    QuestionedPressed,
    Revealed(u8),
    ExplodedMine,
    WronglyFlagged,
}

impl CellView {
    /// Whether the cell still accepts flag cycling and reveals.
    pub const fn is_covered(self) -> bool {
        matches!(
            self,
            Self::Hidden | Self::Pressed | Self::Flagged | Self::Questioned | Self::QuestionedPressed
        )
    }

    pub const fn is_pressed(self) -> bool {
        matches!(self, Self::Pressed | Self::QuestionedPressed)
    }

    /// The view shown while a button is held, `None` for cells that do not depress.
    pub const fn pressed(self) -> Option<Self> {
        match self {
            Self::Hidden => Some(Self::Pressed),
            Self::Questioned => Some(Self::QuestionedPressed),
            _ => None,
        }
    }

    /// Undoes [`CellView::pressed`].
    pub const fn released(self) -> Self {
        match self {
            Self::Pressed => Self::Hidden,
            Self::QuestionedPressed => Self::Questioned,
            other => other,
        }
    }
}

/// One board position: its mine, its clue and what the player sees.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Cell {
    pub(crate) mine: bool,
    pub(crate) adjacent_mines: u8,
    pub(crate) view: CellView,
    pub(crate) revealed: bool,
}

impl Cell {
    pub const fn is_mine(&self) -> bool {
        self.mine
    }

    /// Number of mines around this cell. Meaningless for mines.
    pub const fn adjacent_mines(&self) -> u8 {
        self.adjacent_mines
    }

    pub const fn view(&self) -> CellView {
        self.view
    }

    /// Set once the player has opened the cell; never cleared.
    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }
}
