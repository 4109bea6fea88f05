use alloc::collections::BTreeSet;
use alloc::vec::Vec;
use core::ops::BitOr;

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MarkOutcome {
    NoChange,
    Changed,
}

impl MarkOutcome {
    pub const fn has_update(self) -> bool {
        matches!(self, Self::Changed)
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    NoChange,
    Revealed,
    HitMine,
    Won,
}

impl RevealOutcome {
    pub const fn has_update(self) -> bool {
        !matches!(self, Self::NoChange)
    }
}

/// Merges outcomes of a multi-cell reveal, the most severe one wins.
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            (HitMine, _) | (_, HitMine) => HitMine,
            (Won, _) | (_, Won) => Won,
            (Revealed, _) | (_, Revealed) => Revealed,
            (NoChange, NoChange) => NoChange,
        }
    }
}

/// Result of [`Session::reveal`].
#[derive(Clone, Debug, PartialEq)]
pub struct RevealUpdate {
    /// Cells whose view changed and need repainting.
    pub changed: Vec<Coord2>,
    pub outcome: RevealOutcome,
    pub phase: Phase,
    pub hidden_count: CellCount,
    /// Set on the move that started the game, the caller starts its tick then.
    pub clock_started: bool,
}

/// Result of [`Session::chord_reveal`].
#[derive(Clone, Debug, PartialEq)]
pub struct ChordUpdate {
    pub changed: Vec<Coord2>,
    pub outcome: RevealOutcome,
    pub phase: Phase,
}

/// Result of [`Session::cycle_flag`].
#[derive(Clone, Debug, PartialEq)]
pub struct FlagUpdate {
    pub changed: Vec<Coord2>,
    pub outcome: MarkOutcome,
    pub remaining_flags: isize,
}

/// Cells touched during one operation, deduplicated.
#[derive(Debug, Default)]
pub(crate) struct ChangeSet(BTreeSet<Coord2>);

impl ChangeSet {
    pub(crate) fn touch(&mut self, coords: Coord2) {
        self.0.insert(coords);
    }

    pub(crate) fn into_vec(self) -> Vec<Coord2> {
        self.0.into_iter().collect()
    }
}
