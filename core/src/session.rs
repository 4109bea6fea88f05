use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec::Vec;
use serde::{Deserialize, Serialize};
use web_time::Instant;

use crate::*;

/// Valid transitions:
/// - NotStarted -> InProgress (first reveal)
/// - InProgress -> Won
/// - InProgress -> Lost
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl Phase {
    pub const fn is_started(self) -> bool {
        !matches!(self, Self::NotStarted)
    }

    /// Won and Lost accept no further moves.
    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// One game from the first click to a win or a loss.
///
/// Every operation is total: coordinates outside the board and moves after
/// the game ended leave the session untouched and report no changed cells.
#[derive(Clone, Debug)]
pub struct Session {
    config: GameConfig,
    board: Board,
    phase: Phase,
    remaining_flags: isize,
    first_click_resolved: bool,
    triggered_mine: Option<Coord2>,
    preview: Vec<Coord2>,
    started_at: Option<Instant>,
    ended_at: Option<Instant>,
    elapsed_secs: u32,
}

impl Session {
    pub fn new(config: GameConfig, generator: impl MinefieldGenerator) -> Result<Self> {
        let layout = generator.generate(config)?;
        // replayed layouts check this themselves, other generators may not
        if layout.size() != config.size() || layout.mine_count() != config.mines() {
            return Err(ConfigError::LayoutMismatch);
        }
        Ok(Self::build(config, &layout))
    }

    /// New session on a board shuffled by [`SwapShuffleGenerator`].
    pub fn with_seed(config: GameConfig, seed: u64) -> Result<Self> {
        Self::new(config, SwapShuffleGenerator::new(seed))
    }

    /// Session over a hand-made layout of any size, as long as one cell is safe.
    pub fn from_layout(layout: MineLayout) -> Result<Self> {
        let config = layout.game_config();
        if layout.mine_count() >= layout.total_cells() {
            return Err(ConfigError::TooManyMines {
                mines: layout.mine_count(),
                cells: layout.total_cells(),
            });
        }
        Ok(Self::build(config, &layout))
    }

    fn build(config: GameConfig, layout: &MineLayout) -> Self {
        log::debug!(
            "New {} session {}x{} with {} mines",
            config.tier(),
            config.width(),
            config.height(),
            config.mines()
        );
        Self {
            config,
            board: Board::new(layout),
            phase: Phase::NotStarted,
            remaining_flags: layout.mine_count() as isize,
            first_click_resolved: false,
            triggered_mine: None,
            preview: Vec::new(),
            started_at: None,
            ended_at: None,
            elapsed_secs: 0,
        }
    }

    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn tier(&self) -> Tier {
        self.config.tier()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_finished(&self) -> bool {
        self.phase.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.board.size()
    }

    pub fn mine_count(&self) -> CellCount {
        self.board.mine_count()
    }

    pub fn hidden_count(&self) -> CellCount {
        self.board.hidden_count()
    }

    /// Mines minus placed flags; negative when over-flagged.
    pub fn remaining_flags(&self) -> isize {
        self.remaining_flags
    }

    pub fn first_click_resolved(&self) -> bool {
        self.first_click_resolved
    }

    /// The mine that ended the game, if it was lost.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    pub fn started_at(&self) -> Option<Instant> {
        self.started_at
    }

    /// When the game was won or lost.
    pub fn ended_at(&self) -> Option<Instant> {
        self.ended_at
    }

    /// Seconds as of the last tick, or final time once the game ended.
    pub fn elapsed_secs(&self) -> u32 {
        self.elapsed_secs
    }

    pub fn cell(&self, coords: Coord2) -> Option<&Cell> {
        self.board.get(coords)
    }

    pub fn cell_state(&self, coords: Coord2) -> Option<CellView> {
        self.board.get(coords).map(Cell::view)
    }

    /// Open a cell, flood-filling from it when it has no adjacent mines.
    pub fn reveal(&mut self, coords: Coord2) -> RevealUpdate {
        let mut changes = ChangeSet::default();
        self.clear_preview(&mut changes);

        let mut clock_started = false;
        let outcome = if self.can_reveal(coords) {
            if !self.first_click_resolved {
                self.resolve_first_click(coords);
                clock_started = true;
            }
            self.open_cell(coords, &mut changes)
        } else {
            RevealOutcome::NoChange
        };

        RevealUpdate {
            changed: changes.into_vec(),
            outcome,
            phase: self.phase,
            hidden_count: self.board.hidden_count(),
            clock_started,
        }
    }

    pub fn can_chord_reveal_at(&self, coords: Coord2) -> bool {
        if self.phase.is_finished() {
            return false;
        }
        match self.board.get(coords) {
            Some(cell) if cell.is_revealed() => match cell.view() {
                CellView::Revealed(count) => count == self.board.count_flagged_neighbors(coords),
                _ => false,
            },
            _ => false,
        }
    }

    /// Open a satisfied number and its whole 3×3 block.
    ///
    /// When the flags around `coords` do not add up to its number nothing is
    /// opened; only the press preview is released.
    pub fn chord_reveal(&mut self, coords: Coord2) -> ChordUpdate {
        let mut changes = ChangeSet::default();
        self.clear_preview(&mut changes);

        let mut outcome = RevealOutcome::NoChange;
        if self.can_chord_reveal_at(coords) {
            for pos in self.board.iter_block(coords) {
                if self.can_reveal(pos) {
                    outcome = outcome | self.open_cell(pos, &mut changes);
                }
            }
        } else {
            log::trace!("Chord at {:?} not satisfied", coords);
        }

        ChordUpdate {
            changed: changes.into_vec(),
            outcome,
            phase: self.phase,
        }
    }

    /// Hidden -> Flagged -> Questioned -> Hidden.
    pub fn cycle_flag(&mut self, coords: Coord2) -> FlagUpdate {
        use CellView::*;

        let mut changes = ChangeSet::default();
        self.clear_preview(&mut changes);

        let outcome = match self.board.get(coords) {
            Some(cell) if !self.phase.is_finished() && !cell.is_revealed() => {
                let next = match cell.view() {
                    Hidden => {
                        self.remaining_flags -= 1;
                        Some(Flagged)
                    }
                    Flagged => {
                        self.remaining_flags += 1;
                        Some(Questioned)
                    }
                    Questioned => Some(Hidden),
                    _ => None,
                };
                match next {
                    Some(view) => {
                        self.board.set_view(coords, view);
                        changes.touch(coords);
                        MarkOutcome::Changed
                    }
                    None => MarkOutcome::NoChange,
                }
            }
            _ => MarkOutcome::NoChange,
        };

        FlagUpdate {
            changed: changes.into_vec(),
            outcome,
            remaining_flags: self.remaining_flags,
        }
    }

    /// Show `coords` depressed while the reveal button is held.
    pub fn press(&mut self, coords: Coord2) -> Vec<Coord2> {
        let mut changes = ChangeSet::default();
        self.clear_preview(&mut changes);
        if !self.phase.is_finished() && self.board.contains(coords) {
            self.press_cell(coords, &mut changes);
        }
        changes.into_vec()
    }

    /// Show the 3×3 block around `coords` depressed while both buttons are held.
    pub fn press_chord(&mut self, coords: Coord2) -> Vec<Coord2> {
        let mut changes = ChangeSet::default();
        self.clear_preview(&mut changes);
        if !self.phase.is_finished() && self.board.contains(coords) {
            for pos in self.board.iter_block(coords) {
                self.press_cell(pos, &mut changes);
            }
        }
        changes.into_vec()
    }

    /// Drop the press preview without acting on it.
    pub fn release_press(&mut self) -> Vec<Coord2> {
        let mut changes = ChangeSet::default();
        self.clear_preview(&mut changes);
        changes.into_vec()
    }

    /// Recompute the elapsed seconds from the wall clock.
    pub fn clock_tick(&mut self) -> u32 {
        self.clock_tick_at(Instant::now())
    }

    /// Only advances while the game is in progress.
    pub fn clock_tick_at(&mut self, now: Instant) -> u32 {
        if matches!(self.phase, Phase::InProgress) {
            self.elapsed_secs = self.elapsed_until(now);
        }
        self.elapsed_secs
    }

    /// Whether a won game beat the stored time for its tier.
    pub fn is_new_best(&self, store: &impl ScoreStore) -> bool {
        matches!(self.phase, Phase::Won)
            && store
                .best_time(self.tier())
                .is_some_and(|best| self.elapsed_secs < best)
    }

    /// Records the final time under `name` when [`Session::is_new_best`] holds.
    pub fn record_if_best(&self, store: &mut impl ScoreStore, name: &str) -> bool {
        let is_best = self.is_new_best(store);
        if is_best {
            store.record_score(self.tier(), name, self.elapsed_secs);
        }
        is_best
    }

    fn can_reveal(&self, coords: Coord2) -> bool {
        if self.phase.is_finished() {
            return false;
        }
        match self.board.get(coords) {
            Some(cell) => {
                !cell.is_revealed()
                    && matches!(
                        cell.view(),
                        CellView::Hidden
                            | CellView::Pressed
                            | CellView::Questioned
                            | CellView::QuestionedPressed
                    )
            }
            None => false,
        }
    }

    fn resolve_first_click(&mut self, coords: Coord2) {
        self.first_click_resolved = true;
        if self.board.cell(coords).is_mine() {
            match self.board.relocate_mine(coords) {
                Some(target) => {
                    log::debug!("First click on mine at {:?}, moved to {:?}", coords, target)
                }
                None => log::warn!("First click on mine at {:?}, no safe cell to move it to", coords),
            }
        }

        let now = Instant::now();
        log::debug!("Session started");
        self.started_at = Some(now);
        self.phase = Phase::InProgress;
    }

    fn open_cell(&mut self, coords: Coord2, changes: &mut ChangeSet) -> RevealOutcome {
        if self.board.cell(coords).is_mine() {
            self.board.set_view(coords, CellView::ExplodedMine);
            self.board.mark_revealed(coords);
            changes.touch(coords);
            self.triggered_mine = Some(coords);
            self.end_game(false, changes);
            return RevealOutcome::HitMine;
        }

        self.flood_fill(coords, changes);

        if self.board.hidden_count() == self.board.mine_count() {
            self.end_game(true, changes);
            RevealOutcome::Won
        } else {
            RevealOutcome::Revealed
        }
    }

    /// Opens `start` and spreads through zero cells; flagged cells stop the spread.
    fn flood_fill(&mut self, start: Coord2, changes: &mut ChangeSet) {
        let mut visited = BTreeSet::from([start]);
        let mut to_visit = VecDeque::from([start]);

        while let Some(coords) = to_visit.pop_front() {
            let cell = *self.board.cell(coords);
            if cell.is_revealed() || cell.is_mine() || !self.can_reveal(coords) {
                log::trace!("Skipping cell at {:?}", coords);
                continue;
            }

            let count = cell.adjacent_mines();
            self.board.set_view(coords, CellView::Revealed(count));
            self.board.mark_revealed(coords);
            changes.touch(coords);
            log::trace!("Opened cell at {:?}, mine count: {}", coords, count);

            if count == 0 {
                to_visit.extend(
                    self.board
                        .iter_neighbors(coords)
                        .filter(|&pos| visited.insert(pos)),
                );
            }
        }
    }

    fn end_game(&mut self, won: bool, changes: &mut ChangeSet) {
        if self.phase.is_finished() {
            return;
        }

        self.phase = if won { Phase::Won } else { Phase::Lost };
        let now = Instant::now();
        self.elapsed_secs = self.elapsed_until(now);
        self.ended_at = Some(now);
        log::debug!("Session {:?} after {}s", self.phase, self.elapsed_secs);

        if won {
            self.remaining_flags = 0;
            self.triggered_mine = None;
        }
        for coords in self.board.iter_coords() {
            let cell = *self.board.cell(coords);
            if cell.is_revealed() {
                continue;
            }
            let view = cell.view().released();
            let next = match (won, cell.is_mine(), view) {
                (true, true, CellView::Flagged) => None,
                (true, true, _) => Some(CellView::Flagged),
                (true, false, _) => {
                    log::warn!("Safe cell {:?} still hidden after win", coords);
                    self.board.mark_revealed(coords);
                    Some(CellView::Revealed(cell.adjacent_mines()))
                }
                (false, true, CellView::Flagged) => None,
                (false, true, _) => Some(CellView::ExplodedMine),
                (false, false, CellView::Flagged) => Some(CellView::WronglyFlagged),
                (false, false, _) => None,
            };
            if let Some(next) = next {
                self.board.set_view(coords, next);
                changes.touch(coords);
            }
        }
    }

    fn press_cell(&mut self, coords: Coord2, changes: &mut ChangeSet) {
        let cell = self.board.cell(coords);
        if cell.is_revealed() {
            return;
        }
        if let Some(pressed) = cell.view().pressed() {
            self.board.set_view(coords, pressed);
            self.preview.push(coords);
            changes.touch(coords);
        }
    }

    fn clear_preview(&mut self, changes: &mut ChangeSet) {
        for coords in core::mem::take(&mut self.preview) {
            let view = self.board.cell(coords).view();
            if view.is_pressed() {
                self.board.set_view(coords, view.released());
                changes.touch(coords);
            }
        }
    }

    fn elapsed_until(&self, now: Instant) -> u32 {
        let Some(started_at) = self.started_at else {
            return 0;
        };
        let secs = now
            .checked_duration_since(started_at)
            .unwrap_or_default()
            .as_secs();
        u32::try_from(secs).unwrap_or(u32::MAX)
    }
}
