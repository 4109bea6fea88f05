use ndarray::Array2;

use crate::*;

/// Grid of cells plus the counters the win check depends on.
///
/// `hidden_count` always equals the number of cells whose `revealed` flag is
/// still clear; [`Board::mark_revealed`] is the only place that flag is set.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    cells: Array2<Cell>,
    mine_count: CellCount,
    hidden_count: CellCount,
}

impl Board {
    pub fn new(layout: &MineLayout) -> Self {
        let cells = Array2::from_shape_fn(layout.size().to_nd_index(), |(x, y)| {
            let coords = (x as Coord, y as Coord);
            let mine = layout.contains_mine(coords);
            Cell {
                mine,
                adjacent_mines: if mine {
                    0
                } else {
                    layout.adjacent_mine_count(coords)
                },
                ..Default::default()
            }
        });
        Self {
            cells,
            mine_count: layout.mine_count(),
            hidden_count: layout.total_cells(),
        }
    }

    pub fn size(&self) -> Coord2 {
        array_size(&self.cells)
    }

    pub fn width(&self) -> Coord {
        self.size().0
    }

    pub fn height(&self) -> Coord {
        self.size().1
    }

    pub fn total_cells(&self) -> CellCount {
        let (x, y) = self.size();
        mult(x, y)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    /// Cells the player has not opened yet, mines included.
    pub fn hidden_count(&self) -> CellCount {
        self.hidden_count
    }

    pub fn contains(&self, (x, y): Coord2) -> bool {
        let (width, height) = self.size();
        x < width && y < height
    }

    pub fn get(&self, coords: Coord2) -> Option<&Cell> {
        self.contains(coords)
            .then(|| &self.cells[coords.to_nd_index()])
    }

    pub(crate) fn cell(&self, coords: Coord2) -> &Cell {
        &self.cells[coords.to_nd_index()]
    }

    pub(crate) fn set_view(&mut self, coords: Coord2, view: CellView) {
        self.cells[coords.to_nd_index()].view = view;
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    pub fn iter_block(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_block(coords)
    }

    /// All positions, row by row: `y` outer, `x` inner.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (width, height) = self.size();
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    pub fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.iter_neighbors(coords)
            .filter(|&pos| self.cell(pos).view == CellView::Flagged)
            .count() as u8
    }

    /// Sets the sticky `revealed` flag, keeping `hidden_count` in step.
    pub(crate) fn mark_revealed(&mut self, coords: Coord2) {
        let cell = &mut self.cells[coords.to_nd_index()];
        if cell.revealed {
            return;
        }
        cell.revealed = true;
        match self.hidden_count.checked_sub(1) {
            Some(count) => self.hidden_count = count,
            None => log::warn!("Hidden count underflow while revealing {:?}", coords),
        }
    }

    /// Moves the mine at `from` to the first safe cell, scanning columns:
    /// `x` outer, `y` inner.
    ///
    /// Returns the cell that received the mine, or `None` when `from` holds no
    /// mine or every other cell is already mined.
    pub(crate) fn relocate_mine(&mut self, from: Coord2) -> Option<Coord2> {
        if !self.cell(from).mine {
            return None;
        }
        let (width, height) = self.size();
        let target = (0..width)
            .flat_map(|x| (0..height).map(move |y| (x, y)))
            .find(|&pos| pos != from && !self.cell(pos).mine)?;

        self.cells[target.to_nd_index()].mine = true;
        self.cells[from.to_nd_index()].mine = false;
        self.recount_adjacent();
        Some(target)
    }

    fn recount_adjacent(&mut self) {
        for coords in self.iter_coords() {
            let count = if self.cell(coords).mine {
                0
            } else {
                self.iter_neighbors(coords)
                    .filter(|&pos| self.cell(pos).mine)
                    .count() as u8
            };
            self.cells[coords.to_nd_index()].adjacent_mines = count;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        Board::new(&MineLayout::from_mine_coords(size, mines).unwrap())
    }

    #[test]
    fn fresh_board_is_fully_hidden() {
        let board = board((4, 3), &[(0, 0), (3, 2)]);
        assert_eq!(board.hidden_count(), 12);
        assert_eq!(board.mine_count(), 2);
        assert!(board.iter_coords().all(|pos| !board.cell(pos).is_revealed()));
        assert_eq!(board.cell((1, 1)).adjacent_mines(), 1);
        assert_eq!(board.cell((0, 0)).view(), CellView::Hidden);
    }

    #[test]
    fn iter_coords_is_row_major() {
        let board = board((3, 2), &[]);
        let order: alloc::vec::Vec<_> = board.iter_coords().collect();
        assert_eq!(order, [(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
    }

    #[test]
    fn out_of_bounds_lookup_is_none() {
        let board = board((3, 3), &[]);
        assert!(board.get((3, 0)).is_none());
        assert!(board.get((2, 2)).is_some());
    }

    #[test]
    fn mark_revealed_counts_once() {
        let mut board = board((3, 3), &[(1, 1)]);
        board.mark_revealed((0, 0));
        board.mark_revealed((0, 0));
        assert_eq!(board.hidden_count(), 8);
    }

    #[test]
    fn relocation_scans_columns_first() {
        let mut board = board((3, 3), &[(0, 0), (1, 0), (2, 2)]);

        assert_eq!(board.relocate_mine((2, 2)), Some((0, 1)));
        assert!(!board.cell((2, 2)).is_mine());
        assert!(board.cell((0, 1)).is_mine());
        assert!(!board.cell((2, 0)).is_mine());
        assert_eq!(board.cell((2, 2)).adjacent_mines(), 0);
        assert_eq!(board.cell((1, 1)).adjacent_mines(), 3);
        assert_eq!(board.iter_coords().filter(|&p| board.cell(p).is_mine()).count(), 3);
    }

    #[test]
    fn relocation_from_origin_goes_down_the_first_column() {
        let mut board = board((8, 8), &[(0, 0)]);

        assert_eq!(board.relocate_mine((0, 0)), Some((0, 1)));
        assert!(board.cell((0, 1)).is_mine());
        assert!(!board.cell((1, 0)).is_mine());
        assert_eq!(board.cell((0, 0)).adjacent_mines(), 1);
        assert_eq!(board.cell((1, 0)).adjacent_mines(), 1);
        assert_eq!(board.cell((1, 2)).adjacent_mines(), 1);
    }

    #[test]
    fn relocation_ignores_safe_cells() {
        let mut board = board((2, 2), &[(0, 0)]);
        assert_eq!(board.relocate_mine((1, 1)), None);
        assert!(board.cell((0, 0)).is_mine());
    }

    #[test]
    fn relocation_fails_on_saturated_board() {
        let mut board = board((2, 1), &[(0, 0), (1, 0)]);
        assert_eq!(board.relocate_mine((0, 0)), None);
        assert!(board.cell((0, 0)).is_mine());
        assert!(board.cell((1, 0)).is_mine());
    }

    #[test]
    fn counts_flagged_neighbors() {
        let mut board = board((3, 3), &[]);
        board.set_view((0, 0), CellView::Flagged);
        board.set_view((2, 2), CellView::Flagged);
        board.set_view((1, 0), CellView::Questioned);
        assert_eq!(board.count_flagged_neighbors((1, 1)), 2);
        assert_eq!(board.count_flagged_neighbors((0, 2)), 0);
    }
}
