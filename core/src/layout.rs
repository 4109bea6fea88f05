use core::ops::{Index, IndexMut};
use ndarray::Array2;

use crate::*;

/// Where the mines are, before any play happens on top of it.
#[derive(Clone, Debug, PartialEq)]
pub struct MineLayout {
    mine_mask: Array2<bool>,
    mine_count: CellCount,
}

impl MineLayout {
    pub fn from_mine_mask(mine_mask: Array2<bool>) -> Result<Self> {
        let (x, y) = mine_mask.dim();
        if x == 0 || y == 0 || x > usize::from(Coord::MAX) || y > usize::from(Coord::MAX) {
            return Err(ConfigError::InvalidBoardShape);
        }
        let mine_count = mine_mask.iter().filter(|&&is_mine| is_mine).count();
        Ok(Self {
            mine_mask,
            mine_count: mine_count
                .try_into()
                .map_err(|_| ConfigError::InvalidBoardShape)?,
        })
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut mine_mask: Array2<bool> = Array2::default(size.to_nd_index());

        for &coords in mine_coords {
            if coords.0 >= size.0 || coords.1 >= size.1 {
                return Err(ConfigError::InvalidCoords);
            }
            mine_mask[coords.to_nd_index()] = true;
        }

        Self::from_mine_mask(mine_mask)
    }

    /// Config describing this layout, without the preset range checks.
    pub fn game_config(&self) -> GameConfig {
        GameConfig::new_unchecked(self.size(), self.mine_count)
    }

    pub fn size(&self) -> Coord2 {
        array_size(&self.mine_mask)
    }

    pub fn total_cells(&self) -> CellCount {
        let (x, y) = self.size();
        mult(x, y)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn contains_mine(&self, coords: Coord2) -> bool {
        self[coords]
    }

    pub fn adjacent_mine_count(&self, coords: Coord2) -> u8 {
        // at most 8 neighbors, always fits
        self.mine_mask
            .iter_neighbors(coords)
            .filter(|&pos| self[pos])
            .count() as u8
    }

    pub fn iter_mines(&self) -> impl Iterator<Item = Coord2> + '_ {
        self.mine_mask
            .indexed_iter()
            .filter(|&(_, &is_mine)| is_mine)
            .map(|((x, y), _)| (x as Coord, y as Coord))
    }
}

impl Index<Coord2> for MineLayout {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for MineLayout {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.mine_mask[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_mines_from_coords() {
        let layout = MineLayout::from_mine_coords((3, 2), &[(0, 0), (2, 1), (0, 0)]).unwrap();
        assert_eq!(layout.mine_count(), 2);
        assert_eq!(layout.total_cells(), 6);
        assert!(layout.contains_mine((2, 1)));
        assert!(!layout.contains_mine((1, 1)));
    }

    #[test]
    fn rejects_coords_outside_board() {
        assert_eq!(
            MineLayout::from_mine_coords((3, 3), &[(3, 0)]),
            Err(ConfigError::InvalidCoords)
        );
    }

    #[test]
    fn rejects_empty_board() {
        assert_eq!(
            MineLayout::from_mine_coords((0, 3), &[]),
            Err(ConfigError::InvalidBoardShape)
        );
    }

    #[test]
    fn adjacent_count_ignores_center() {
        let layout = MineLayout::from_mine_coords((3, 3), &[(0, 0), (1, 1), (2, 2)]).unwrap();
        assert_eq!(layout.adjacent_mine_count((1, 1)), 2);
        assert_eq!(layout.adjacent_mine_count((0, 2)), 1);
        assert_eq!(layout.adjacent_mine_count((1, 0)), 2);
    }
}
