use ndarray::Array2;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

pub const fn mult(a: Coord, b: Coord) -> CellCount {
    let a = a as CellCount;
    let b = b as CellCount;
    a.saturating_mul(b)
}

pub(crate) fn array_size<T>(array: &Array2<T>) -> Coord2 {
    let (x, y) = array.dim();
    (
        Coord::try_from(x).unwrap_or(Coord::MAX),
        Coord::try_from(y).unwrap_or(Coord::MAX),
    )
}

pub trait NeighborIterExt {
    /// The up-to-8 in-bounds cells around `center`.
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;

    /// `center` followed by its neighbors, the 3×3 block a chord acts on.
    fn iter_block(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        NeighborIter::new(center, array_size(self), 1)
    }

    fn iter_block(&self, center: Coord2) -> NeighborIter {
        NeighborIter::new(center, array_size(self), 0)
    }
}

// Index 0 is the center itself, skipped unless a full block is requested.
const DISPLACEMENTS: [(i8, i8); 9] = [
    (0, 0),
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Applies `delta` to `coords`, returning a value only when it remains in bounds.
fn apply_delta(coords: Coord2, (dx, dy): (i8, i8), (max_x, max_y): Coord2) -> Option<Coord2> {
    let next_x = coords.0.checked_add_signed(dx)?;
    let next_y = coords.1.checked_add_signed(dy)?;
    (next_x < max_x && next_y < max_y).then_some((next_x, next_y))
}

#[derive(Debug, Clone)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    index: usize,
}

impl NeighborIter {
    fn new(center: Coord2, bounds: Coord2, first: usize) -> Self {
        Self {
            center,
            bounds,
            index: first,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = DISPLACEMENTS.get(self.index) {
            self.index += 1;
            if let Some(coords) = apply_delta(self.center, delta, self.bounds) {
                return Some(coords);
            }
        }
        None
    }
}
