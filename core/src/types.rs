use ndarray::Array2;

/// Single coordinate axis used for board width, height, and positions.
pub type Coord = u8;

/// Count type used for mine counts and total-cell counts.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

/// Seed accepted by the game. Only the low 32 bits reach the generator.
pub type Seed = u64;

/// Milliseconds since the Unix epoch.
pub type Timestamp = u64;

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

/// Converts a row-major flat index into coordinates on a board `width` cells wide.
pub const fn from_flat_index(index: CellCount, width: Coord) -> Coord2 {
    let width = width as CellCount;
    ((index % width) as Coord, (index / width) as Coord)
}

pub trait NeighborIterExt {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter;
}

impl<T> NeighborIterExt for Array2<T> {
    fn iter_neighbors(&self, center: Coord2) -> NeighborIter {
        let (x_len, y_len) = self.dim();
        let bounds = (
            Coord::try_from(x_len).unwrap_or(Coord::MAX),
            Coord::try_from(y_len).unwrap_or(Coord::MAX),
        );
        NeighborIter::new(center, bounds)
    }
}

/// Row by row, top-left first. Flood-fill push order depends on this.
const OFFSETS: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

fn offset(center: Coord2, (dx, dy): (i8, i8), bounds: Coord2) -> Option<Coord2> {
    let x = center.0.checked_add_signed(dx)?;
    let y = center.1.checked_add_signed(dy)?;
    (x < bounds.0 && y < bounds.1).then_some((x, y))
}

/// In-bounds 8-connected neighbours of a cell.
#[derive(Clone, Debug)]
pub struct NeighborIter {
    center: Coord2,
    bounds: Coord2,
    next: usize,
}

impl NeighborIter {
    pub fn new(center: Coord2, bounds: Coord2) -> Self {
        Self {
            center,
            bounds,
            next: 0,
        }
    }
}

impl Iterator for NeighborIter {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&delta) = OFFSETS.get(self.next) {
            self.next += 1;
            if let Some(coords) = offset(self.center, delta, self.bounds) {
                return Some(coords);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(OFFSETS.len() - self.next))
    }
}
