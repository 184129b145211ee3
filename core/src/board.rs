use core::ops::{Index, IndexMut};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Rectangular grid of cells addressed by `(x, y)`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Board {
    cells: Array2<Cell>,
}

impl Board {
    /// All-default board without mines.
    pub fn new(size: Coord2) -> Self {
        Self {
            cells: Array2::default(size.to_nd_index()),
        }
    }

    /// Board with mines at the given coordinates and counts already computed.
    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        let mut board = Self::new(size);
        for &coords in mine_coords {
            let coords = board.validate_coords(coords)?;
            board[coords].set_mine();
        }
        board.compute_adjacent_counts();
        Ok(board)
    }

    pub fn size(&self) -> Coord2 {
        let (x_len, y_len) = self.cells.dim();
        // dimensions always come from a `Coord2`
        (x_len as Coord, y_len as Coord)
    }

    pub fn total_cells(&self) -> CellCount {
        let (width, height) = self.size();
        mult(width, height)
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        let size = self.size();
        if coords.0 < size.0 && coords.1 < size.1 {
            Ok(coords)
        } else {
            Err(GameError::OutOfBounds {
                x: coords.0,
                y: coords.1,
            })
        }
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Row-major iteration, matching the order of flat indices.
    pub fn iter_coords(&self) -> impl Iterator<Item = Coord2> + use<> {
        let (width, height) = self.size();
        (0..height).flat_map(move |y| (0..width).map(move |x| (x, y)))
    }

    pub fn mine_count(&self) -> CellCount {
        self.count_where(Cell::is_mine)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.count_where(Cell::is_revealed)
    }

    pub fn mine_coords(&self) -> Vec<Coord2> {
        self.iter_coords().filter(|&pos| self[pos].is_mine()).collect()
    }

    pub fn count_adjacent_mines(&self, coords: Coord2) -> u8 {
        // at most 8 neighbours
        self.iter_neighbors(coords)
            .filter(|&pos| self[pos].is_mine())
            .count() as u8
    }

    pub(crate) fn compute_adjacent_counts(&mut self) {
        for coords in self.iter_coords() {
            if self[coords].is_mine() {
                continue;
            }
            let count = self.count_adjacent_mines(coords);
            self[coords].set_adjacent_mines(count);
        }
    }

    /// Reveals every mine, returning the ones that were not revealed yet.
    pub(crate) fn reveal_mines(&mut self) -> Vec<Coord2> {
        let mut changed = Vec::new();
        for coords in self.iter_coords() {
            let cell = &mut self[coords];
            if cell.is_mine() && !cell.is_revealed() {
                cell.set_revealed();
                changed.push(coords);
            }
        }
        changed
    }

    fn count_where(&self, pred: impl Fn(Cell) -> bool) -> CellCount {
        // bounded by total_cells
        self.cells.iter().filter(|&&cell| pred(cell)).count() as CellCount
    }
}

impl Index<Coord2> for Board {
    type Output = Cell;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.cells[coords.to_nd_index()]
    }
}

impl IndexMut<Coord2> for Board {
    fn index_mut(&mut self, coords: Coord2) -> &mut Self::Output {
        &mut self.cells[coords.to_nd_index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjacent_counts_follow_mines() {
        let board = Board::from_mine_coords((3, 3), &[(0, 0), (2, 2)]).unwrap();

        assert_eq!(board[(1, 1)].adjacent_mines(), 2);
        assert_eq!(board[(1, 0)].adjacent_mines(), 1);
        assert_eq!(board[(2, 0)].adjacent_mines(), 0);
        assert_eq!(board.mine_count(), 2);
    }

    #[test]
    fn rejects_mines_outside_the_board() {
        assert_eq!(
            Board::from_mine_coords((2, 2), &[(2, 0)]),
            Err(GameError::OutOfBounds { x: 2, y: 0 })
        );
    }

    #[test]
    fn coords_iterate_row_by_row() {
        let board = Board::new((3, 2));
        let coords: Vec<_> = board.iter_coords().collect();
        assert_eq!(coords, vec![(0, 0), (1, 0), (2, 0), (0, 1), (1, 1), (2, 1)]);
        assert_eq!(board.total_cells(), 6);
    }

    #[test]
    fn reveal_mines_leaves_safe_cells_alone() {
        let mut board = Board::from_mine_coords((3, 1), &[(0, 0), (2, 0)]).unwrap();
        board[(2, 0)].set_revealed();

        assert_eq!(board.reveal_mines(), vec![(0, 0)]);
        assert!(!board[(1, 0)].is_revealed());
        assert_eq!(board.revealed_count(), 2);
    }
}
