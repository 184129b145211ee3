use core::iter;
use smallvec::SmallVec;

use crate::*;

/// Cells that can never hold a mine: the start cell and its neighbours.
type Forbidden = SmallVec<[Coord2; 9]>;

/// Generation strategy keeping the first revealed tile and all of its neighbours free of mines, so the opening
/// move always lands on a zero. Other than that it is purely random, driven by the game's seeded generator.
#[derive(Debug)]
pub struct SafeStartGenerator<'a> {
    rng: &'a mut XorShift32,
    start: Coord2,
}

impl<'a> SafeStartGenerator<'a> {
    pub fn new(rng: &'a mut XorShift32, start: Coord2) -> Self {
        Self { rng, start }
    }

    /// Places mines on `board` and computes adjacent counts. Returns how many mines were actually placed, which is
    /// lower than `requested` when the board is too crowded to keep the start area clear.
    pub fn generate(self, board: &mut Board, requested: CellCount) -> CellCount {
        let total = board.total_cells();
        let (width, _) = board.size();
        let forbidden: Forbidden = iter::once(self.start)
            .chain(board.iter_neighbors(self.start))
            .collect();

        // at most 9 entries
        let mines = effective_mine_count(total, forbidden.len() as CellCount, requested);
        if mines != requested {
            log::warn!(
                "Cannot fit {} mines around a safe start at {:?}, placing {} instead",
                requested,
                self.start,
                mines
            );
        }

        let mut placed = 0;
        while placed < mines {
            let index = self.rng.next_scaled(total.into());
            // a draw of exactly 1.0 lands one past the last cell
            let Ok(index) = CellCount::try_from(index) else {
                continue;
            };
            if index >= total {
                log::trace!("Redrawing out of range index {}", index);
                continue;
            }

            let coords = from_flat_index(index, width);
            if forbidden.contains(&coords) || board[coords].is_mine() {
                continue;
            }
            board[coords].set_mine();
            placed += 1;
        }

        board.compute_adjacent_counts();
        log::debug!("Placed {} mines, safe start at {:?}", placed, self.start);
        mines
    }
}

/// Mine count after making room for a safe start of `forbidden` cells.
///
/// A request that would fill every eligible cell drops to one below that (but stays at least one), and the result
/// never exceeds the number of eligible cells, which is zero on boards of 3x3 or smaller.
pub fn effective_mine_count(total: CellCount, forbidden: CellCount, requested: CellCount) -> CellCount {
    let eligible = total.saturating_sub(forbidden);
    let mines = if requested >= eligible {
        eligible.saturating_sub(1).max(1)
    } else {
        requested
    };
    mines.min(eligible)
}
