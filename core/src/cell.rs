use serde::{Deserialize, Serialize};

/// One board position, including hidden information.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    is_mine: bool,
    adjacent_mines: u8,
    is_revealed: bool,
    is_flagged: bool,
}

impl Cell {
    pub const fn is_mine(self) -> bool {
        self.is_mine
    }

    /// Only meaningful for safe cells once mines are placed.
    pub const fn adjacent_mines(self) -> u8 {
        self.adjacent_mines
    }

    pub const fn is_revealed(self) -> bool {
        self.is_revealed
    }

    pub const fn is_flagged(self) -> bool {
        self.is_flagged
    }

    /// Neither revealed nor flagged, so a reveal may open it.
    pub const fn is_hidden(self) -> bool {
        !self.is_revealed && !self.is_flagged
    }

    pub(crate) fn set_mine(&mut self) {
        self.is_mine = true;
    }

    pub(crate) fn set_adjacent_mines(&mut self, count: u8) {
        self.adjacent_mines = count;
    }

    pub(crate) fn set_revealed(&mut self) {
        self.is_revealed = true;
    }

    pub(crate) fn toggle_flag(&mut self) -> bool {
        self.is_flagged = !self.is_flagged;
        self.is_flagged
    }

    /// Player-visible state, without the triggered-mine distinction.
    pub const fn view(self) -> CellView {
        match (self.is_revealed, self.is_mine, self.is_flagged) {
            (true, true, _) => CellView::Mine,
            (true, false, _) => CellView::Open(self.adjacent_mines),
            (false, _, true) => CellView::Flagged,
            (false, _, false) => CellView::Hidden,
        }
    }
}

/// What a renderer may show for a cell. Mines only appear once revealed or once the game is over.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    #[default]
    Hidden,
    Flagged,
    Open(u8),
    Mine,
    /// Flagged mine on a finished board
    FlaggedMine,
    Exploded,
}

impl CellView {
    pub const fn is_unrevealed(self) -> bool {
        matches!(self, Self::Hidden | Self::Flagged)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_cell_is_hidden() {
        let cell = Cell::default();
        assert!(cell.is_hidden());
        assert_eq!(cell.view(), CellView::Hidden);
    }

    #[test]
    fn hidden_mine_is_not_exposed() {
        let mut cell = Cell::default();
        cell.set_mine();
        assert_eq!(cell.view(), CellView::Hidden);
        cell.toggle_flag();
        assert_eq!(cell.view(), CellView::Flagged);
        cell.set_revealed();
        assert_eq!(cell.view(), CellView::Mine);
    }

    #[test]
    fn open_cell_shows_count() {
        let mut cell = Cell::default();
        cell.set_adjacent_mines(3);
        cell.set_revealed();
        assert_eq!(cell.view(), CellView::Open(3));
        assert!(!cell.view().is_unrevealed());
    }
}
