use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use clock::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use moves::*;
pub use replay::*;
pub use rng::*;
pub use types::*;

mod board;
mod cell;
mod clock;
mod engine;
mod error;
mod generator;
mod moves;
mod replay;
mod rng;
mod types;

/// Board dimensions and mine count for one game.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    pub size: Coord2,
    pub mines: CellCount,
}

impl GameConfig {
    /// Smallest side offered by the settings form.
    pub const MIN_SIDE: Coord = 5;
    /// Largest side offered by the settings form.
    pub const MAX_SIDE: Coord = 50;
    pub const DEFAULT_SIDE: Coord = 10;
    pub const DEFAULT_MINES: CellCount = 15;

    pub const fn new_unchecked(size: Coord2, mines: CellCount) -> Self {
        Self { size, mines }
    }

    /// Keeps both sides non-zero and the mine count within `[1, total - 1]`.
    pub fn new((size_x, size_y): Coord2, mines: CellCount) -> Self {
        let size_x = size_x.max(1);
        let size_y = size_y.max(1);
        let max_mines = mult(size_x, size_y).saturating_sub(1).max(1);
        Self::new_unchecked((size_x, size_y), mines.clamp(1, max_mines))
    }

    /// Sanitizes raw settings input: missing or zero values fall back to the defaults, sides are clamped to
    /// `MIN_SIDE..=MAX_SIDE` and mines to `[1, total - 1]`.
    pub fn from_settings(width: Option<u32>, height: Option<u32>, mines: Option<u32>) -> Self {
        let side = |value: Option<u32>| {
            let value = value.filter(|&v| v != 0).unwrap_or(Self::DEFAULT_SIDE.into());
            // clamped into Coord range
            value.clamp(Self::MIN_SIDE.into(), Self::MAX_SIDE.into()) as Coord
        };
        let (width, height) = (side(width), side(height));
        let max_mines = mult(width, height) - 1;
        let mines = mines
            .filter(|&m| m != 0)
            .unwrap_or(Self::DEFAULT_MINES.into())
            .clamp(1, max_mines.into()) as CellCount;
        Self::new_unchecked((width, height), mines)
    }

    pub const fn width(&self) -> Coord {
        self.size.0
    }

    pub const fn height(&self) -> Coord {
        self.size.1
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.size.0, self.size.1)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells().saturating_sub(self.mines)
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new_unchecked(
            (Self::DEFAULT_SIDE, Self::DEFAULT_SIDE),
            Self::DEFAULT_MINES,
        )
    }
}
