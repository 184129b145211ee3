use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    /// No reveal yet, mines are not placed
    #[default]
    NotStarted,
    InProgress,
    Won,
    /// Revealed a mine
    Lost,
    /// Player gave up
    Surrendered,
}

impl GameState {
    pub const fn is_initial(self) -> bool {
        matches!(self, Self::NotStarted)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost | Self::Surrendered)
    }

    pub const fn is_victory(self) -> bool {
        matches!(self, Self::Won)
    }
}

/// Player-visible board state for renderers.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub size: Coord2,
    pub mine_count: CellCount,
    pub seed: Seed,
    pub state: GameState,
    pub cells: Array2<CellView>,
}

/// A single game session, from construction to a terminal state.
///
/// Mines are placed on the first reveal so that the opening click and its neighbours are always safe. Every
/// accepted action is appended to the move log; replaying that log against a game built with the same config and
/// seed reproduces the same board.
#[derive(Debug)]
pub struct Game<C: Clock = SystemClock> {
    config: GameConfig,
    board: Board,
    first_move_done: bool,
    state: GameState,
    cells_revealed: CellCount,
    flagged_count: CellCount,
    seed: Seed,
    rng: XorShift32,
    moves: Vec<Move>,
    triggered_mine: Option<Coord2>,
    started_at: Option<Timestamp>,
    ended_at: Option<Timestamp>,
    clock: C,
}

impl Game<SystemClock> {
    /// Without a seed, the current time in milliseconds is used.
    pub fn new(config: GameConfig, seed: Option<Seed>) -> Self {
        Self::with_clock(config, seed, SystemClock)
    }
}

impl<C: Clock> Game<C> {
    pub fn with_clock(config: GameConfig, seed: Option<Seed>, clock: C) -> Self {
        let config = GameConfig::new(config.size, config.mines);
        let seed = seed.unwrap_or_else(|| clock.now_millis());
        log::debug!(
            "New game {}x{} with {} mines, seed {}",
            config.width(),
            config.height(),
            config.mines,
            seed
        );
        Self {
            config,
            board: Board::new(config.size),
            first_move_done: false,
            state: GameState::default(),
            cells_revealed: 0,
            flagged_count: 0,
            seed,
            rng: XorShift32::new(seed),
            moves: Vec::new(),
            triggered_mine: None,
            started_at: None,
            ended_at: None,
            clock,
        }
    }

    /// Config with the effective mine count, which may drop when mines are placed.
    pub fn config(&self) -> GameConfig {
        self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size
    }

    pub fn width(&self) -> Coord {
        self.config.width()
    }

    pub fn height(&self) -> Coord {
        self.config.height()
    }

    pub fn mine_count(&self) -> CellCount {
        self.config.mines
    }

    pub fn seed(&self) -> Seed {
        self.seed
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_finished()
    }

    pub fn is_victory(&self) -> bool {
        self.state.is_victory()
    }

    pub fn first_move_done(&self) -> bool {
        self.first_move_done
    }

    pub fn cells_revealed(&self) -> CellCount {
        self.cells_revealed
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    /// The mine that ended the game, if it was lost by revealing one.
    pub fn triggered_mine(&self) -> Option<Coord2> {
        self.triggered_mine
    }

    /// How many mines have not been flagged yet, negative with too many flags
    pub fn mines_left(&self) -> isize {
        (self.config.mines as isize) - (self.flagged_count as isize)
    }

    /// Whole seconds since the first reveal, 0 before it. Stops counting once the game ends.
    pub fn elapsed_secs(&self) -> u32 {
        let Some(started_at) = self.started_at else {
            return 0;
        };
        let ended_at = self.ended_at.unwrap_or_else(|| self.clock.now_millis());
        (ended_at.saturating_sub(started_at) / 1000)
            .try_into()
            .unwrap_or(u32::MAX)
    }

    /// Mines stay hidden until the game is over.
    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let coords = self.board.validate_coords(coords)?;
        Ok(self.view_at(coords))
    }

    pub fn snapshot(&self) -> Snapshot {
        let mut cells: Array2<CellView> = Array2::default(self.size().to_nd_index());
        for coords in self.board.iter_coords() {
            cells[coords.to_nd_index()] = self.view_at(coords);
        }
        Snapshot {
            size: self.size(),
            mine_count: self.mine_count(),
            seed: self.seed,
            state: self.state,
            cells,
        }
    }

    /// Reveals a cell, flood-filling through zero cells.
    ///
    /// Returns the newly revealed cells in reveal order, starting with `coords`. The list is empty when the game is
    /// over or the cell is already revealed or flagged; such calls are not logged.
    pub fn reveal(&mut self, coords: Coord2) -> Result<Vec<Coord2>> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() || !self.board[coords].is_hidden() {
            return Ok(Vec::new());
        }

        if !self.first_move_done {
            self.place_mines(coords);
            self.first_move_done = true;
            self.mark_started();
        }

        let revealed = self.flood_reveal(coords);
        self.moves.push(Move::reveal(self.clock.now_millis(), coords));
        self.check_win_condition();
        Ok(revealed)
    }

    /// Flips the flag on a hidden cell, returning the new flag state. Returns `false` without logging anything
    /// when the game is over or the cell is revealed.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<bool> {
        let coords = self.board.validate_coords(coords)?;

        if self.state.is_finished() || self.board[coords].is_revealed() {
            return Ok(false);
        }

        let flagged = self.board[coords].toggle_flag();
        if flagged {
            self.flagged_count += 1;
        } else {
            self.flagged_count -= 1;
        }
        log::trace!("Flag at {:?} set to {}", coords, flagged);
        self.moves.push(Move::flag(self.clock.now_millis(), coords, flagged));
        Ok(flagged)
    }

    /// Gives up the game and reveals all mines, which are returned. Does nothing once the game is over.
    pub fn surrender(&mut self) -> Vec<Coord2> {
        if self.state.is_finished() {
            return Vec::new();
        }
        self.end_game(GameState::Surrendered);
        self.reveal_all_mines()
    }

    /// Marks every mine as revealed to present the final board, returning the mines that changed. Safe cells and
    /// the revealed-cell count are not touched.
    pub fn reveal_all_mines(&mut self) -> Vec<Coord2> {
        self.board.reveal_mines()
    }

    pub(crate) fn board(&self) -> &Board {
        &self.board
    }

    fn view_at(&self, coords: Coord2) -> CellView {
        let cell = self.board[coords];
        if self.triggered_mine == Some(coords) {
            CellView::Exploded
        } else if self.state.is_finished() && cell.is_mine() && !cell.is_revealed() {
            if cell.is_flagged() {
                CellView::FlaggedMine
            } else {
                CellView::Mine
            }
        } else {
            cell.view()
        }
    }

    fn place_mines(&mut self, safe: Coord2) {
        let placed =
            SafeStartGenerator::new(&mut self.rng, safe).generate(&mut self.board, self.config.mines);
        self.config.mines = placed;
    }

    fn flood_reveal(&mut self, start: Coord2) -> Vec<Coord2> {
        let mut revealed = Vec::new();
        let mut stack = vec![start];

        while let Some(coords) = stack.pop() {
            if !self.board[coords].is_hidden() {
                continue;
            }

            self.board[coords].set_revealed();
            revealed.push(coords);
            self.cells_revealed += 1;
            let cell = self.board[coords];

            if cell.is_mine() {
                // zero cells have no mine neighbours, so only the clicked cell can be a mine
                debug_assert_eq!(coords, start, "flood fill reached a mine");
                if coords != start {
                    log::error!("Flood fill from {:?} reached a mine at {:?}", start, coords);
                }
                log::debug!("Revealed mine at {:?}", coords);
                self.triggered_mine = Some(coords);
                self.end_game(GameState::Lost);
                break;
            }

            if cell.adjacent_mines() == 0 {
                let board = &self.board;
                stack.extend(board.iter_neighbors(coords).filter(|&pos| {
                    let neighbor = board[pos];
                    neighbor.is_hidden() && !neighbor.is_mine()
                }));
            }
        }

        log::trace!("Reveal at {:?} opened {} cells", start, revealed.len());
        revealed
    }

    fn check_win_condition(&mut self) {
        if !self.state.is_finished() && self.cells_revealed >= self.config.safe_cells() {
            self.end_game(GameState::Won);
        }
    }

    fn mark_started(&mut self) {
        if self.state.is_initial() {
            let now = self.clock.now_millis();
            log::debug!("started at {}", now);
            self.started_at = Some(now);
            self.state = GameState::InProgress;
        }
    }

    fn end_game(&mut self, state: GameState) {
        if self.state.is_finished() {
            return;
        }
        let now = self.clock.now_millis();
        log::debug!("{:?} at {}", state, now);
        self.state = state;
        self.ended_at = Some(now);
    }
}
