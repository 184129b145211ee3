use crate::*;

/// Outcome of applying one logged move.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ReplayStep {
    pub applied: Move,
    /// Cells whose visible state changed
    pub changed: Vec<Coord2>,
}

/// Re-applies a move log to a freshly seeded game.
///
/// Moves are ordered by timestamp (ties keep their logged order) and applied one at a time. Flag moves record the
/// resulting flag state, so they only toggle when the board disagrees with it.
#[derive(Debug)]
pub struct Replay<C: Clock = SystemClock> {
    game: Game<C>,
    moves: Vec<Move>,
    cursor: usize,
}

impl Replay<SystemClock> {
    pub fn new(config: GameConfig, seed: Seed, moves: impl IntoIterator<Item = Move>) -> Self {
        Self::with_clock(config, seed, moves, SystemClock)
    }
}

impl<C: Clock> Replay<C> {
    pub fn with_clock(
        config: GameConfig,
        seed: Seed,
        moves: impl IntoIterator<Item = Move>,
        clock: C,
    ) -> Self {
        let mut moves: Vec<_> = moves.into_iter().collect();
        moves.sort_by_key(Move::timestamp);
        log::debug!("Replaying {} moves with seed {}", moves.len(), seed);
        Self {
            game: Game::with_clock(config, Some(seed), clock),
            moves,
            cursor: 0,
        }
    }

    pub fn game(&self) -> &Game<C> {
        &self.game
    }

    pub fn into_game(self) -> Game<C> {
        self.game
    }

    pub fn moves(&self) -> &[Move] {
        &self.moves
    }

    /// Number of moves already applied.
    pub fn position(&self) -> usize {
        self.cursor
    }

    pub fn remaining(&self) -> usize {
        self.moves.len() - self.cursor
    }

    pub fn is_done(&self) -> bool {
        self.remaining() == 0
    }

    /// Applies the next move, `None` once all moves are applied.
    pub fn step(&mut self) -> Result<Option<ReplayStep>> {
        let Some(&next) = self.moves.get(self.cursor) else {
            return Ok(None);
        };
        self.cursor += 1;

        let changed = match next {
            Move::Reveal { x, y, .. } => self.game.reveal((x, y))?,
            Move::Flag { x, y, value, .. } => {
                let coords = self.game.board().validate_coords((x, y))?;
                let before = self.is_flagged(coords);
                if before != value {
                    self.game.toggle_flag(coords)?;
                }
                if self.is_flagged(coords) != before {
                    vec![coords]
                } else {
                    log::trace!("Flag at {:?} left at {}", coords, before);
                    Vec::new()
                }
            }
        };

        Ok(Some(ReplayStep {
            applied: next,
            changed,
        }))
    }

    /// Applies every remaining move.
    pub fn run_to_end(&mut self) -> Result<&Game<C>> {
        while self.step()?.is_some() {}
        Ok(&self.game)
    }

    /// Presents the final board of the recorded game: all mines are shown unless it was a victory.
    pub fn finish(&mut self, victory: bool) -> Vec<Coord2> {
        if victory {
            Vec::new()
        } else {
            self.game.reveal_all_mines()
        }
    }

    fn is_flagged(&self, coords: Coord2) -> bool {
        self.game.board()[coords].is_flagged()
    }
}
