use chrono::{DateTime, Utc};
use core::fmt;
use seedsweeper_core::*;
use serde::{Deserialize, Serialize};

use crate::{HistoryError, Result};

/// Correlates a result with its logged moves; the millisecond time the game was created.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GameId(pub u64);

impl GameId {
    pub fn now(clock: &impl Clock) -> Self {
        Self(clock.now_millis())
    }
}

impl fmt::Display for GameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// How a recorded game ended
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    Won,
    Lost,
    Surrendered,
}

impl Outcome {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Won => "Win",
            Self::Lost => "Lose",
            Self::Surrendered => "Surrendered",
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A finished game as stored in the history, with enough data to replay it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub date: DateTime<Utc>,
    pub width: Coord,
    pub height: Coord,
    /// Mine count after placement, which is what a replay needs
    pub mines: CellCount,
    pub seconds: u32,
    pub victory: bool,
    #[serde(default)]
    pub player: String,
    #[serde(default)]
    pub seed: Option<Seed>,
    #[serde(default)]
    pub game_id: Option<GameId>,
    #[serde(default)]
    pub surrendered: bool,
}

impl GameRecord {
    pub fn from_game<C: Clock>(
        game: &Game<C>,
        game_id: GameId,
        player: &str,
        date: DateTime<Utc>,
    ) -> Self {
        if !game.is_game_over() {
            log::warn!("Recording game {} before it is over", game_id);
        }
        Self {
            date,
            width: game.width(),
            height: game.height(),
            mines: game.mine_count(),
            seconds: game.elapsed_secs(),
            victory: game.is_victory(),
            player: player.trim().to_owned(),
            seed: Some(game.seed()),
            game_id: Some(game_id),
            surrendered: game.state() == GameState::Surrendered,
        }
    }

    pub fn outcome(&self) -> Outcome {
        if self.surrendered {
            Outcome::Surrendered
        } else if self.victory {
            Outcome::Won
        } else {
            Outcome::Lost
        }
    }

    pub fn display_player(&self) -> &str {
        if self.player.is_empty() {
            "Anonymous"
        } else {
            &self.player
        }
    }

    pub fn size_label(&self) -> String {
        format!("{}×{}", self.width, self.height)
    }

    pub fn total_cells(&self) -> CellCount {
        mult(self.width, self.height)
    }

    pub fn config(&self) -> GameConfig {
        GameConfig::new((self.width, self.height), self.mines)
    }

    /// Sets up a replay of this game from its logged moves.
    pub fn replay(&self, moves: impl IntoIterator<Item = Move>) -> Result<Replay> {
        let seed = self.seed.ok_or(HistoryError::MissingSeed)?;
        Ok(Replay::new(self.config(), seed, moves))
    }
}

impl AsRef<GameRecord> for GameRecord {
    fn as_ref(&self) -> &GameRecord {
        self
    }
}
