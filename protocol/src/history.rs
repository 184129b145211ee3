use core::fmt;
use seedsweeper_core::{Game, Move, Replay};
use serde::{Deserialize, Serialize};

use crate::*;

/// Auto-incremented key of a stored result, starting at 1. Ids are never reused, not even after a clear.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RecordId(pub u64);

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredResult {
    pub id: RecordId,
    #[serde(flatten)]
    pub record: GameRecord,
}

impl StoredResult {
    /// Key the moves of this result are stored under. Older results without a game id used their own id.
    pub fn moves_key(&self) -> GameId {
        self.record.game_id.unwrap_or(GameId(self.id.0))
    }
}

impl AsRef<GameRecord> for StoredResult {
    fn as_ref(&self) -> &GameRecord {
        &self.record
    }
}

/// One logged move tagged with the game it belongs to, serialized as `{"id", "gameId", ...move}`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredMove {
    pub id: u64,
    pub game_id: GameId,
    #[serde(flatten)]
    pub logged: Move,
}

/// Finished games and their move logs.
///
/// Moves are usually added while a game is in progress and the result once it ends, both keyed by the game's
/// [`GameId`]. The ledger round-trips through JSON so any storage backend can persist it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    #[serde(default)]
    results: Vec<StoredResult>,
    #[serde(default)]
    moves: Vec<StoredMove>,
    /// Last ids handed out, kept across `clear`
    #[serde(default)]
    last_result_id: u64,
    #[serde(default)]
    last_move_id: u64,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn len(&self) -> usize {
        self.results.len()
    }

    pub fn is_empty(&self) -> bool {
        self.results.is_empty()
    }

    pub fn save_result(&mut self, record: GameRecord) -> RecordId {
        let stored_max = self.results.iter().map(|r| r.id.0).max().unwrap_or(0);
        self.last_result_id = self.last_result_id.max(stored_max) + 1;
        let id = RecordId(self.last_result_id);
        log::debug!(
            "Saving result {} ({}, {} seconds)",
            id,
            record.outcome(),
            record.seconds
        );
        self.results.push(StoredResult { id, record });
        id
    }

    pub fn result(&self, id: RecordId) -> Option<&StoredResult> {
        self.results.iter().find(|stored| stored.id == id)
    }

    /// All results, newest first.
    pub fn results(&self) -> Vec<&StoredResult> {
        self.sorted_results(HistorySort::default())
    }

    pub fn sorted_results(&self, sort: HistorySort) -> Vec<&StoredResult> {
        let mut results: Vec<_> = self.results.iter().collect();
        sort.sort(&mut results);
        results
    }

    /// Removes every result and every move. Id counters keep counting.
    pub fn clear(&mut self) {
        log::debug!(
            "Clearing {} results and {} moves",
            self.results.len(),
            self.moves.len()
        );
        self.results.clear();
        self.moves.clear();
    }

    pub fn add_move(&mut self, game_id: GameId, logged: Move) {
        let stored_max = self.moves.iter().map(|stored| stored.id).max().unwrap_or(0);
        self.last_move_id = self.last_move_id.max(stored_max) + 1;
        let id = self.last_move_id;
        self.moves.push(StoredMove {
            id,
            game_id,
            logged,
        });
    }

    pub fn add_moves(&mut self, game_id: GameId, moves: impl IntoIterator<Item = Move>) {
        for logged in moves {
            self.add_move(game_id, logged);
        }
    }

    /// Moves of one game in the order they were added.
    pub fn moves_for(&self, game_id: GameId) -> Vec<Move> {
        self.moves
            .iter()
            .filter(|stored| stored.game_id == game_id)
            .map(|stored| stored.logged)
            .collect()
    }

    /// Rebuilds a stored game from its seed and logged moves.
    pub fn replay(&self, id: RecordId) -> Result<Replay> {
        let stored = self.result(id).ok_or(HistoryError::UnknownRecord(id))?;
        let moves = self.moves_for(stored.moves_key());
        if moves.is_empty() {
            log::warn!("Result {} has no logged moves", id);
        }
        stored.record.replay(moves)
    }

    /// Replays a stored game completely and presents its final board.
    pub fn replay_to_end(&self, id: RecordId) -> Result<Game> {
        let mut replay = self.replay(id)?;
        replay.run_to_end()?;
        let victory = self.result(id).is_some_and(|stored| stored.record.victory);
        replay.finish(victory);
        Ok(replay.into_game())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use seedsweeper_core::*;

    fn play_and_store(history: &mut History, seed: Seed, game_id: GameId, at: i64) -> RecordId {
        let mut game = Game::with_clock(
            GameConfig::new((8, 8), 10),
            Some(seed),
            SteppingClock::new(game_id.0, 250),
        );
        game.toggle_flag((7, 7)).unwrap();
        game.reveal((4, 4)).unwrap();
        game.toggle_flag((7, 7)).unwrap();
        for y in 0..8 {
            game.reveal((0, y)).unwrap();
        }
        if !game.is_game_over() {
            game.surrender();
        }

        history.add_moves(game_id, game.moves().iter().copied());
        let date = DateTime::from_timestamp(at, 0).unwrap();
        history.save_result(GameRecord::from_game(&game, game_id, "tester", date))
    }

    #[test]
    fn ids_increment_from_one() {
        let mut history = History::new();

        assert_eq!(play_and_store(&mut history, 1, GameId(100), 10), RecordId(1));
        assert_eq!(play_and_store(&mut history, 2, GameId(200), 20), RecordId(2));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn ids_are_not_reused_after_clear() {
        let mut history = History::new();
        play_and_store(&mut history, 1, GameId(100), 10);
        let moves_before = history.moves.len() as u64;

        history.clear();
        history.add_move(GameId(200), Move::reveal(1, (0, 0)));

        assert_eq!(play_and_store(&mut history, 2, GameId(300), 20), RecordId(2));
        assert_eq!(history.moves[0].id, moves_before + 1);

        let restored = History::from_json(&history.to_json().unwrap()).unwrap();
        assert_eq!(restored.last_result_id, 2);
    }

    #[test]
    fn ledger_without_counters_continues_after_stored_ids() {
        let json = r#"{
            "results": [{"id": 7, "date": "2024-05-01T10:00:00Z", "width": 8, "height": 8,
                         "mines": 10, "seconds": 3, "victory": false}],
            "moves": [{"id": 12, "gameId": 7, "type": "reveal", "t": 1, "x": 0, "y": 0}]
        }"#;
        let mut history = History::from_json(json).unwrap();

        assert_eq!(play_and_store(&mut history, 1, GameId(100), 10), RecordId(8));
        assert_eq!(history.moves[1].id, 13);
    }

    #[test]
    fn results_are_newest_first() {
        let mut history = History::new();
        play_and_store(&mut history, 1, GameId(100), 30);
        play_and_store(&mut history, 2, GameId(200), 10);
        play_and_store(&mut history, 3, GameId(300), 20);

        let ids: Vec<_> = history.results().iter().map(|stored| stored.id).collect();

        assert_eq!(ids, vec![RecordId(1), RecordId(3), RecordId(2)]);
    }

    #[test]
    fn moves_are_kept_per_game() {
        let mut history = History::new();
        history.add_move(GameId(1), Move::reveal(10, (0, 0)));
        history.add_move(GameId(2), Move::reveal(11, (1, 1)));
        history.add_move(GameId(1), Move::flag(12, (2, 2), true));

        assert_eq!(
            history.moves_for(GameId(1)),
            vec![Move::reveal(10, (0, 0)), Move::flag(12, (2, 2), true)]
        );
        assert!(history.moves_for(GameId(3)).is_empty());
    }

    #[test]
    fn clear_drops_results_and_moves() {
        let mut history = History::new();
        play_and_store(&mut history, 1, GameId(100), 10);

        history.clear();

        assert!(history.is_empty());
        assert!(history.moves_for(GameId(100)).is_empty());
    }

    #[test]
    fn replay_matches_the_stored_game() {
        let mut history = History::new();
        let id = play_and_store(&mut history, 5, GameId(1_000), 10);
        let stored = history.result(id).unwrap().clone();

        let mut replay = history.replay(id).unwrap();
        let game = replay.run_to_end().unwrap();

        assert_eq!(game.state().is_victory(), stored.record.victory);
        assert_eq!(game.mine_count(), stored.record.mines);
        assert_eq!(game.moves().len(), history.moves_for(GameId(1_000)).len());
    }

    #[test]
    fn replay_to_end_shows_mines_of_lost_games() {
        let mut history = History::new();
        let id = play_and_store(&mut history, 1, GameId(100), 10);

        let game = history.replay_to_end(id).unwrap();

        assert!(!game.is_victory());
        let mines_shown = game
            .snapshot()
            .cells
            .iter()
            .filter(|view| matches!(view, CellView::Mine | CellView::Exploded))
            .count();
        assert_eq!(mines_shown, 10);
    }

    #[test]
    fn replay_with_bad_move_fails() {
        let mut history = History::new();
        let id = play_and_store(&mut history, 1, GameId(100), 10);
        history.add_move(GameId(100), Move::reveal(u64::MAX, (20, 0)));

        assert!(matches!(
            history.replay_to_end(id),
            Err(HistoryError::InvalidMove(GameError::OutOfBounds { x: 20, y: 0 }))
        ));
    }

    #[test]
    fn replay_of_unknown_record_fails() {
        let history = History::new();
        assert!(matches!(
            history.replay(RecordId(4)),
            Err(HistoryError::UnknownRecord(RecordId(4)))
        ));
    }

    #[test]
    fn results_without_game_id_use_their_own_id() {
        let mut history = History::new();
        let id = play_and_store(&mut history, 1, GameId(1), 10);
        history.results[0].record.game_id = None;

        assert_eq!(history.result(id).unwrap().moves_key(), GameId(1));
        assert!(history.replay(id).is_ok());
    }

    #[test]
    fn json_roundtrip_keeps_everything() {
        let mut history = History::new();
        play_and_store(&mut history, 9, GameId(55), 10);

        let json = history.to_json().unwrap();
        let restored = History::from_json(&json).unwrap();

        assert_eq!(restored, history);
    }

    #[test]
    fn stored_move_is_flat() {
        let stored = StoredMove {
            id: 3,
            game_id: GameId(8),
            logged: Move::flag(99, (1, 2), false),
        };

        let value = serde_json::to_value(stored).unwrap();

        assert_eq!(
            value,
            serde_json::json!({"id": 3, "gameId": 8, "type": "flag", "t": 99, "x": 1, "y": 2, "value": false})
        );
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(
            History::from_json("{\"results\": 5}"),
            Err(HistoryError::Json(_))
        ));
    }
}
