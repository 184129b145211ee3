use seedsweeper_core::GameError;
use thiserror::Error;

use crate::RecordId;

#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Malformed history data: {0}")]
    Json(#[from] serde_json::Error),
    #[error("No stored result with id {0}")]
    UnknownRecord(RecordId),
    #[error("Result has no seed and cannot be replayed")]
    MissingSeed,
    #[error("Stored move does not fit the board: {0}")]
    InvalidMove(#[from] GameError),
}

pub type Result<T> = core::result::Result<T, HistoryError>;
