//! Persisted game history: result records, their move logs, and replay of stored games.
//!
//! The storage engine itself is left to the embedding application; [`History`] is the serializable ledger it
//! loads and saves.

pub use error::*;
pub use history::*;
pub use record::*;
pub use sort::*;

mod error;
mod history;
mod record;
mod sort;
