use core::cmp::Ordering;
use serde::{Deserialize, Serialize};

use crate::GameRecord;

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortColumn {
    Player,
    #[default]
    Date,
    /// Board area, width times height
    Size,
    Mines,
    Seconds,
    Victory,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortDirection {
    #[serde(rename = "asc")]
    Ascending,
    #[default]
    #[serde(rename = "desc")]
    Descending,
}

impl SortDirection {
    pub const fn reversed(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }
}

/// Ordering of the history table, newest first by default.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistorySort {
    pub column: SortColumn,
    pub direction: SortDirection,
}

impl HistorySort {
    pub const fn new(column: SortColumn, direction: SortDirection) -> Self {
        Self { column, direction }
    }

    /// Clicking the current column flips the direction, a new column starts descending.
    pub fn select(&mut self, column: SortColumn) {
        if self.column == column {
            self.direction = self.direction.reversed();
        } else {
            self.column = column;
            self.direction = SortDirection::Descending;
        }
    }

    pub fn compare(&self, a: &GameRecord, b: &GameRecord) -> Ordering {
        use SortColumn::*;

        let ordering = match self.column {
            Player => a.player.cmp(&b.player),
            Date => a.date.cmp(&b.date),
            Size => a.total_cells().cmp(&b.total_cells()),
            Mines => a.mines.cmp(&b.mines),
            Seconds => a.seconds.cmp(&b.seconds),
            Victory => a.victory.cmp(&b.victory),
        };
        match self.direction {
            SortDirection::Ascending => ordering,
            SortDirection::Descending => ordering.reverse(),
        }
    }

    /// Stable sort, records comparing equal keep their order.
    pub fn sort<T: AsRef<GameRecord>>(&self, records: &mut [T]) {
        records.sort_by(|a, b| self.compare(a.as_ref(), b.as_ref()));
    }
}
