use serde::{Deserialize, Serialize};

use crate::{Coord, Coord2, Timestamp};

#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MoveKind {
    Reveal,
    Flag,
}

/// One logged player action, serialized as `{"type", "t", "x", "y", "value"?}`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Move {
    Reveal {
        #[serde(rename = "t")]
        timestamp: Timestamp,
        x: Coord,
        y: Coord,
    },
    Flag {
        #[serde(rename = "t")]
        timestamp: Timestamp,
        x: Coord,
        y: Coord,
        /// Flag state after the toggle
        value: bool,
    },
}

impl Move {
    pub const fn reveal(timestamp: Timestamp, (x, y): Coord2) -> Self {
        Self::Reveal { timestamp, x, y }
    }

    pub const fn flag(timestamp: Timestamp, (x, y): Coord2, value: bool) -> Self {
        Self::Flag {
            timestamp,
            x,
            y,
            value,
        }
    }

    pub const fn kind(&self) -> MoveKind {
        match self {
            Self::Reveal { .. } => MoveKind::Reveal,
            Self::Flag { .. } => MoveKind::Flag,
        }
    }

    pub const fn timestamp(&self) -> Timestamp {
        match *self {
            Self::Reveal { timestamp, .. } | Self::Flag { timestamp, .. } => timestamp,
        }
    }

    pub const fn coords(&self) -> Coord2 {
        match *self {
            Self::Reveal { x, y, .. } | Self::Flag { x, y, .. } => (x, y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_wire_format() {
        let json = serde_json::to_value(Move::reveal(1_700_000_000_000, (3, 4))).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"type": "reveal", "t": 1_700_000_000_000u64, "x": 3, "y": 4})
        );
    }

    #[test]
    fn flag_wire_format_has_value() {
        let parsed: Move =
            serde_json::from_str(r#"{"type":"flag","t":5,"x":1,"y":2,"value":true}"#).unwrap();
        assert_eq!(parsed, Move::flag(5, (1, 2), true));
        assert_eq!(parsed.kind(), MoveKind::Flag);
        assert_eq!(parsed.coords(), (1, 2));
        assert_eq!(parsed.timestamp(), 5);
    }
}
