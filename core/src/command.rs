use crate::outcome::Winner;
use serde::{Deserialize, Serialize};

/// Everything a presentation layer can ask the engine to do.
/// Variants may be added, never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(tag = "cmd", rename_all = "snake_case")]
pub enum SessionCommand {
    // ── Ledger ────────────────────────────────────
    RecordDice {
        player: [u8; 2],
        banker: [u8; 2],
    },
    RecordWinner {
        winner: Winner,
    },

    // ── Suggestions ───────────────────────────────
    Advise,
    Grade {
        actual: Winner,
    },

    // ── Session ───────────────────────────────────
    Reset,
}

impl SessionCommand {
    /// Stable name, used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Self::RecordDice { .. }   => "record_dice",
            Self::RecordWinner { .. } => "record_winner",
            Self::Advise              => "advise",
            Self::Grade { .. }        => "grade",
            Self::Reset               => "reset",
        }
    }
}
