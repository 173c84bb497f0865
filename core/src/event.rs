//! Session events: the record of every state change.
//!
//! RULE: Every mutation the engine performs is reported as an event.
//! The presentation layer re-renders from events and queries; it never
//! reaches into engine internals.

use crate::{
    grading::GradeOutcome,
    outcome::{Side, Winner},
    pattern::PatternKind,
    timing::TimingVerdict,
    types::{Confidence, RoundIndex, SessionId},
};
use serde::{Deserialize, Serialize};

/// Variants may be added, never removed or reordered.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SessionEvent {
    // ── Session events ─────────────────────────────
    SessionStarted {
        session_id: SessionId,
    },
    SessionReset {
        rounds_cleared: usize,
    },

    // ── Ledger events ──────────────────────────────
    RoundRecorded {
        index:       RoundIndex,
        winner:      Winner,
        player_sum:  Option<u8>,
        banker_sum:  Option<u8>,
        timestamp:   String,
    },

    // ── Suggestion events ──────────────────────────
    SuggestionIssued {
        pattern:    PatternKind,
        side:       Side,
        confidence: Confidence,
        escalating: bool,
        timing:     TimingVerdict,
    },
    SuggestionWithheld {
        pattern:    PatternKind,
        confidence: Confidence,
        timing:     TimingVerdict,
    },
    SuggestionGraded {
        actual:            Winner,
        outcome:           GradeOutcome,
        correct_count:     u32,
        incorrect_count:   u32,
        escalation_active: bool,
    },

    // ── Snapshot events ────────────────────────────
    SessionRestored {
        round: RoundIndex,
    },
}

impl SessionEvent {
    /// Stable name for the event_type column of the journal.
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::SessionStarted { .. }     => "session_started",
            Self::SessionReset { .. }       => "session_reset",
            Self::RoundRecorded { .. }      => "round_recorded",
            Self::SuggestionIssued { .. }   => "suggestion_issued",
            Self::SuggestionWithheld { .. } => "suggestion_withheld",
            Self::SuggestionGraded { .. }   => "suggestion_graded",
            Self::SessionRestored { .. }    => "session_restored",
        }
    }
}

/// The journal entry as persisted to SQLite.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EventLogEntry {
    pub id:         Option<i64>,
    pub session_id: SessionId,
    pub seq:        u64,
    pub round:      RoundIndex,
    pub event_type: String,
    pub payload:    String, // JSON-serialized SessionEvent
}
