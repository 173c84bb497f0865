//! Trailing-window pattern detection over the ledger.
//!
//! Only three patterns exist, checked in a fixed order against the last
//! two or three winners. A tie anywhere inside a rule's window rules that
//! pattern out; a shorter window may still match.
//!
//! Order: Alternation, Streak-of-3 reversal, Streak-of-2. The 3-streak is
//! checked before the 2-streak because every 3-streak is also a 2-streak.

use crate::{
    ledger::Ledger,
    outcome::{Side, Winner},
    types::Confidence,
};
use serde::{Deserialize, Serialize};
use std::fmt;

pub const ALTERNATION_CONFIDENCE: Confidence = 70;
pub const STREAK_OF_TWO_CONFIDENCE: Confidence = 75;
pub const STREAK_OF_THREE_CONFIDENCE: Confidence = 80;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// Fewer than two rounds on the ledger.
    NoStrongPattern,
    Alternation,
    StreakOfTwo,
    StreakOfThreeReversal,
    /// Enough history, but nothing matched.
    AwaitingStrongPattern,
    /// Not produced by detection: the escalation override in `suggestion`.
    EscalationActive,
}

impl PatternKind {
    pub fn label(self) -> &'static str {
        match self {
            Self::NoStrongPattern       => "No strong pattern",
            Self::Alternation           => "Alternation",
            Self::StreakOfTwo           => "Streak of 2",
            Self::StreakOfThreeReversal => "Streak of 3 reversal",
            Self::AwaitingStrongPattern => "Awaiting strong pattern",
            Self::EscalationActive      => "Escalation active",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct PatternMatch {
    pub kind:       PatternKind,
    pub side:       Option<Side>,
    pub confidence: Confidence,
}

impl PatternMatch {
    fn none(kind: PatternKind) -> Self {
        Self { kind, side: None, confidence: 0 }
    }

    fn suggest(kind: PatternKind, side: Side, confidence: Confidence) -> Self {
        Self { kind, side: Some(side), confidence }
    }
}

/// Pure function of the ledger tail.
pub fn detect_pattern(ledger: &Ledger) -> PatternMatch {
    if ledger.len() < 2 {
        return PatternMatch::none(PatternKind::NoStrongPattern);
    }

    let last_two = sides(&ledger.tail_winners(2));
    if let Some(&[prev, last]) = last_two.as_deref() {
        if prev != last {
            return PatternMatch::suggest(
                PatternKind::Alternation,
                last.opposite(),
                ALTERNATION_CONFIDENCE,
            );
        }
    }

    if ledger.len() >= 3 {
        if let Some(side) = sides(&ledger.tail_winners(3)).and_then(|s| uniform(&s)) {
            return PatternMatch::suggest(
                PatternKind::StreakOfThreeReversal,
                side.opposite(),
                STREAK_OF_THREE_CONFIDENCE,
            );
        }
    }

    if let Some(side) = last_two.and_then(|s| uniform(&s)) {
        return PatternMatch::suggest(
            PatternKind::StreakOfTwo,
            side,
            STREAK_OF_TWO_CONFIDENCE,
        );
    }

    PatternMatch::none(PatternKind::AwaitingStrongPattern)
}

/// The window as sides, or `None` if it holds a tie.
fn sides(window: &[Winner]) -> Option<Vec<Side>> {
    window.iter().map(|w| w.side()).collect()
}

/// The single side every entry shares, if any.
fn uniform(window: &[Side]) -> Option<Side> {
    let first = *window.first()?;
    window.iter().all(|&s| s == first).then_some(first)
}
