//! Combine escalation and pattern detection into one suggestion.

use crate::{
    config::ThresholdConfig,
    grading::EscalationState,
    ledger::Ledger,
    outcome::Side,
    pattern::{detect_pattern, PatternKind},
    types::Confidence,
};
use serde::{Deserialize, Serialize};

/// Confidence reported while escalation forces the pending side.
pub const ESCALATION_CONFIDENCE: Confidence = 100;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Suggestion {
    pub pattern:    PatternKind,
    pub side:       Option<Side>,
    pub confidence: Confidence,
    pub escalating: bool,
}

impl Suggestion {
    pub fn awaiting() -> Self {
        Self {
            pattern:    PatternKind::AwaitingStrongPattern,
            side:       None,
            confidence: 0,
            escalating: false,
        }
    }
}

/// Pure. Escalation with a pending side overrides pattern detection
/// unconditionally; otherwise a pattern is passed through only at or
/// above the configured emission threshold.
pub fn suggest(
    ledger:     &Ledger,
    escalation: &EscalationState,
    thresholds: &ThresholdConfig,
) -> Suggestion {
    if let Some(side) = escalation.forced_side() {
        return Suggestion {
            pattern:    PatternKind::EscalationActive,
            side:       Some(side),
            confidence: ESCALATION_CONFIDENCE,
            escalating: true,
        };
    }

    let found = detect_pattern(ledger);
    match found.side {
        Some(side) if found.confidence >= thresholds.suggestion_threshold => Suggestion {
            pattern:    found.kind,
            side:       Some(side),
            confidence: found.confidence,
            escalating: false,
        },
        _ => Suggestion::awaiting(),
    }
}
