//! Escalation (G1) state, score counters, and grading of suggestions.

use crate::outcome::{Side, Winner};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct EscalationState {
    pub escalation_active:  bool,
    pub pending_suggestion: Option<Side>,
}

impl EscalationState {
    /// The side escalation forces, if escalation is on and a side is pending.
    pub fn forced_side(&self) -> Option<Side> {
        self.pending_suggestion.filter(|_| self.escalation_active)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ScoreCounters {
    pub correct_count:   u32,
    pub incorrect_count: u32,
}

impl ScoreCounters {
    pub fn graded_count(&self) -> u32 {
        self.correct_count + self.incorrect_count
    }

    /// Percentage of graded suggestions that were correct.
    pub fn hit_rate(&self) -> Option<f64> {
        let graded = self.graded_count();
        (graded > 0).then(|| f64::from(self.correct_count) / f64::from(graded) * 100.0)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum GradeOutcome {
    Correct,
    Incorrect,
    /// The round tied; nothing changed.
    Void,
    /// Nothing was pending; nothing changed.
    NoPendingSuggestion,
}

/// Grade `suggested` against the round's actual winner.
///
/// A tie is void. A hit clears escalation and the pending side. A miss
/// turns escalation on and keeps the pending side as the next forced bet
/// (recording `suggested` as pending if nothing was).
pub fn grade(
    suggested:  Side,
    actual:     Winner,
    escalation: &mut EscalationState,
    scores:     &mut ScoreCounters,
) -> GradeOutcome {
    match actual.side() {
        None => GradeOutcome::Void,
        Some(side) if side == suggested => {
            scores.correct_count += 1;
            escalation.escalation_active = false;
            escalation.pending_suggestion = None;
            GradeOutcome::Correct
        }
        Some(_) => {
            scores.incorrect_count += 1;
            escalation.escalation_active = true;
            escalation.pending_suggestion.get_or_insert(suggested);
            GradeOutcome::Incorrect
        }
    }
}
