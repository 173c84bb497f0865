//! Explicit per-session state and the operations on it.
//!
//! RULE: SessionState is the only owner of the ledger, the timing counters,
//! escalation and scores. Nothing here does I/O or reads the wall clock;
//! timestamps are passed in by the caller.

use crate::{
    config::{EngineConfig, ThresholdConfig, TieDecay},
    counters::CriticalTimingCounters,
    grading::{grade, EscalationState, GradeOutcome, ScoreCounters},
    ledger::{Ledger, LedgerRow, OutcomeTally},
    outcome::{RoundInput, RoundOutcome, Side, Winner},
    suggestion::{suggest, Suggestion},
    timing::{assess_timing, TimingAssessment},
    tracker::RoundTracker,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionState {
    pub ledger:     Ledger,
    pub counters:   CriticalTimingCounters,
    pub tally:      OutcomeTally,
    pub escalation: EscalationState,
    pub scores:     ScoreCounters,
    /// The side on screen that the next grade refers to. Set by `advise`,
    /// cleared when nothing is shown or once the bet is scored.
    #[serde(default)]
    pub awaiting_grade: Option<Side>,
}

/// What the presentation layer shows for the current moment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Advice {
    /// Computed suggestion, even when timing withholds it.
    pub suggestion: Suggestion,
    pub timing:     TimingAssessment,
}

impl Advice {
    /// The side to display, or `None` when there is nothing to show.
    pub fn shown_side(&self) -> Option<Side> {
        if self.timing.suppresses_suggestion() {
            None
        } else {
            self.suggestion.side
        }
    }
}

impl Default for SessionState {
    fn default() -> Self {
        Self::new(TieDecay::default())
    }
}

impl SessionState {
    pub fn new(tie_decay: TieDecay) -> Self {
        Self {
            ledger:     Ledger::new(),
            counters:   CriticalTimingCounters::new(tie_decay),
            tally:      OutcomeTally::default(),
            escalation: EscalationState::default(),
            scores:     ScoreCounters::default(),
            awaiting_grade: None,
        }
    }

    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.tie_decay)
    }

    /// Trackers in their fixed update order.
    fn trackers_mut(&mut self) -> [&mut dyn RoundTracker; 2] {
        [&mut self.counters, &mut self.tally]
    }

    /// Append a round and update every tracker. The only ledger mutator
    /// besides `reset`.
    pub fn record_round(&mut self, input: RoundInput, timestamp: NaiveDateTime) -> RoundOutcome {
        let round = self.ledger.append(input, timestamp).clone();
        for tracker in self.trackers_mut() {
            tracker.observe(&round);
            log::trace!("tracker {} observed round {}", tracker.name(), round.index);
        }
        log::debug!(
            "round {} recorded: winner={} since_tie={} tie_pressure={} low_rolls={}",
            round.index,
            round.winner,
            self.counters.rounds_since_last_tie,
            self.counters.recent_tie_pressure,
            self.counters.consecutive_die_value_one_count,
        );
        round
    }

    /// Pure.
    pub fn suggest(&self, thresholds: &ThresholdConfig) -> Suggestion {
        suggest(&self.ledger, &self.escalation, thresholds)
    }

    /// Pure.
    pub fn assess_timing(&self, confidence: u8, thresholds: &ThresholdConfig) -> TimingAssessment {
        assess_timing(&self.counters, self.ledger.len(), confidence, thresholds)
    }

    /// Pure. Suggestion plus timing, without touching the pending side.
    pub fn preview(&self, thresholds: &ThresholdConfig) -> Advice {
        let suggestion = self.suggest(thresholds);
        let timing = self.assess_timing(suggestion.confidence, thresholds);
        Advice { suggestion, timing }
    }

    /// Like `preview`, but a shown suggestion becomes the side awaiting a
    /// grade and the pending side escalation refers to. A withheld or absent
    /// suggestion leaves nothing to grade.
    pub fn advise(&mut self, thresholds: &ThresholdConfig) -> Advice {
        let advice = self.preview(thresholds);
        self.awaiting_grade = advice.shown_side();
        if let Some(side) = self.awaiting_grade {
            self.escalation.pending_suggestion = Some(side);
        }
        advice
    }

    /// Grade an explicit side against the actual winner.
    pub fn grade(&mut self, suggested: Side, actual: Winner) -> GradeOutcome {
        let outcome = grade(suggested, actual, &mut self.escalation, &mut self.scores);
        log::debug!(
            "graded {suggested} vs {actual}: {outcome:?} (correct={} incorrect={} escalation={})",
            self.scores.correct_count,
            self.scores.incorrect_count,
            self.escalation.escalation_active,
        );
        outcome
    }

    /// Grade the suggestion last shown by `advise`. A no-op when nothing
    /// is on screen. A void grade keeps the bet open for the next round.
    pub fn grade_pending(&mut self, actual: Winner) -> GradeOutcome {
        let Some(side) = self.awaiting_grade else {
            log::debug!("grade requested with no suggestion shown; ignored");
            return GradeOutcome::NoPendingSuggestion;
        };
        let outcome = self.grade(side, actual);
        if outcome != GradeOutcome::Void {
            self.awaiting_grade = None;
        }
        outcome
    }

    /// Clear everything back to a fresh session. The tie decay rule,
    /// being configuration, survives.
    pub fn reset(&mut self) {
        self.ledger.clear();
        for tracker in self.trackers_mut() {
            tracker.reset();
        }
        self.escalation = EscalationState::default();
        self.scores = ScoreCounters::default();
        self.awaiting_grade = None;
    }

    pub fn export_ledger(&self) -> Vec<LedgerRow> {
        self.ledger.export()
    }
}
