//! Classify the current moment of a session as adverse, favorable or neutral.
//!
//! The four predicates are independent. Every one that holds is reported
//! in `flags`; `verdict` is the highest-priority one. Adverse outranks
//! favorable, and any adverse flag means no suggestion may be shown.

use crate::{
    config::ThresholdConfig,
    counters::CriticalTimingCounters,
    types::Confidence,
};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Listed in priority order.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
#[serde(rename_all = "snake_case")]
pub enum TimingFlag {
    AdverseEarlyTies,
    AdverseRepeatedLowRoll,
    FavorableTieDrought,
    FavorableHighConfidence,
}

impl TimingFlag {
    pub fn is_adverse(self) -> bool {
        matches!(self, Self::AdverseEarlyTies | Self::AdverseRepeatedLowRoll)
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::AdverseEarlyTies        => "Adverse - early ties",
            Self::AdverseRepeatedLowRoll  => "Adverse - repeated low roll",
            Self::FavorableTieDrought     => "Favorable - tie drought",
            Self::FavorableHighConfidence => "Favorable - high-confidence pattern",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimingVerdict {
    Adverse(TimingFlag),
    Favorable(TimingFlag),
    Neutral,
}

impl fmt::Display for TimingVerdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Adverse(flag) | Self::Favorable(flag) => f.write_str(flag.label()),
            Self::Neutral => f.write_str("Neutral"),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct TimingAssessment {
    pub verdict: TimingVerdict,
    pub flags:   Vec<TimingFlag>,
}

impl TimingAssessment {
    pub fn suppresses_suggestion(&self) -> bool {
        matches!(self.verdict, TimingVerdict::Adverse(_))
    }

    pub fn has(&self, flag: TimingFlag) -> bool {
        self.flags.contains(&flag)
    }
}

/// Pure. `confidence` is the one `suggest()` reported for this moment.
/// An empty ledger is always neutral.
pub fn assess_timing(
    counters:      &CriticalTimingCounters,
    ledger_length: usize,
    confidence:    Confidence,
    thresholds:    &ThresholdConfig,
) -> TimingAssessment {
    if ledger_length == 0 {
        return TimingAssessment { verdict: TimingVerdict::Neutral, flags: Vec::new() };
    }

    let checks = [
        (
            TimingFlag::AdverseEarlyTies,
            counters.recent_tie_pressure >= thresholds.early_tie_pressure
                && ledger_length <= thresholds.early_tie_window,
        ),
        (
            TimingFlag::AdverseRepeatedLowRoll,
            counters.consecutive_die_value_one_count >= thresholds.low_roll_streak,
        ),
        (
            TimingFlag::FavorableTieDrought,
            counters.rounds_since_last_tie > thresholds.tie_drought,
        ),
        (
            TimingFlag::FavorableHighConfidence,
            confidence > thresholds.favorable_confidence_threshold,
        ),
    ];

    let flags: Vec<TimingFlag> = checks
        .into_iter()
        .filter_map(|(flag, holds)| holds.then_some(flag))
        .collect();

    // `checks` is already in priority order.
    let verdict = match flags.first() {
        Some(&flag) if flag.is_adverse() => TimingVerdict::Adverse(flag),
        Some(&flag)                      => TimingVerdict::Favorable(flag),
        None                             => TimingVerdict::Neutral,
    };

    TimingAssessment { verdict, flags }
}
