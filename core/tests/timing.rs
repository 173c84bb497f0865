//! Timing assessment tests: adverse, favorable, neutral, and suppression.

use bacbo_core::{
    config::ThresholdConfig,
    counters::CriticalTimingCounters,
    outcome::{RoundInput, Winner},
    session::SessionState,
    timing::{assess_timing, TimingFlag, TimingVerdict},
};
use chrono::{NaiveDate, NaiveDateTime};

fn ts() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap()
}

fn record_winners(state: &mut SessionState, winners: impl IntoIterator<Item = Winner>) {
    for w in winners {
        state.record_round(RoundInput::Winner(w), ts());
    }
}

fn alternating(n: usize) -> impl Iterator<Item = Winner> {
    (0..n).map(|i| if i % 2 == 0 { Winner::Player } else { Winner::Banker })
}

#[test]
fn empty_ledger_is_neutral() {
    let state = SessionState::default();
    let advice = state.preview(&ThresholdConfig::default());
    assert_eq!(advice.timing.verdict, TimingVerdict::Neutral);
    assert!(advice.timing.flags.is_empty());
    assert_eq!(advice.shown_side(), None);
}

/// Five rounds in a row showing a 1: adverse, and the suggestion is withheld.
#[test]
fn repeated_low_roll_is_adverse_and_suppresses() {
    let thresholds = ThresholdConfig::default();
    let mut state = SessionState::default();
    for _ in 0..5 {
        let round = RoundInput::from_faces([1, 6], [2, 2]).unwrap();
        state.record_round(round, ts());
    }
    assert_eq!(state.counters.consecutive_die_value_one_count, 5);

    let advice = state.advise(&thresholds);
    assert_eq!(
        advice.timing.verdict,
        TimingVerdict::Adverse(TimingFlag::AdverseRepeatedLowRoll)
    );
    assert!(advice.timing.suppresses_suggestion());
    assert!(advice.suggestion.side.is_some(), "the pattern still exists underneath");
    assert_eq!(advice.shown_side(), None);
    assert_eq!(
        state.escalation.pending_suggestion, None,
        "a withheld suggestion must not become pending"
    );
}

#[test]
fn four_low_rolls_are_not_enough() {
    let mut state = SessionState::default();
    for _ in 0..4 {
        state.record_round(RoundInput::from_faces([1, 6], [2, 2]).unwrap(), ts());
    }
    let advice = state.preview(&ThresholdConfig::default());
    assert!(!advice.timing.has(TimingFlag::AdverseRepeatedLowRoll));
}

#[test]
fn early_tie_cluster_is_adverse() {
    let mut state = SessionState::default();
    record_winners(&mut state, [Winner::Tie; 3]);

    let advice = state.preview(&ThresholdConfig::default());
    assert_eq!(advice.timing.verdict, TimingVerdict::Adverse(TimingFlag::AdverseEarlyTies));
}

/// Past the early window a tie cluster no longer counts.
#[test]
fn tie_cluster_outside_early_window_is_not_adverse() {
    let mut state = SessionState::default();
    record_winners(&mut state, [Winner::Tie; 16]);
    assert_eq!(state.counters.recent_tie_pressure, 16);

    let advice = state.preview(&ThresholdConfig::default());
    assert!(!advice.timing.has(TimingFlag::AdverseEarlyTies));
    assert_eq!(advice.timing.verdict, TimingVerdict::Neutral);
}

#[test]
fn decayed_tie_pressure_clears_the_warning() {
    let mut state = SessionState::default();
    record_winners(&mut state, [Winner::Tie, Winner::Tie, Winner::Tie, Winner::Player]);
    assert_eq!(state.counters.recent_tie_pressure, 2);

    let advice = state.preview(&ThresholdConfig::default());
    assert!(!advice.timing.suppresses_suggestion());
}

#[test]
fn long_tie_drought_is_favorable() {
    let thresholds = ThresholdConfig::default();

    let mut state = SessionState::default();
    record_winners(&mut state, alternating(15));
    assert!(!state.preview(&thresholds).timing.has(TimingFlag::FavorableTieDrought));

    record_winners(&mut state, alternating(1));
    let advice = state.preview(&thresholds);
    assert_eq!(
        advice.timing.verdict,
        TimingVerdict::Favorable(TimingFlag::FavorableTieDrought)
    );
    assert!(advice.shown_side().is_some());
}

#[test]
fn high_confidence_is_favorable_only_above_ninety() {
    let thresholds = ThresholdConfig::default();
    let counters = CriticalTimingCounters::default();

    let at_100 = assess_timing(&counters, 1, 100, &thresholds);
    assert_eq!(
        at_100.verdict,
        TimingVerdict::Favorable(TimingFlag::FavorableHighConfidence)
    );
    assert_eq!(assess_timing(&counters, 1, 90, &thresholds).verdict, TimingVerdict::Neutral);
}

/// Adverse outranks favorable even when both hold.
#[test]
fn adverse_takes_priority_over_favorable() {
    let mut state = SessionState::default();
    for _ in 0..16 {
        // 7 vs 3, no ties, a 1 every round.
        state.record_round(RoundInput::from_faces([1, 6], [1, 2]).unwrap(), ts());
    }

    let advice = state.preview(&ThresholdConfig::default());
    assert_eq!(
        advice.timing.flags,
        vec![TimingFlag::AdverseRepeatedLowRoll, TimingFlag::FavorableTieDrought]
    );
    assert_eq!(
        advice.timing.verdict,
        TimingVerdict::Adverse(TimingFlag::AdverseRepeatedLowRoll)
    );
    assert_eq!(advice.shown_side(), None);
}
