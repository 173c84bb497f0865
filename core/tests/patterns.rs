//! Pattern detection and suggestion threshold tests.

use bacbo_core::{
    config::ThresholdConfig,
    grading::EscalationState,
    ledger::Ledger,
    outcome::{RoundInput, Side, Winner},
    pattern::{detect_pattern, PatternKind, PatternMatch},
    suggestion::{suggest, Suggestion},
};
use chrono::NaiveDate;

use Winner::{Banker as B, Player as P, Tie as T};

fn ledger_of(winners: &[Winner]) -> Ledger {
    let ts = NaiveDate::from_ymd_opt(2026, 1, 1).unwrap().and_hms_opt(0, 0, 0).unwrap();
    let mut ledger = Ledger::new();
    for &w in winners {
        ledger.append(RoundInput::Winner(w), ts);
    }
    ledger
}

fn matched(kind: PatternKind, side: Option<Side>, confidence: u8) -> PatternMatch {
    PatternMatch { kind, side, confidence }
}

#[test]
fn fewer_than_two_rounds_is_no_strong_pattern() {
    let none = matched(PatternKind::NoStrongPattern, None, 0);
    assert_eq!(detect_pattern(&ledger_of(&[])), none);
    assert_eq!(detect_pattern(&ledger_of(&[P])), none);
    assert_eq!(PatternKind::NoStrongPattern.label(), "No strong pattern");
}

/// Player then Banker: bet against the most recent winner.
#[test]
fn alternation_suggests_the_side_that_did_not_just_win() {
    assert_eq!(
        detect_pattern(&ledger_of(&[P, B])),
        matched(PatternKind::Alternation, Some(Side::Player), 70)
    );
    assert_eq!(
        detect_pattern(&ledger_of(&[T, B, P])),
        matched(PatternKind::Alternation, Some(Side::Banker), 70)
    );
}

#[test]
fn streak_of_two_suggests_continuation() {
    assert_eq!(
        detect_pattern(&ledger_of(&[P, P])),
        matched(PatternKind::StreakOfTwo, Some(Side::Player), 75)
    );
    // The 3-window is broken by B, the 2-window still matches.
    assert_eq!(
        detect_pattern(&ledger_of(&[P, B, B])),
        matched(PatternKind::StreakOfTwo, Some(Side::Banker), 75)
    );
}

#[test]
fn streak_of_three_suggests_reversal() {
    assert_eq!(
        detect_pattern(&ledger_of(&[B, B, B])),
        matched(PatternKind::StreakOfThreeReversal, Some(Side::Player), 80)
    );
    assert_eq!(
        detect_pattern(&ledger_of(&[B, P, P, P, P])),
        matched(PatternKind::StreakOfThreeReversal, Some(Side::Banker), 80)
    );
}

/// A tie inside the 3-window rules out the reversal but not the 2-streak.
#[test]
fn tie_disqualifies_only_the_window_it_sits_in() {
    assert_eq!(
        detect_pattern(&ledger_of(&[T, P, P])),
        matched(PatternKind::StreakOfTwo, Some(Side::Player), 75)
    );
    assert_eq!(
        detect_pattern(&ledger_of(&[P, P, T])),
        matched(PatternKind::AwaitingStrongPattern, None, 0)
    );
    assert_eq!(
        detect_pattern(&ledger_of(&[T, T])),
        matched(PatternKind::AwaitingStrongPattern, None, 0)
    );
}

#[test]
fn suggest_passes_patterns_at_or_above_threshold() {
    let thresholds = ThresholdConfig::default();
    let escalation = EscalationState::default();

    let s = suggest(&ledger_of(&[P, B]), &escalation, &thresholds);
    assert_eq!(
        s,
        Suggestion {
            pattern:    PatternKind::Alternation,
            side:       Some(Side::Player),
            confidence: 70,
            escalating: false,
        },
        "70 meets the default threshold of 70"
    );

    assert_eq!(suggest(&ledger_of(&[P]), &escalation, &thresholds), Suggestion::awaiting());
    assert_eq!(suggest(&ledger_of(&[]), &escalation, &thresholds), Suggestion::awaiting());
}

#[test]
fn raised_threshold_filters_weaker_patterns() {
    let thresholds = ThresholdConfig { suggestion_threshold: 76, ..ThresholdConfig::default() };
    let escalation = EscalationState::default();

    assert_eq!(suggest(&ledger_of(&[P, B]), &escalation, &thresholds), Suggestion::awaiting());
    assert_eq!(suggest(&ledger_of(&[P, P]), &escalation, &thresholds), Suggestion::awaiting());

    let s = suggest(&ledger_of(&[B, B, B]), &escalation, &thresholds);
    assert_eq!(s.side, Some(Side::Player));
    assert_eq!(s.confidence, 80);
}
