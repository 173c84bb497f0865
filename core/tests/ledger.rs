//! Ledger, winner derivation, and critical-timing counter tests.

use bacbo_core::{
    config::TieDecay,
    counters::CriticalTimingCounters,
    error::EngineError,
    ledger::LedgerRow,
    outcome::{DicePair, RoundInput, Winner},
    session::SessionState,
};
use chrono::{NaiveDate, NaiveDateTime};

fn at(secs: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 1, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
        + chrono::Duration::seconds(secs as i64)
}

fn dice(player: [u8; 2], banker: [u8; 2]) -> RoundInput {
    RoundInput::from_faces(player, banker).expect("valid faces")
}

fn counters(state: &SessionState) -> (u32, u32, u32) {
    let c: &CriticalTimingCounters = &state.counters;
    (
        c.rounds_since_last_tie,
        c.recent_tie_pressure,
        c.consecutive_die_value_one_count,
    )
}

/// Indices are exactly 1..=n whatever mix of inputs was recorded.
#[test]
fn indices_are_contiguous_from_one() {
    let mut state = SessionState::default();
    let inputs = [
        dice([3, 4], [2, 2]),
        RoundInput::Winner(Winner::Tie),
        dice([1, 1], [6, 6]),
        RoundInput::Winner(Winner::Player),
        RoundInput::Winner(Winner::Banker),
        dice([5, 5], [5, 5]),
    ];
    for (i, input) in inputs.into_iter().enumerate() {
        let round = state.record_round(input, at(i as u32));
        assert_eq!(round.index as usize, i + 1, "record_round returned wrong index");
    }

    let indices: Vec<u32> = state.ledger.rounds().iter().map(|r| r.index).collect();
    assert_eq!(indices, (1..=6).collect::<Vec<u32>>());
    assert_eq!(state.ledger.next_index(), 7);
}

/// Every one of the 6^4 dice combinations derives the winner from the sums.
#[test]
fn winner_is_derived_from_pair_sums() {
    let mut state = SessionState::default();
    for p1 in 1..=6u8 {
        for p2 in 1..=6u8 {
            for b1 in 1..=6u8 {
                for b2 in 1..=6u8 {
                    let round = state.record_round(dice([p1, p2], [b1, b2]), at(0));
                    let (p, b) = (p1 + p2, b1 + b2);
                    let expected = if p == b {
                        Winner::Tie
                    } else if p > b {
                        Winner::Player
                    } else {
                        Winner::Banker
                    };
                    assert_eq!(
                        round.winner, expected,
                        "[{p1},{p2}] vs [{b1},{b2}] should be {expected:?}"
                    );
                    assert_eq!(round.player_sum, Some(p));
                    assert_eq!(round.banker_sum, Some(b));
                }
            }
        }
    }
    assert_eq!(state.ledger.len(), 1296);
}

#[test]
fn faces_outside_one_to_six_are_rejected() {
    for bad in [0u8, 7, 255] {
        match RoundInput::from_faces([bad, 3], [2, 2]) {
            Err(EngineError::InvalidDieValue { value }) => assert_eq!(value, bad),
            other => panic!("face {bad} should be rejected, got {other:?}"),
        }
    }
    assert!(DicePair::new(6, 1).is_ok());
}

#[test]
fn direct_winner_has_no_dice_fields() {
    let mut state = SessionState::default();
    let round = state.record_round(RoundInput::Winner(Winner::Banker), at(0));
    assert_eq!(round.player_dice, None);
    assert_eq!(round.banker_dice, None);
    assert_eq!(round.player_sum, None);
    assert_eq!(round.banker_sum, None);
    assert_eq!(round.winner, Winner::Banker);
}

#[test]
fn counters_follow_ties_and_low_rolls() {
    let mut state = SessionState::new(TieDecay::Decrement);

    // 3 vs 7, shows a 1.
    state.record_round(dice([1, 2], [3, 4]), at(0));
    assert_eq!(counters(&state), (1, 0, 1));

    // 5 vs 5 tie, shows a 1.
    state.record_round(dice([2, 3], [4, 1]), at(1));
    assert_eq!(counters(&state), (0, 1, 2));

    // Direct tie: no dice, so the low-roll streak is forced back to zero.
    state.record_round(RoundInput::Winner(Winner::Tie), at(2));
    assert_eq!(counters(&state), (0, 2, 0));

    // Non-tie without a 1 decays pressure by one.
    state.record_round(dice([6, 6], [2, 2]), at(3));
    assert_eq!(counters(&state), (1, 1, 0));

    state.record_round(RoundInput::Winner(Winner::Player), at(4));
    state.record_round(RoundInput::Winner(Winner::Player), at(5));
    assert_eq!(counters(&state), (3, 0, 0), "pressure must floor at zero");
}

#[test]
fn reset_decay_drops_tie_pressure_to_zero() {
    let mut state = SessionState::new(TieDecay::Reset);
    for i in 0..3 {
        state.record_round(RoundInput::Winner(Winner::Tie), at(i));
    }
    assert_eq!(state.counters.recent_tie_pressure, 3);

    state.record_round(RoundInput::Winner(Winner::Banker), at(3));
    assert_eq!(state.counters.recent_tie_pressure, 0);
    assert_eq!(state.counters.decay(), TieDecay::Reset);
}

#[test]
fn incremental_tally_matches_recount() {
    let mut state = SessionState::default();
    let winners = [
        Winner::Player, Winner::Banker, Winner::Tie, Winner::Player,
        Winner::Player, Winner::Tie, Winner::Banker,
    ];
    for (i, w) in winners.into_iter().enumerate() {
        state.record_round(RoundInput::Winner(w), at(i as u32));
    }
    assert_eq!(state.tally, state.ledger.tally());
    assert_eq!((state.tally.player, state.tally.banker, state.tally.tie), (3, 2, 2));
    assert_eq!(state.tally.total(), 7);
}

#[test]
fn export_renders_fixed_width_rows() {
    let mut state = SessionState::default();
    state.record_round(dice([3, 4], [2, 2]), at(0));
    state.record_round(RoundInput::Winner(Winner::Tie), at(30));

    let rows = state.export_ledger();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].player_dice, "[3,4]");
    assert_eq!(rows[0].banker_sum, "4");
    assert_eq!(rows[1].player_dice, "-");

    assert_eq!(rows[0].to_string(), "    1 | [3,4]  |  7 | [2,2]  |  4 | Player | 12:00:00");
    assert_eq!(rows[1].to_string(), "    2 | -      |  - | -      |  - | Tie    | 12:00:30");
    assert_eq!(
        LedgerRow::HEADER.find("Winner"),
        rows[0].to_string().find("Player"),
        "header must line up with the winner column"
    );
}
