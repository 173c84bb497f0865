//! The append-only round ledger and its tabular export.

use crate::{
    outcome::{RoundInput, RoundOutcome, Winner},
    tracker::RoundTracker,
    types::RoundIndex,
};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Placeholder for fields a round recorded without dice does not have.
pub const MISSING_FIELD: &str = "-";

/// Ordered rounds, indexed 1..=n by insertion.
/// Never mutated in place: only appended to or cleared in full.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Ledger {
    rounds: Vec<RoundOutcome>,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a round with the next index and return it.
    pub fn append(&mut self, input: RoundInput, timestamp: NaiveDateTime) -> &RoundOutcome {
        let index = self.next_index();
        self.rounds.push(RoundOutcome::new(index, input, timestamp));
        &self.rounds[self.rounds.len() - 1]
    }

    pub fn next_index(&self) -> RoundIndex {
        self.rounds.len() as RoundIndex + 1
    }

    pub fn clear(&mut self) {
        self.rounds.clear();
    }

    pub fn len(&self) -> usize {
        self.rounds.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rounds.is_empty()
    }

    pub fn rounds(&self) -> &[RoundOutcome] {
        &self.rounds
    }

    pub fn last(&self) -> Option<&RoundOutcome> {
        self.rounds.last()
    }

    /// Winners of the last `n` rounds, oldest first.
    /// Shorter than `n` when the ledger is.
    pub fn tail_winners(&self, n: usize) -> Vec<Winner> {
        let start = self.rounds.len().saturating_sub(n);
        self.rounds[start..].iter().map(|r| r.winner).collect()
    }

    /// Recount every outcome from scratch.
    pub fn tally(&self) -> OutcomeTally {
        let mut tally = OutcomeTally::default();
        for round in &self.rounds {
            tally.observe(round);
        }
        tally
    }

    /// One fixed-width row per round, in ledger order.
    pub fn export(&self) -> Vec<LedgerRow> {
        self.rounds.iter().map(LedgerRow::from).collect()
    }
}

/// Running totals per winner, for the results panel.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct OutcomeTally {
    pub player: u32,
    pub banker: u32,
    pub tie:    u32,
}

impl OutcomeTally {
    pub fn total(&self) -> u32 {
        self.player + self.banker + self.tie
    }
}

impl RoundTracker for OutcomeTally {
    fn name(&self) -> &'static str { "outcome_tally" }

    fn observe(&mut self, round: &RoundOutcome) {
        match round.winner {
            Winner::Player => self.player += 1,
            Winner::Banker => self.banker += 1,
            Winner::Tie    => self.tie += 1,
        }
    }

    fn reset(&mut self) {
        *self = Self::default();
    }
}

/// A ledger entry flattened to text for an external table.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct LedgerRow {
    pub index:       RoundIndex,
    pub player_dice: String,
    pub player_sum:  String,
    pub banker_dice: String,
    pub banker_sum:  String,
    pub winner:      Winner,
    pub time:        String,
}

impl LedgerRow {
    pub const HEADER: &'static str =
        "  #   | Player | P  | Banker | B  | Winner | Time";
}

impl From<&RoundOutcome> for LedgerRow {
    fn from(round: &RoundOutcome) -> Self {
        fn text<T: ToString>(value: Option<T>) -> String {
            value.map_or_else(|| MISSING_FIELD.to_string(), |v| v.to_string())
        }
        Self {
            index:       round.index,
            player_dice: text(round.player_dice),
            player_sum:  text(round.player_sum),
            banker_dice: text(round.banker_dice),
            banker_sum:  text(round.banker_sum),
            winner:      round.winner,
            time:        round.timestamp.format("%H:%M:%S").to_string(),
        }
    }
}

impl fmt::Display for LedgerRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:>5} | {:<6} | {:>2} | {:<6} | {:>2} | {:<6} | {}",
            self.index,
            self.player_dice,
            self.player_sum,
            self.banker_dice,
            self.banker_sum,
            self.winner,
            self.time,
        )
    }
}
