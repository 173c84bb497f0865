//! Critical-timing counters, updated incrementally on every append.

use crate::{
    config::TieDecay,
    outcome::RoundOutcome,
    tracker::RoundTracker,
};
use serde::{Deserialize, Serialize};

/// The face whose repeated appearance marks a bad stretch.
pub const LOW_ROLL_FACE: u8 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct CriticalTimingCounters {
    pub rounds_since_last_tie:           u32,
    pub recent_tie_pressure:             u32,
    pub consecutive_die_value_one_count: u32,
    /// Decay rule for `recent_tie_pressure`. Configuration, not state:
    /// reset() leaves it alone.
    #[serde(default)]
    decay: TieDecay,
}

impl CriticalTimingCounters {
    pub fn new(decay: TieDecay) -> Self {
        Self { decay, ..Self::default() }
    }

    pub fn decay(&self) -> TieDecay {
        self.decay
    }

    /// True when every counter is back at zero.
    pub fn is_initial(&self) -> bool {
        self.rounds_since_last_tie == 0
            && self.recent_tie_pressure == 0
            && self.consecutive_die_value_one_count == 0
    }
}

impl RoundTracker for CriticalTimingCounters {
    fn name(&self) -> &'static str { "critical_timing" }

    fn observe(&mut self, round: &RoundOutcome) {
        if round.winner.is_tie() {
            self.rounds_since_last_tie = 0;
            self.recent_tie_pressure += 1;
        } else {
            self.rounds_since_last_tie += 1;
            self.recent_tie_pressure = match self.decay {
                TieDecay::Decrement => self.recent_tie_pressure.saturating_sub(1),
                TieDecay::Reset     => 0,
            };
        }

        // A round entered without dice always breaks the low-roll streak.
        if round.has_dice() && round.shows_face(LOW_ROLL_FACE) {
            self.consecutive_die_value_one_count += 1;
        } else {
            self.consecutive_die_value_one_count = 0;
        }
    }

    fn reset(&mut self) {
        *self = Self::new(self.decay);
    }
}
