//! Round clock, the timestamp source for recorded rounds.
//!
//! Timestamps are informational only. The wall clock is for live sessions;
//! the stepped clock makes simulations and tests reproducible.

use chrono::{Duration, Local, NaiveDateTime};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum RoundClock {
    /// Local wall-clock time.
    #[default]
    Wall,
    /// Starts at `next` and advances `step_secs` per reading.
    Stepped { next: NaiveDateTime, step_secs: i64 },
}

impl RoundClock {
    pub fn stepped(start: NaiveDateTime, step_secs: i64) -> Self {
        Self::Stepped { next: start, step_secs }
    }

    /// Read the clock. Stepped clocks advance on every read.
    pub fn now(&mut self) -> NaiveDateTime {
        match self {
            Self::Wall => Local::now().naive_local(),
            Self::Stepped { next, step_secs } => {
                let current = *next;
                *next = current + Duration::seconds(*step_secs);
                current
            }
        }
    }
}
