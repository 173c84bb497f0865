//! Round tracker trait.
//!
//! RULE: Every piece of derived per-round state implements RoundTracker.
//! The session calls observe() on each tracker in a fixed order after
//! every append, and reset() on each of them when the session resets.
//! Trackers never read the ledger directly and never talk to each other.

use crate::outcome::RoundOutcome;

/// The contract every incremental tracker must fulfill.
pub trait RoundTracker {
    /// Unique stable name for this tracker.
    fn name(&self) -> &'static str;

    /// Called once per recorded round, after it has been appended.
    fn observe(&mut self, round: &RoundOutcome);

    /// Return to the initial, empty-session values.
    fn reset(&mut self);
}
