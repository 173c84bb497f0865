//! Round ledger and suggestion engine for a two-pair dice comparison game.
//!
//! The pure core lives in `session`, `ledger`, `counters`, `pattern`,
//! `suggestion`, `grading` and `timing`. `engine` wraps it with commands,
//! events and an in-memory journal for an embedding presentation layer.

pub mod clock;
pub mod command;
pub mod config;
pub mod counters;
pub mod engine;
pub mod error;
pub mod event;
pub mod grading;
pub mod ledger;
pub mod outcome;
pub mod pattern;
pub mod rng;
pub mod session;
pub mod snapshot;
pub mod store;
pub mod suggestion;
pub mod timing;
pub mod tracker;
pub mod types;
