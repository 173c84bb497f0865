//! Snapshot serialization: full session state to/from JSON.
//!
//! A snapshot is journaled every SNAPSHOT_INTERVAL recorded rounds.
//! It holds everything needed to resume the session from that round.

use crate::{
    session::SessionState,
    types::{RoundIndex, SessionId},
};
use serde::{Deserialize, Serialize};

pub const SNAPSHOT_INTERVAL: RoundIndex = 20;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionSnapshot {
    pub session_id: SessionId,
    pub round:      RoundIndex,
    pub state:      SessionState,
}
