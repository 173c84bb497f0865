//! Shared primitive types used across the entire engine.

/// 1-based position of a round in the ledger. Never reused.
pub type RoundIndex = u32;

/// Suggestion confidence, a percentage in [0, 100].
pub type Confidence = u8;

/// The canonical session identifier.
pub type SessionId = String;
