//! SQLite session journal.
//!
//! RULE: Only store.rs talks to the database.
//! The journal is in-memory only: it lives and dies with the process.

use crate::{
    error::EngineResult,
    event::EventLogEntry,
    types::RoundIndex,
};
use rusqlite::{params, Connection, OptionalExtension};

pub struct SessionStore {
    conn: Connection,
}

impl SessionStore {
    /// Open a private in-memory database.
    pub fn in_memory() -> EngineResult<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        Ok(Self { conn })
    }

    /// Apply all schema migrations in order.
    pub fn migrate(&self) -> EngineResult<()> {
        self.conn.execute_batch(include_str!("../../migrations/001_session.sql"))?;
        Ok(())
    }

    // ── Session ────────────────────────────────────────────────

    pub fn insert_session(&self, session_id: &str, version: &str, started_at: &str) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO session (session_id, version, started_at) VALUES (?1, ?2, ?3)",
            params![session_id, version, started_at],
        )?;
        Ok(())
    }

    // ── Event log ──────────────────────────────────────────────

    pub fn append_event(&self, entry: &EventLogEntry) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO event_log (session_id, seq, round, event_type, payload)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                entry.session_id,
                entry.seq as i64,
                entry.round,
                entry.event_type,
                entry.payload,
            ],
        )?;
        Ok(())
    }

    /// Every journaled event of a session, in emission order.
    pub fn events_for_session(&self, session_id: &str) -> EngineResult<Vec<EventLogEntry>> {
        let mut stmt = self.conn.prepare(
            "SELECT id, session_id, seq, round, event_type, payload
             FROM event_log WHERE session_id = ?1
             ORDER BY seq ASC"
        )?;
        let entries = stmt.query_map(params![session_id], |row| {
            Ok(EventLogEntry {
                id:         Some(row.get(0)?),
                session_id: row.get(1)?,
                seq:        row.get::<_, i64>(2)? as u64,
                round:      row.get(3)?,
                event_type: row.get(4)?,
                payload:    row.get(5)?,
            })
        })?.collect::<Result<Vec<_>, _>>()?;
        Ok(entries)
    }

    pub fn event_count(&self, session_id: &str, event_type: &str) -> EngineResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM event_log WHERE session_id = ?1 AND event_type = ?2",
            params![session_id, event_type],
            |row| row.get(0),
        )?;
        Ok(count)
    }

    // ── Snapshot ───────────────────────────────────────────────

    pub fn save_snapshot(&self, session_id: &str, round: RoundIndex, state_json: &str) -> EngineResult<()> {
        self.conn.execute(
            "INSERT INTO snapshot (session_id, round, state_json) VALUES (?1, ?2, ?3)",
            params![session_id, round, state_json],
        )?;
        Ok(())
    }

    pub fn latest_snapshot(&self, session_id: &str) -> EngineResult<Option<(RoundIndex, String)>> {
        let result = self.conn.query_row(
            "SELECT round, state_json FROM snapshot
             WHERE session_id = ?1
             ORDER BY id DESC LIMIT 1",
            params![session_id],
            |row| Ok((row.get::<_, RoundIndex>(0)?, row.get::<_, String>(1)?)),
        ).optional()?;
        Ok(result)
    }

    pub fn snapshot_count(&self, session_id: &str) -> EngineResult<i64> {
        let count = self.conn.query_row(
            "SELECT COUNT(*) FROM snapshot WHERE session_id = ?1",
            params![session_id],
            |row| row.get(0),
        )?;
        Ok(count)
    }
}
