//! The session engine: command dispatch around one SessionState.
//!
//! RULES:
//!   - apply() is the only mutator of live play. It takes one SessionCommand,
//!     runs it to completion, and returns the events it produced.
//!   - restore_latest_snapshot() is the one other mutator; it journals a
//!     SessionRestored event like any command would.
//!   - Queries never mutate: state(), preview(), export_ledger().
//!   - Every emitted event is journaled to the SessionStore, in order.
//!   - Input is validated before any state changes; a rejected command
//!     leaves the session untouched.

use crate::{
    clock::RoundClock,
    command::SessionCommand,
    config::EngineConfig,
    error::EngineResult,
    event::{EventLogEntry, SessionEvent},
    grading::GradeOutcome,
    ledger::LedgerRow,
    outcome::{RoundInput, Winner},
    session::{Advice, SessionState},
    snapshot::{SessionSnapshot, SNAPSHOT_INTERVAL},
    store::SessionStore,
    types::{RoundIndex, SessionId},
};

pub struct SessionEngine {
    pub session_id: SessionId,
    config:         EngineConfig,
    state:          SessionState,
    clock:          RoundClock,
    store:          SessionStore,
    seq:            u64,
}

impl SessionEngine {
    pub fn new(
        session_id: SessionId,
        config:     EngineConfig,
        clock:      RoundClock,
        store:      SessionStore,
    ) -> Self {
        Self {
            state: SessionState::from_config(&config),
            session_id,
            config,
            clock,
            store,
            seq: 0,
        }
    }

    /// Build a fully wired engine with a fresh in-memory journal.
    /// Call this instead of new() + manual store setup.
    pub fn build(config: EngineConfig, clock: RoundClock) -> EngineResult<Self> {
        Self::build_with_id(uuid::Uuid::new_v4().to_string(), config, clock)
    }

    /// Like build(), with a caller-chosen session id.
    pub fn build_with_id(
        session_id: SessionId,
        config:     EngineConfig,
        clock:      RoundClock,
    ) -> EngineResult<Self> {
        let store = SessionStore::in_memory()?;
        store.migrate()?;
        store.insert_session(
            &session_id,
            env!("CARGO_PKG_VERSION"),
            &chrono::Local::now().to_rfc3339(),
        )?;
        let mut engine = Self::new(session_id, config, clock, store);
        let started = SessionEvent::SessionStarted { session_id: engine.session_id.clone() };
        engine.journal(&started)?;
        log::info!("session {} started", engine.session_id);
        Ok(engine)
    }

    // ── Commands ───────────────────────────────────────────────

    /// Run one command to completion and return the events it emitted.
    pub fn apply(&mut self, command: SessionCommand) -> EngineResult<Vec<SessionEvent>> {
        log::debug!("session {} command: {}", self.session_id, command.name());
        let mut events = Vec::new();
        match command {
            SessionCommand::RecordDice { player, banker } => {
                let input = RoundInput::from_faces(player, banker)?;
                self.record_round(input, &mut events)?;
            }
            SessionCommand::RecordWinner { winner } => {
                self.record_round(RoundInput::Winner(winner), &mut events)?;
            }
            SessionCommand::Advise => {
                self.advise(&mut events)?;
            }
            SessionCommand::Grade { actual } => {
                self.grade(actual, &mut events)?;
            }
            SessionCommand::Reset => {
                self.reset(&mut events)?;
            }
        }
        Ok(events)
    }

    fn record_round(
        &mut self,
        input:  RoundInput,
        events: &mut Vec<SessionEvent>,
    ) -> EngineResult<()> {
        let timestamp = self.clock.now();
        let round = self.state.record_round(input, timestamp);
        self.emit(
            events,
            SessionEvent::RoundRecorded {
                index:      round.index,
                winner:     round.winner,
                player_sum: round.player_sum,
                banker_sum: round.banker_sum,
                timestamp:  round.timestamp.format("%Y-%m-%d %H:%M:%S").to_string(),
            },
        )?;

        if round.index % SNAPSHOT_INTERVAL == 0 {
            self.take_snapshot(round.index)?;
        }
        Ok(())
    }

    fn advise(&mut self, events: &mut Vec<SessionEvent>) -> EngineResult<()> {
        let advice = self.state.advise(&self.config.thresholds);
        let Advice { suggestion, timing } = &advice;

        let event = match advice.shown_side() {
            Some(side) => {
                log::info!(
                    "suggest {side} ({}, {}%{})",
                    suggestion.pattern,
                    suggestion.confidence,
                    if suggestion.escalating { ", escalating" } else { "" },
                );
                SessionEvent::SuggestionIssued {
                    pattern:    suggestion.pattern,
                    side,
                    confidence: suggestion.confidence,
                    escalating: suggestion.escalating,
                    timing:     timing.verdict,
                }
            }
            None => SessionEvent::SuggestionWithheld {
                pattern:    suggestion.pattern,
                confidence: suggestion.confidence,
                timing:     timing.verdict,
            },
        };
        self.emit(events, event)
    }

    fn grade(&mut self, actual: Winner, events: &mut Vec<SessionEvent>) -> EngineResult<()> {
        let outcome = self.state.grade_pending(actual);
        if outcome == GradeOutcome::Incorrect {
            log::info!("suggestion missed; escalation active");
        }
        let scores = self.state.scores;
        let escalation_active = self.state.escalation.escalation_active;
        self.emit(
            events,
            SessionEvent::SuggestionGraded {
                actual,
                outcome,
                correct_count:   scores.correct_count,
                incorrect_count: scores.incorrect_count,
                escalation_active,
            },
        )
    }

    fn reset(&mut self, events: &mut Vec<SessionEvent>) -> EngineResult<()> {
        let rounds_cleared = self.state.ledger.len();
        self.state.reset();
        log::info!("session {} reset ({rounds_cleared} rounds cleared)", self.session_id);
        self.emit(events, SessionEvent::SessionReset { rounds_cleared })
    }

    /// Journal `event`, then hand it to the caller.
    fn emit(&mut self, events: &mut Vec<SessionEvent>, event: SessionEvent) -> EngineResult<()> {
        self.journal(&event)?;
        events.push(event);
        Ok(())
    }

    fn journal(&mut self, event: &SessionEvent) -> EngineResult<()> {
        self.seq += 1;
        let entry = EventLogEntry {
            id:         None,
            session_id: self.session_id.clone(),
            seq:        self.seq,
            round:      self.state.ledger.len() as RoundIndex,
            event_type: event.type_name().to_string(),
            payload:    serde_json::to_string(event)?,
        };
        self.store.append_event(&entry)
    }

    // ── Queries ────────────────────────────────────────────────

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn store(&self) -> &SessionStore {
        &self.store
    }

    /// What advise() would return right now, without recording a pending side.
    pub fn preview(&self) -> Advice {
        self.state.preview(&self.config.thresholds)
    }

    pub fn export_ledger(&self) -> Vec<LedgerRow> {
        self.state.export_ledger()
    }

    /// Every journaled event of this session, in emission order.
    pub fn journaled_events(&self) -> EngineResult<Vec<EventLogEntry>> {
        self.store.events_for_session(&self.session_id)
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            session_id: self.session_id.clone(),
            round:      self.state.ledger.len() as RoundIndex,
            state:      self.state.clone(),
        }
    }

    /// Roll the session back to the latest journaled snapshot.
    /// Returns the snapshot's round, or `None` if none was taken yet.
    pub fn restore_latest_snapshot(&mut self) -> EngineResult<Option<RoundIndex>> {
        let Some((round, json)) = self.store.latest_snapshot(&self.session_id)? else {
            return Ok(None);
        };
        let snapshot: SessionSnapshot = serde_json::from_str(&json)?;
        self.state = snapshot.state;
        self.journal(&SessionEvent::SessionRestored { round })?;
        log::info!("session {} restored to round {round}", self.session_id);
        Ok(Some(round))
    }

    fn take_snapshot(&self, round: RoundIndex) -> EngineResult<()> {
        let json = serde_json::to_string(&self.snapshot())?;
        self.store.save_snapshot(&self.session_id, round, &json)?;
        log::debug!("Snapshot saved at round {round}");
        Ok(())
    }
}
