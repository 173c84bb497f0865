//! session-runner: headless driver for the round ledger engine.
//!
//! Usage:
//!   session-runner --seed 12345 --rounds 200 [--config engine.json]
//!   session-runner --ipc-mode [--config engine.json]

use anyhow::Result;
use bacbo_core::{
    clock::RoundClock,
    command::SessionCommand,
    config::EngineConfig,
    engine::SessionEngine,
    event::SessionEvent,
    ledger::{LedgerRow, OutcomeTally},
    outcome::{RoundInput, Winner},
    rng::DiceRng,
    session::Advice,
};
use std::env;
use std::io::{self, BufRead, Write};

/// Rows of the ledger printed at the end of a simulated run.
const SUMMARY_ROWS: usize = 10;

#[derive(serde::Deserialize)]
#[serde(untagged)]
enum IpcRequest {
    Control(IpcControl),
    Command(SessionCommand),
}

#[derive(serde::Deserialize)]
#[serde(tag = "cmd", rename_all = "snake_case")]
enum IpcControl {
    GetState,
    Quit,
}

#[derive(serde::Serialize)]
struct UiState {
    session_id:        String,
    rounds:            usize,
    tally:             OutcomeTally,
    correct_count:     u32,
    incorrect_count:   u32,
    hit_rate:          Option<f64>,
    escalation_active: bool,
    advice:            Advice,
    last_events:       Vec<SessionEvent>,
    ledger:            Vec<LedgerRow>,
}

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let rounds = parse_arg(&args, "--rounds", 200u32);
    let ipc_mode = args.iter().any(|a| a == "--ipc-mode");
    let config = match arg_value(&args, "--config") {
        Some(path) => EngineConfig::load(path)?,
        None => EngineConfig::default(),
    };

    if ipc_mode {
        let mut engine = SessionEngine::build(config, RoundClock::Wall)?;
        run_ipc_loop(&mut engine)?;
    } else {
        println!("Round ledger: session-runner");
        println!("  seed:      {seed}");
        println!("  rounds:    {rounds}");
        println!("  tie decay: {:?}", config.tie_decay);
        println!();

        let start = chrono::Local::now().naive_local();
        let mut engine = SessionEngine::build(config, RoundClock::stepped(start, 30))?;
        let mut rng = DiceRng::new(seed);
        simulate(&mut engine, &mut rng, rounds)?;
        print_summary(&engine, seed)?;
    }

    Ok(())
}

/// Advise before each round, roll it, and grade any suggestion shown.
fn simulate(engine: &mut SessionEngine, rng: &mut DiceRng, rounds: u32) -> Result<()> {
    for _ in 0..rounds {
        let issued = engine
            .apply(SessionCommand::Advise)?
            .iter()
            .any(|e| matches!(e, SessionEvent::SuggestionIssued { .. }));

        let input = rng.roll_round();
        engine.apply(record_command(input))?;

        if issued {
            engine.apply(SessionCommand::Grade { actual: input.winner() })?;
        }
    }
    Ok(())
}

fn record_command(input: RoundInput) -> SessionCommand {
    match input {
        RoundInput::Dice { player, banker } => SessionCommand::RecordDice {
            player: player.faces(),
            banker: banker.faces(),
        },
        RoundInput::Winner(winner) => SessionCommand::RecordWinner { winner },
    }
}

fn run_ipc_loop(engine: &mut SessionEngine) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    let mut handle = stdin.lock();
    let mut buffer = String::new();

    loop {
        buffer.clear();
        let bytes_read = handle.read_line(&mut buffer)?;
        if bytes_read == 0 {
            break; // EOF
        }
        if buffer.trim().is_empty() {
            continue;
        }

        let request: IpcRequest = match serde_json::from_str(&buffer) {
            Ok(r) => r,
            Err(e) => {
                log::warn!("Unparseable command: {}", buffer.trim());
                write_error(&mut stdout, &e.to_string())?;
                continue;
            }
        };

        match request {
            IpcRequest::Control(IpcControl::Quit) => break,
            IpcRequest::Control(IpcControl::GetState) => {
                write_state(&mut stdout, engine, Vec::new())?;
            }
            IpcRequest::Command(cmd) => match engine.apply(cmd) {
                Ok(events) => write_state(&mut stdout, engine, events)?,
                // Rejected input leaves the session untouched; keep serving.
                Err(e) => write_error(&mut stdout, &e.to_string())?,
            },
        }
    }
    Ok(())
}

fn write_state(out: &mut impl Write, engine: &SessionEngine, events: Vec<SessionEvent>) -> Result<()> {
    let state = build_ui_state(engine, events);
    writeln!(out, "{}", serde_json::to_string(&state)?)?;
    out.flush()?;
    Ok(())
}

fn write_error(out: &mut impl Write, message: &str) -> Result<()> {
    let err_json = serde_json::json!({ "error": message });
    writeln!(out, "{err_json}")?;
    out.flush()?;
    Ok(())
}

fn build_ui_state(engine: &SessionEngine, last_events: Vec<SessionEvent>) -> UiState {
    let state = engine.state();
    UiState {
        session_id:        engine.session_id.clone(),
        rounds:            state.ledger.len(),
        tally:             state.tally,
        correct_count:     state.scores.correct_count,
        incorrect_count:   state.scores.incorrect_count,
        hit_rate:          state.scores.hit_rate(),
        escalation_active: state.escalation.escalation_active,
        advice:            engine.preview(),
        last_events,
        ledger:            engine.export_ledger(),
    }
}

fn print_summary(engine: &SessionEngine, seed: u64) -> Result<()> {
    let state = engine.state();
    let tally = state.tally;
    let issued = engine.store().event_count(&engine.session_id, "suggestion_issued")?;
    let withheld = engine.store().event_count(&engine.session_id, "suggestion_withheld")?;

    println!("=== SESSION SUMMARY ===");
    println!("  session_id:  {}", engine.session_id);
    println!("  seed:        {seed}");
    println!("  rounds:      {}", state.ledger.len());
    println!(
        "  outcomes:    {} {} / {} {} / {} {}",
        Winner::Player, tally.player, Winner::Banker, tally.banker, Winner::Tie, tally.tie,
    );
    println!("  suggestions: {issued} issued, {withheld} withheld");
    println!("  correct:     {}", state.scores.correct_count);
    println!("  incorrect:   {}", state.scores.incorrect_count);
    match state.scores.hit_rate() {
        Some(rate) => println!("  hit rate:    {rate:.2}%"),
        None => println!("  hit rate:    (no graded suggestions)"),
    }
    println!("  escalation:  {}", state.escalation.escalation_active);
    println!("  timing now:  {}", engine.preview().timing.verdict);

    println!();
    println!("=== LAST {SUMMARY_ROWS} ROUNDS ===");
    let rows = engine.export_ledger();
    if rows.is_empty() {
        println!("  (No rounds recorded)");
    } else {
        println!("{}", LedgerRow::HEADER);
        for row in rows.iter().skip(rows.len().saturating_sub(SUMMARY_ROWS)) {
            println!("{row}");
        }
    }
    Ok(())
}

fn arg_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    arg_value(args, flag)
        .and_then(|v| v.parse().ok())
        .unwrap_or(default)
}
