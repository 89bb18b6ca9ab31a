//! Live timer sessions in the terminal.
//!
//! The CLI is the scheduler: a tokio interval drives `tick()` at 10 Hz
//! while the engine derives state from the wall clock. Transition cues
//! ring the terminal bell; Ctrl-C pauses the session and reports what
//! elapsed so far.

use std::io::Write;
use std::time::Duration;

use clap::Subcommand;
use serde::Serialize;
use wodtimer_core::{
    format_mm_ss, Config, CoreError, Event, FeedbackError, FeedbackSink, Phase, SystemClock,
    TimerConfig, TimerEngine, TimerMode,
};

#[derive(Subcommand)]
pub enum TimerAction {
    /// Free-running stopwatch (stop with Ctrl-C)
    Stopwatch,
    /// Fixed countdown
    Countdown {
        /// Countdown length in seconds
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// Repeating work/rest rounds
    Interval {
        /// Work segment in seconds
        #[arg(long)]
        work: Option<u64>,
        /// Rest segment in seconds
        #[arg(long)]
        rest: Option<u64>,
        /// Number of rounds
        #[arg(long)]
        rounds: Option<u32>,
    },
    /// Every-minute-on-the-minute rounds
    Emom {
        /// Round length in seconds
        #[arg(long)]
        interval: Option<u64>,
        /// Number of rounds
        #[arg(long)]
        rounds: Option<u32>,
    },
    /// Capped countdown for max-effort rounds
    Amrap {
        /// Cap in seconds
        #[arg(long)]
        seconds: Option<u64>,
    },
    /// Fixed protocol: 20 s work / 10 s rest, 8 rounds
    Tabata,
}

/// Terminal bell as the audio feedback capability.
struct TerminalBell;

impl FeedbackSink for TerminalBell {
    fn notify(&mut self) -> Result<(), FeedbackError> {
        let mut out = std::io::stdout();
        out.write_all(b"\x07")?;
        out.flush()?;
        Ok(())
    }
}

/// What the host records once a session ends.
#[derive(Serialize)]
struct SessionSummary {
    mode: TimerMode,
    completed: bool,
    rounds_completed: u32,
    total_elapsed_ms: u64,
    total_elapsed: String,
}

/// Resolve session parameters: explicit flags win, then the user's
/// configured preferences, then the engine's built-in per-mode defaults.
fn session_config(action: &TimerAction, app: &Config) -> TimerConfig {
    match action {
        TimerAction::Stopwatch => TimerConfig::stopwatch(),
        TimerAction::Countdown { seconds } => {
            TimerConfig::countdown(seconds.unwrap_or(app.timer.countdown_seconds))
        }
        TimerAction::Interval { work, rest, rounds } => TimerConfig::interval(
            work.unwrap_or(app.timer.work_seconds),
            rest.unwrap_or(app.timer.rest_seconds),
            rounds.unwrap_or(app.timer.rounds),
        ),
        TimerAction::Emom { interval, rounds } => TimerConfig::emom(
            interval.unwrap_or(app.timer.emom_interval_seconds),
            rounds.unwrap_or(app.timer.emom_rounds),
        ),
        TimerAction::Amrap { seconds } => {
            TimerConfig::amrap(seconds.unwrap_or(app.timer.amrap_seconds))
        }
        TimerAction::Tabata => TimerConfig::tabata(),
    }
}

pub fn run(action: TimerAction) -> Result<(), CoreError> {
    let app = Config::load()?;
    let mut engine = TimerEngine::new(session_config(&action, &app));
    if app.notifications.enabled {
        engine.set_feedback(Box::new(TerminalBell));
    }

    if let Some(event) = engine.start() {
        print_event(&event)?;
    }

    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(session_loop(&mut engine))?;

    let state = engine.state();
    let summary = SessionSummary {
        mode: engine.config().mode,
        completed: state.is_complete,
        rounds_completed: if state.is_complete {
            state.total_rounds
        } else {
            state.current_round.saturating_sub(1)
        },
        total_elapsed_ms: state.total_elapsed_ms,
        total_elapsed: format_mm_ss(state.total_elapsed_ms),
    };
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

async fn session_loop(engine: &mut TimerEngine<SystemClock>) -> Result<(), CoreError> {
    let mut ticker = tokio::time::interval(Duration::from_millis(100));
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(event) = engine.tick() {
                    println!();
                    print_event(&event)?;
                }
                let state = engine.state();
                render_face(engine.config().mode, &state)?;
                if state.is_complete {
                    println!();
                    return Ok(());
                }
            }
            _ = tokio::signal::ctrl_c() => {
                println!();
                if let Some(event) = engine.pause() {
                    print_event(&event)?;
                }
                return Ok(());
            }
        }
    }
}

fn print_event(event: &Event) -> Result<(), CoreError> {
    println!("{}", serde_json::to_string(event)?);
    Ok(())
}

/// Redraw the in-place clock face line.
fn render_face(mode: TimerMode, state: &wodtimer_core::TimerState) -> Result<(), CoreError> {
    let mut out = std::io::stdout();
    let face = format_mm_ss(state.display_ms);
    match mode {
        TimerMode::Stopwatch | TimerMode::Countdown | TimerMode::Amrap => {
            write!(out, "\r{} {face}   ", mode.as_str())?;
        }
        TimerMode::Emom => {
            write!(
                out,
                "\r{} {face}  round {}/{}   ",
                mode.as_str(),
                state.current_round,
                state.total_rounds
            )?;
        }
        TimerMode::Interval | TimerMode::Tabata => {
            let phase = match state.phase {
                Phase::Work => "work",
                Phase::Rest => "rest",
            };
            write!(
                out,
                "\r{} {face}  round {}/{}  {phase}   ",
                mode.as_str(),
                state.current_round,
                state.total_rounds
            )?;
        }
    }
    out.flush()?;
    Ok(())
}
