//! Per-mode time mapping.
//!
//! Each mode is a pure function from `(config, raw_elapsed_ms)` to the
//! displayed slice of time: what the clock face shows, which round and
//! phase the instant falls into, and whether the end condition holds.
//! The engine never interprets a mode itself; it only dispatches here.
//!
//! Boundary tie-break: rounds and phases are derived with `floor`, so the
//! tick that first observes `raw_elapsed_ms` at or past a boundary already
//! reports the new round/phase. After completion every value is pinned --
//! display at zero, round at the final round -- and never goes negative.

use serde::{Deserialize, Serialize};

use super::config::{TimerConfig, TimerMode, TABATA_REST_MS, TABATA_ROUNDS, TABATA_WORK_MS};

/// Work/rest segment within a round. Modes without a modeled rest segment
/// report `Work` throughout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Phase {
    Work,
    Rest,
}

/// A mode's reading of one instant of raw elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct ModeSlice {
    pub display_ms: u64,
    pub current_round: u32,
    pub total_rounds: u32,
    pub phase: Phase,
    pub is_complete: bool,
}

/// Map raw elapsed time through the configured mode.
pub(super) fn project(config: &TimerConfig, raw_elapsed_ms: u64) -> ModeSlice {
    match config.mode {
        TimerMode::Stopwatch => stopwatch(raw_elapsed_ms),
        // Countdown and AMRAP share the fixed-window mapping; they differ
        // only in what the host means by the window.
        TimerMode::Countdown | TimerMode::Amrap => fixed_window(config.total_ms(), raw_elapsed_ms),
        TimerMode::Interval => work_rest(
            config.work_ms(),
            config.rest_ms(),
            config.round_count(),
            raw_elapsed_ms,
        ),
        TimerMode::Tabata => work_rest(TABATA_WORK_MS, TABATA_REST_MS, TABATA_ROUNDS, raw_elapsed_ms),
        TimerMode::Emom => every_interval(
            config.emom_interval_ms(),
            config.emom_round_count(),
            raw_elapsed_ms,
        ),
    }
}

/// The slice a freshly armed configuration shows before any time passes.
pub(super) fn initial(config: &TimerConfig) -> ModeSlice {
    project(config, 0)
}

fn stopwatch(raw_elapsed_ms: u64) -> ModeSlice {
    ModeSlice {
        display_ms: raw_elapsed_ms,
        current_round: 1,
        total_rounds: 1,
        phase: Phase::Work,
        is_complete: false,
    }
}

fn fixed_window(total_ms: u64, raw_elapsed_ms: u64) -> ModeSlice {
    let display_ms = total_ms.saturating_sub(raw_elapsed_ms);
    ModeSlice {
        display_ms,
        current_round: 1,
        total_rounds: 1,
        phase: Phase::Work,
        is_complete: raw_elapsed_ms >= total_ms,
    }
}

fn work_rest(work_ms: u64, rest_ms: u64, total_rounds: u32, raw_elapsed_ms: u64) -> ModeSlice {
    let cycle_ms = work_ms.saturating_add(rest_ms);
    let total_ms = cycle_ms.saturating_mul(total_rounds as u64);
    if cycle_ms == 0 || raw_elapsed_ms >= total_ms {
        return completed(total_rounds);
    }
    let current_round = (raw_elapsed_ms / cycle_ms) as u32 + 1;
    let into_cycle = raw_elapsed_ms % cycle_ms;
    let (phase, display_ms) = if into_cycle < work_ms {
        (Phase::Work, work_ms - into_cycle)
    } else {
        (Phase::Rest, cycle_ms - into_cycle)
    };
    ModeSlice {
        display_ms,
        current_round,
        total_rounds,
        phase,
        is_complete: false,
    }
}

/// EMOM: each round spans exactly one interval; `phase` stays `Work`
/// because the configuration carries no rest length for this mode.
fn every_interval(interval_ms: u64, total_rounds: u32, raw_elapsed_ms: u64) -> ModeSlice {
    let total_ms = interval_ms.saturating_mul(total_rounds as u64);
    if interval_ms == 0 || raw_elapsed_ms >= total_ms {
        return completed(total_rounds);
    }
    ModeSlice {
        display_ms: interval_ms - (raw_elapsed_ms % interval_ms),
        current_round: (raw_elapsed_ms / interval_ms) as u32 + 1,
        total_rounds,
        phase: Phase::Work,
        is_complete: false,
    }
}

// Callers always pass a round count of at least 1, so the pinned round
// never exceeds the total.
fn completed(total_rounds: u32) -> ModeSlice {
    ModeSlice {
        display_ms: 0,
        current_round: total_rounds,
        total_rounds,
        phase: Phase::Work,
        is_complete: true,
    }
}
