use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::timer::{Phase, TimerMode, TimerState};

/// Every lifecycle command and detected transition produces an Event.
/// The host polls for events; the feedback capability fires alongside them.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    TimerConfigured {
        mode: TimerMode,
        display_ms: u64,
        total_rounds: u32,
        at: DateTime<Utc>,
    },
    TimerStarted {
        mode: TimerMode,
        display_ms: u64,
        total_rounds: u32,
        at: DateTime<Utc>,
    },
    TimerPaused {
        display_ms: u64,
        total_elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    TimerResumed {
        display_ms: u64,
        at: DateTime<Utc>,
    },
    TimerReset {
        at: DateTime<Utc>,
    },
    /// The work/rest phase flipped within the current round.
    PhaseStarted {
        phase: Phase,
        round: u32,
        display_ms: u64,
        at: DateTime<Utc>,
    },
    /// A new round began.
    RoundStarted {
        round: u32,
        total_rounds: u32,
        at: DateTime<Utc>,
    },
    /// The mode's end condition was reached.
    TimerCompleted {
        mode: TimerMode,
        total_elapsed_ms: u64,
        at: DateTime<Utc>,
    },
    StateSnapshot {
        mode: TimerMode,
        state: TimerState,
        /// `display_ms` rendered as MM:SS.
        display: String,
        at: DateTime<Utc>,
    },
}
