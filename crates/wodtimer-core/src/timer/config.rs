use serde::{Deserialize, Serialize};

/// Timing discipline. Modes are mutually exclusive, never combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimerMode {
    Stopwatch,
    Countdown,
    Interval,
    Emom,
    Amrap,
    Tabata,
}

impl TimerMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimerMode::Stopwatch => "stopwatch",
            TimerMode::Countdown => "countdown",
            TimerMode::Interval => "interval",
            TimerMode::Emom => "emom",
            TimerMode::Amrap => "amrap",
            TimerMode::Tabata => "tabata",
        }
    }
}

pub(crate) const DEFAULT_COUNTDOWN_SECS: u64 = 60;
pub(crate) const DEFAULT_AMRAP_SECS: u64 = 600;
pub(crate) const DEFAULT_WORK_SECS: u64 = 30;
pub(crate) const DEFAULT_REST_SECS: u64 = 15;
pub(crate) const DEFAULT_ROUNDS: u32 = 8;
pub(crate) const DEFAULT_EMOM_INTERVAL_SECS: u64 = 60;
pub(crate) const DEFAULT_EMOM_ROUNDS: u32 = 10;

/// Tabata is a fixed protocol: 20 s work, 10 s rest, 8 rounds.
pub(crate) const TABATA_WORK_MS: u64 = 20_000;
pub(crate) const TABATA_REST_MS: u64 = 10_000;
pub(crate) const TABATA_ROUNDS: u32 = 8;

/// Immutable per-session timer configuration.
///
/// Fields a mode does not use are ignored, never rejected. Missing fields
/// resolve to the per-mode defaults documented on the accessors below.
/// Replaced wholesale by [`TimerEngine::configure`](super::TimerEngine::configure),
/// never patched field by field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerConfig {
    pub mode: TimerMode,
    /// Window length for `countdown` and `amrap`.
    #[serde(default)]
    pub total_seconds: Option<u64>,
    /// Work segment length for `interval`.
    #[serde(default)]
    pub work_seconds: Option<u64>,
    /// Rest segment length for `interval`.
    #[serde(default)]
    pub rest_seconds: Option<u64>,
    /// Round count for `interval`.
    #[serde(default)]
    pub rounds: Option<u32>,
    /// Per-round length for `emom`.
    #[serde(default)]
    pub emom_interval_seconds: Option<u64>,
    /// Round count for `emom`.
    #[serde(default)]
    pub emom_rounds: Option<u32>,
}

impl TimerConfig {
    fn bare(mode: TimerMode) -> Self {
        Self {
            mode,
            total_seconds: None,
            work_seconds: None,
            rest_seconds: None,
            rounds: None,
            emom_interval_seconds: None,
            emom_rounds: None,
        }
    }

    pub fn stopwatch() -> Self {
        Self::bare(TimerMode::Stopwatch)
    }

    pub fn countdown(total_seconds: u64) -> Self {
        Self {
            total_seconds: Some(total_seconds),
            ..Self::bare(TimerMode::Countdown)
        }
    }

    pub fn interval(work_seconds: u64, rest_seconds: u64, rounds: u32) -> Self {
        Self {
            work_seconds: Some(work_seconds),
            rest_seconds: Some(rest_seconds),
            rounds: Some(rounds),
            ..Self::bare(TimerMode::Interval)
        }
    }

    pub fn emom(interval_seconds: u64, rounds: u32) -> Self {
        Self {
            emom_interval_seconds: Some(interval_seconds),
            emom_rounds: Some(rounds),
            ..Self::bare(TimerMode::Emom)
        }
    }

    pub fn amrap(total_seconds: u64) -> Self {
        Self {
            total_seconds: Some(total_seconds),
            ..Self::bare(TimerMode::Amrap)
        }
    }

    pub fn tabata() -> Self {
        Self::bare(TimerMode::Tabata)
    }

    // ── Resolved parameters ──────────────────────────────────────────
    //
    // Saturating arithmetic throughout so absurd inputs pin at u64::MAX
    // instead of overflowing (same policy as durations elsewhere).

    /// Window length in ms for `countdown`/`amrap`.
    /// Defaults: countdown 60 s, amrap 600 s.
    pub fn total_ms(&self) -> u64 {
        let default = match self.mode {
            TimerMode::Amrap => DEFAULT_AMRAP_SECS,
            _ => DEFAULT_COUNTDOWN_SECS,
        };
        self.total_seconds.unwrap_or(default).saturating_mul(1000)
    }

    /// Work segment in ms. Default 30 s.
    pub fn work_ms(&self) -> u64 {
        self.work_seconds
            .unwrap_or(DEFAULT_WORK_SECS)
            .saturating_mul(1000)
    }

    /// Rest segment in ms. Default 15 s.
    pub fn rest_ms(&self) -> u64 {
        self.rest_seconds
            .unwrap_or(DEFAULT_REST_SECS)
            .saturating_mul(1000)
    }

    /// Interval round count, at least 1. Default 8.
    pub fn round_count(&self) -> u32 {
        self.rounds.unwrap_or(DEFAULT_ROUNDS).max(1)
    }

    /// EMOM per-round length in ms. Default 60 s.
    pub fn emom_interval_ms(&self) -> u64 {
        self.emom_interval_seconds
            .unwrap_or(DEFAULT_EMOM_INTERVAL_SECS)
            .saturating_mul(1000)
    }

    /// EMOM round count, at least 1. Default 10.
    pub fn emom_round_count(&self) -> u32 {
        self.emom_rounds.unwrap_or(DEFAULT_EMOM_ROUNDS).max(1)
    }
}
