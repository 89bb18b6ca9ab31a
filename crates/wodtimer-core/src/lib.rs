//! # Wodtimer Core Library
//!
//! This library provides the core logic for the wodtimer workout timer.
//! One reactive clock supports six timing disciplines (stopwatch, countdown,
//! interval, EMOM, AMRAP, tabata) behind a single pause/resume/reset
//! lifecycle, with the CLI binary being a thin host over the same core.
//!
//! ## Architecture
//!
//! - **Timer Engine**: A wall-clock-based state machine that requires the
//!   caller to periodically invoke `tick()` for progress updates
//! - **Mode Strategies**: Pure per-mode mappings from raw elapsed time to the
//!   displayed countdown, round and phase
//! - **Transition Notifier**: Detects phase/round/completion edges between
//!   consecutive ticks and drives an injected feedback capability
//! - **Storage**: TOML-based configuration for per-mode preferences
//!
//! ## Key Components
//!
//! - [`TimerEngine`]: Core timer state machine
//! - [`TimerConfig`]: Per-session mode and parameter selection
//! - [`FeedbackSink`]: Trait for the audio/haptic feedback collaborator
//! - [`Config`]: Application configuration management

pub mod timer;
pub mod storage;
pub mod events;
pub mod error;

pub use timer::{
    format_mm_ss, Clock, FeedbackSink, ManualClock, Phase, SilentSink, SystemClock, TimerConfig,
    TimerEngine, TimerMode, TimerState, Transition,
};
pub use storage::Config;
pub use events::Event;
pub use error::{ConfigError, CoreError, FeedbackError};
