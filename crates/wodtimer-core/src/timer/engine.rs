//! Timer engine implementation.
//!
//! The timer engine is a wall-clock-based state machine. It does not use
//! internal threads - the caller is responsible for calling `tick()`
//! periodically while the timer is running and not yet complete.
//!
//! ## Time accounting
//!
//! ```text
//! raw_elapsed = accumulated_ms + (now - segment_start)   while running
//! raw_elapsed = accumulated_ms                           while paused
//! ```
//!
//! `pause()` folds the open segment into `accumulated_ms` exactly once;
//! `resume()` rebases `segment_start` without touching the accumulator, so
//! no time is double-counted or lost across a pause boundary.
//!
//! ## Usage
//!
//! ```ignore
//! let mut engine = TimerEngine::new(TimerConfig::tabata());
//! engine.start();
//! // In a loop:
//! engine.tick(); // Returns Some(Event) on a phase/round/completion edge
//! ```

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::clock::{Clock, SystemClock};
use super::config::TimerConfig;
use super::display::format_mm_ss;
use super::mode::{self, Phase};
use super::notifier::{detect_transition, FeedbackSink, Transition};
use crate::events::Event;

/// Snapshot of the timer at one instant. Derived, never mutated in place:
/// every tick recomputes it wholesale from the raw elapsed time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimerState {
    /// Remaining time within the current phase for countdown-style modes,
    /// elapsed time for stopwatch.
    pub display_ms: u64,
    pub is_running: bool,
    /// 1-indexed.
    pub current_round: u32,
    pub total_rounds: u32,
    /// `Work` for modes without a modeled rest segment.
    pub phase: Phase,
    /// Latches true once the mode's end condition holds.
    pub is_complete: bool,
    /// Raw elapsed ms since the configuration was last armed. Monotonically
    /// non-decreasing across any pause/resume sequence.
    pub total_elapsed_ms: u64,
}

/// Core timer engine.
///
/// Operates on wall-clock deltas -- no internal thread. The caller drives
/// `tick()`; the engine only derives state and reports transition edges.
/// One engine instance belongs to one host session.
pub struct TimerEngine<C: Clock = SystemClock> {
    config: TimerConfig,
    clock: C,
    /// Time banked across prior running segments.
    accumulated_ms: u64,
    /// Clock reading when the current running segment began.
    /// `None` while paused or before the first start.
    segment_start_ms: Option<u64>,
    /// State as of the last tick/command, the baseline for edge detection.
    last_state: TimerState,
    feedback: Option<Box<dyn FeedbackSink>>,
}

impl TimerEngine<SystemClock> {
    /// Create an engine on the system clock, armed but not running.
    pub fn new(config: TimerConfig) -> Self {
        Self::with_clock(config, SystemClock)
    }
}

impl<C: Clock> TimerEngine<C> {
    /// Create an engine on an explicit clock source.
    pub fn with_clock(config: TimerConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            accumulated_ms: 0,
            segment_start_ms: None,
            last_state: initial_state(&config),
            feedback: None,
        }
    }

    /// Inject the audio/haptic feedback capability. Failures it reports
    /// are swallowed at the call site inside `tick()`.
    pub fn set_feedback(&mut self, sink: Box<dyn FeedbackSink>) {
        self.feedback = Some(sink);
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn config(&self) -> &TimerConfig {
        &self.config
    }

    pub fn is_running(&self) -> bool {
        self.segment_start_ms.is_some()
    }

    /// Raw elapsed ms since the configuration was last armed, clamped so a
    /// misbehaving clock can never move it backward.
    pub fn raw_elapsed_ms(&self) -> u64 {
        let segment = self
            .segment_start_ms
            .map(|start| self.clock.now_ms().saturating_sub(start))
            .unwrap_or(0);
        self.accumulated_ms
            .saturating_add(segment)
            .max(self.last_state.total_elapsed_ms)
    }

    /// Current state, derived fresh from the clock.
    pub fn state(&self) -> TimerState {
        self.derive(self.raw_elapsed_ms())
    }

    /// Build a full state snapshot event.
    pub fn snapshot(&self) -> Event {
        let state = self.state();
        Event::StateSnapshot {
            mode: self.config.mode,
            state,
            display: format_mm_ss(state.display_ms),
            at: Utc::now(),
        }
    }

    // ── Commands ─────────────────────────────────────────────────────

    /// Replace the configuration wholesale and re-arm from zero.
    pub fn configure(&mut self, config: TimerConfig) -> Event {
        self.config = config;
        self.accumulated_ms = 0;
        self.segment_start_ms = None;
        self.last_state = initial_state(&self.config);
        Event::TimerConfigured {
            mode: self.config.mode,
            display_ms: self.last_state.display_ms,
            total_rounds: self.last_state.total_rounds,
            at: Utc::now(),
        }
    }

    /// Begin (or continue) running. No-op while already running.
    pub fn start(&mut self) -> Option<Event> {
        let resumed = self.accumulated_ms > 0;
        if !self.begin_segment() {
            return None;
        }
        let state = self.last_state;
        Some(if resumed {
            Event::TimerResumed {
                display_ms: state.display_ms,
                at: Utc::now(),
            }
        } else {
            Event::TimerStarted {
                mode: self.config.mode,
                display_ms: state.display_ms,
                total_rounds: state.total_rounds,
                at: Utc::now(),
            }
        })
    }

    /// Freeze the accumulator. No-op while already paused.
    pub fn pause(&mut self) -> Option<Event> {
        let start = self.segment_start_ms.take()?;
        let segment = self.clock.now_ms().saturating_sub(start);
        self.accumulated_ms = self.accumulated_ms.saturating_add(segment);
        let previous = self.last_state;
        self.last_state = self.derive(self.raw_elapsed_ms());
        // A boundary crossed since the last tick still gets its cue here,
        // so pausing at the finish line rings completion. The baseline is
        // updated above, so the next tick cannot ring it again.
        if detect_transition(&previous, &self.last_state).is_some() {
            if let Some(sink) = self.feedback.as_mut() {
                let _ = sink.notify();
            }
        }
        Some(Event::TimerPaused {
            display_ms: self.last_state.display_ms,
            total_elapsed_ms: self.last_state.total_elapsed_ms,
            at: Utc::now(),
        })
    }

    /// Rebase the clock origin without touching accumulated time.
    /// Resuming a never-started timer behaves like `start()`.
    pub fn resume(&mut self) -> Option<Event> {
        self.start()
    }

    /// Zero all timing progress and restore the mode's initial display.
    pub fn reset(&mut self) -> Option<Event> {
        self.accumulated_ms = 0;
        self.segment_start_ms = None;
        self.last_state = initial_state(&self.config);
        Some(Event::TimerReset { at: Utc::now() })
    }

    /// Call periodically while running. Recomputes state from the clock and
    /// returns `Some(Event)` when a phase/round/completion edge occurred,
    /// firing the feedback capability exactly once for that edge.
    ///
    /// Once `is_complete` latches, further ticks are inert; the host stops
    /// rescheduling at that point.
    pub fn tick(&mut self) -> Option<Event> {
        if self.segment_start_ms.is_none() || self.last_state.is_complete {
            return None;
        }
        let previous = self.last_state;
        let next = self.derive(self.raw_elapsed_ms());
        self.last_state = next;
        if next.is_complete {
            // End of the line: close the segment so elapsed time freezes
            // at the value the completion event reports.
            self.accumulated_ms = next.total_elapsed_ms;
            self.segment_start_ms = None;
            self.last_state.is_running = false;
        }

        let transition = detect_transition(&previous, &next)?;
        if let Some(sink) = self.feedback.as_mut() {
            // Fire-and-forget: a dead feedback device must never affect
            // the timer state.
            let _ = sink.notify();
        }
        Some(match transition {
            Transition::Completed => Event::TimerCompleted {
                mode: self.config.mode,
                total_elapsed_ms: next.total_elapsed_ms,
                at: Utc::now(),
            },
            Transition::RoundAdvanced { round } => Event::RoundStarted {
                round,
                total_rounds: next.total_rounds,
                at: Utc::now(),
            },
            Transition::PhaseChanged { to, .. } => Event::PhaseStarted {
                phase: to,
                round: next.current_round,
                display_ms: next.display_ms,
                at: Utc::now(),
            },
        })
    }

    // ── Internal ─────────────────────────────────────────────────────

    /// Open a running segment. Returns false if one is already open.
    fn begin_segment(&mut self) -> bool {
        if self.segment_start_ms.is_some() {
            return false;
        }
        self.segment_start_ms = Some(self.clock.now_ms());
        self.last_state = self.derive(self.raw_elapsed_ms());
        true
    }

    fn derive(&self, raw_elapsed_ms: u64) -> TimerState {
        let slice = mode::project(&self.config, raw_elapsed_ms);
        TimerState {
            display_ms: slice.display_ms,
            is_running: self.segment_start_ms.is_some(),
            current_round: slice.current_round,
            total_rounds: slice.total_rounds,
            phase: slice.phase,
            is_complete: slice.is_complete,
            total_elapsed_ms: raw_elapsed_ms,
        }
    }
}

fn initial_state(config: &TimerConfig) -> TimerState {
    let slice = mode::initial(config);
    TimerState {
        display_ms: slice.display_ms,
        is_running: false,
        current_round: slice.current_round,
        total_rounds: slice.total_rounds,
        phase: slice.phase,
        is_complete: slice.is_complete,
        total_elapsed_ms: 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::timer::ManualClock;
    use std::cell::Cell;
    use std::rc::Rc;

    fn engine(config: TimerConfig) -> (TimerEngine<ManualClock>, ManualClock) {
        let clock = ManualClock::new(1_000_000);
        (TimerEngine::with_clock(config, clock.clone()), clock)
    }

    #[test]
    fn start_pause_resume() {
        let (mut engine, clock) = engine(TimerConfig::countdown(60));
        assert!(!engine.is_running());
        assert_eq!(engine.state().display_ms, 60_000);

        assert!(engine.start().is_some());
        assert!(engine.is_running());

        clock.advance(10_000);
        assert!(engine.pause().is_some());
        assert!(!engine.is_running());
        assert_eq!(engine.state().display_ms, 50_000);

        // Paused time does not count.
        clock.advance(99_000);
        assert_eq!(engine.state().total_elapsed_ms, 10_000);

        assert!(engine.resume().is_some());
        clock.advance(5_000);
        assert_eq!(engine.state().total_elapsed_ms, 15_000);
        assert_eq!(engine.state().display_ms, 45_000);
    }

    #[test]
    fn start_while_running_is_noop() {
        let (mut engine, clock) = engine(TimerConfig::stopwatch());
        assert!(engine.start().is_some());
        clock.advance(1_234);
        assert!(engine.start().is_none());
        assert_eq!(engine.state().total_elapsed_ms, 1_234);
    }

    #[test]
    fn pause_twice_equals_pause_once() {
        let (mut engine, clock) = engine(TimerConfig::stopwatch());
        engine.start();
        clock.advance(2_000);
        assert!(engine.pause().is_some());
        let after_first = engine.state();
        clock.advance(2_000);
        assert!(engine.pause().is_none());
        assert_eq!(engine.state(), after_first);
    }

    #[test]
    fn resume_before_start_behaves_like_start() {
        let (mut engine, clock) = engine(TimerConfig::countdown(30));
        assert!(matches!(engine.resume(), Some(Event::TimerStarted { .. })));
        clock.advance(1_000);
        assert_eq!(engine.state().total_elapsed_ms, 1_000);
    }

    #[test]
    fn backwards_clock_clamps_instead_of_rewinding() {
        let (mut engine, clock) = engine(TimerConfig::stopwatch());
        engine.start();
        clock.advance(5_000);
        engine.tick();
        assert_eq!(engine.state().total_elapsed_ms, 5_000);

        clock.set(1_000_000 - 50_000);
        engine.tick();
        assert_eq!(engine.state().total_elapsed_ms, 5_000);
    }

    #[test]
    fn reset_matches_fresh_configure() {
        let config = TimerConfig::interval(30, 15, 2);
        let (mut engine, clock) = engine(config);
        engine.start();
        clock.advance(37_000);
        engine.tick();
        engine.reset();

        let fresh = TimerEngine::with_clock(config, ManualClock::new(0));
        assert_eq!(engine.state(), fresh.state());
    }

    #[test]
    fn configure_replaces_and_rearms() {
        let (mut engine, clock) = engine(TimerConfig::countdown(60));
        engine.start();
        clock.advance(10_000);
        engine.tick();

        engine.configure(TimerConfig::emom(60, 3));
        let state = engine.state();
        assert!(!state.is_running);
        assert_eq!(state.total_elapsed_ms, 0);
        assert_eq!(state.display_ms, 60_000);
        assert_eq!(state.total_rounds, 3);
    }

    struct CountingSink(Rc<Cell<usize>>);

    impl FeedbackSink for CountingSink {
        fn notify(&mut self) -> Result<(), crate::error::FeedbackError> {
            self.0.set(self.0.get() + 1);
            Ok(())
        }
    }

    struct FailingSink;

    impl FeedbackSink for FailingSink {
        fn notify(&mut self) -> Result<(), crate::error::FeedbackError> {
            Err(crate::error::FeedbackError("no audio device".into()))
        }
    }

    #[test]
    fn feedback_fires_once_per_transition() {
        let fired = Rc::new(Cell::new(0));
        let (mut engine, clock) = engine(TimerConfig::interval(30, 15, 2));
        engine.set_feedback(Box::new(CountingSink(fired.clone())));
        engine.start();

        // Several ticks inside the same phase: no cue.
        for _ in 0..5 {
            clock.advance(1_000);
            assert!(engine.tick().is_none());
        }
        assert_eq!(fired.get(), 0);

        // Cross into rest: one cue.
        clock.advance(26_000); // t = 31 s
        assert!(matches!(engine.tick(), Some(Event::PhaseStarted { .. })));
        assert_eq!(fired.get(), 1);

        // Same tick crosses rest end and round boundary: still one cue.
        clock.advance(15_000); // t = 46 s, round 2 work
        assert!(matches!(engine.tick(), Some(Event::RoundStarted { round: 2, .. })));
        assert_eq!(fired.get(), 2);

        // Run to completion: exactly one completion cue, then inert ticks.
        clock.advance(60_000); // t = 106 s, past 90 s total
        assert!(matches!(engine.tick(), Some(Event::TimerCompleted { .. })));
        assert_eq!(fired.get(), 3);
        clock.advance(1_000);
        assert!(engine.tick().is_none());
        assert_eq!(fired.get(), 3);
    }

    #[test]
    fn pause_at_the_finish_line_still_rings_the_cue() {
        let fired = Rc::new(Cell::new(0));
        let (mut engine, clock) = engine(TimerConfig::countdown(1));
        engine.set_feedback(Box::new(CountingSink(fired.clone())));
        engine.start();

        // Cross the end between two ticks, then pause instead of ticking.
        clock.advance(1_500);
        assert!(matches!(engine.pause(), Some(Event::TimerPaused { .. })));
        assert_eq!(fired.get(), 1);
        assert!(engine.state().is_complete);

        // The baseline already carries the completion: no second cue.
        engine.resume();
        clock.advance(100);
        assert!(engine.tick().is_none());
        assert_eq!(fired.get(), 1);
    }

    #[test]
    fn pause_mid_phase_rings_nothing() {
        let fired = Rc::new(Cell::new(0));
        let (mut engine, clock) = engine(TimerConfig::interval(30, 15, 2));
        engine.set_feedback(Box::new(CountingSink(fired.clone())));
        engine.start();
        clock.advance(10_000);
        engine.pause();
        assert_eq!(fired.get(), 0);
    }

    #[test]
    fn failing_feedback_never_disturbs_state() {
        let (mut engine, clock) = engine(TimerConfig::countdown(1));
        engine.set_feedback(Box::new(FailingSink));
        engine.start();
        clock.advance(1_500);
        assert!(matches!(engine.tick(), Some(Event::TimerCompleted { .. })));
        let state = engine.state();
        assert!(state.is_complete);
        assert_eq!(state.display_ms, 0);
    }

    #[test]
    fn snapshot_returns_valid_event() {
        let (engine, _clock) = engine(TimerConfig::tabata());
        match engine.snapshot() {
            Event::StateSnapshot { state, display, .. } => {
                assert!(!state.is_running);
                assert_eq!(state.display_ms, 20_000);
                assert_eq!(state.total_rounds, 8);
                assert_eq!(display, "00:20");
            }
            _ => panic!("Expected StateSnapshot"),
        }
    }
}
