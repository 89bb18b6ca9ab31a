//! Transition detection between consecutive ticks.
//!
//! The notifier has no state of its own: it compares the previous and the
//! newly computed [`TimerState`] and reports at most one transition. The
//! engine forwards that single edge to the injected feedback capability,
//! so cue timing is independent of which mode produced the change.

use super::engine::TimerState;
use super::mode::Phase;
use crate::error::FeedbackError;

/// The audio/haptic feedback collaborator.
///
/// Fire-and-forget: the engine calls [`notify`](Self::notify) once per
/// detected transition and discards any error, so a dead speaker can never
/// corrupt the time display.
pub trait FeedbackSink {
    fn notify(&mut self) -> Result<(), FeedbackError>;
}

/// No-op sink for hosts that render silently.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentSink;

impl FeedbackSink for SilentSink {
    fn notify(&mut self) -> Result<(), FeedbackError> {
        Ok(())
    }
}

/// A single edge between two consecutive states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Transition {
    /// Work flipped to rest or back within a round.
    PhaseChanged { from: Phase, to: Phase },
    /// A new round began.
    RoundAdvanced { round: u32 },
    /// The mode's end condition just became true.
    Completed,
}

/// Compare two consecutive states and report at most one transition.
///
/// Completion wins over a simultaneous round change, and a round change
/// wins over a simultaneous phase flip: the last work phase ending exactly
/// as the whole timer completes is one completion cue, not two cues.
pub fn detect_transition(previous: &TimerState, next: &TimerState) -> Option<Transition> {
    if next.is_complete && !previous.is_complete {
        return Some(Transition::Completed);
    }
    if next.is_complete {
        // Already finished; nothing left to announce.
        return None;
    }
    if next.current_round != previous.current_round {
        return Some(Transition::RoundAdvanced {
            round: next.current_round,
        });
    }
    if next.phase != previous.phase {
        return Some(Transition::PhaseChanged {
            from: previous.phase,
            to: next.phase,
        });
    }
    None
}
