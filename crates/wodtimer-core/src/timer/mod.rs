mod clock;
mod config;
mod display;
mod engine;
mod mode;
mod notifier;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::{TimerConfig, TimerMode};
pub use display::format_mm_ss;
pub use engine::{TimerEngine, TimerState};
pub use mode::Phase;
pub use notifier::{detect_transition, FeedbackSink, SilentSink, Transition};
