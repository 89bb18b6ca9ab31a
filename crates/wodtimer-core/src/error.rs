//! Core error types for wodtimer-core.
//!
//! The timer engine itself is infallible arithmetic over elapsed time;
//! errors only arise at the configuration-storage and feedback-device
//! boundaries.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for wodtimer-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Feedback-device errors
    #[error("Feedback error: {0}")]
    Feedback(#[from] FeedbackError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors with context
    #[error("{0}")]
    Custom(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(String),
}

/// Failure reported by the audio/haptic feedback capability.
///
/// Always swallowed at the engine's call site: a broken beep must never
/// desynchronize the timer state.
#[derive(Error, Debug)]
#[error("Feedback device failure: {0}")]
pub struct FeedbackError(pub String);

impl From<std::io::Error> for FeedbackError {
    fn from(err: std::io::Error) -> Self {
        FeedbackError(err.to_string())
    }
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn boundary_errors_convert_into_core_error() {
        let config: CoreError = ConfigError::UnknownKey("timer.nope".into()).into();
        assert!(matches!(config, CoreError::Config(_)));
        assert_eq!(
            config.to_string(),
            "Configuration error: Unknown configuration key: timer.nope"
        );

        let feedback: CoreError = FeedbackError("no audio device".into()).into();
        assert!(matches!(feedback, CoreError::Feedback(_)));

        let load: CoreError = ConfigError::LoadFailed {
            path: PathBuf::from("/tmp/config.toml"),
            message: "denied".into(),
        }
        .into();
        assert!(load.to_string().contains("/tmp/config.toml"));
    }
}
