//! Domain error types

use thiserror::Error;

/// Errors reported by the recording and playback sessions.
///
/// Every variant is returned to the caller of the operation that triggered it;
/// nothing is retried automatically.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SessionError {
    #[error("Microphone permission denied. Grant access and reopen voice-notes.")]
    PermissionDenied,

    #[error("Failed to start recording: {0}")]
    RecordingStartFailed(String),

    #[error("Failed to stop recording: {0}")]
    RecordingStopFailed(String),

    #[error("Failed to load clip for playback: {0}")]
    PlaybackLoadFailed(String),

    #[error("Seek failed: {0}")]
    SeekFailed(String),
}

/// Error when parsing a clock string such as `1:05` or `65000ms`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid time: \"{input}\". Expected M:SS (e.g., 0:42, 1:05) or milliseconds (e.g., 1500ms)")]
pub struct ClockParseError {
    pub input: String,
}

/// Error when configuration fails
#[derive(Debug, Clone, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(String),

    #[error("Failed to parse config file: {0}")]
    ParseError(String),

    #[error("Failed to write config file: {0}")]
    WriteError(String),

    #[error("Invalid config value for '{key}': {message}")]
    ValidationError { key: String, message: String },

    #[error("Config file already exists at: {0}")]
    AlreadyExists(String),
}
