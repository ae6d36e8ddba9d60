//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the sessions and the
//! platform audio engine, plus configuration storage.

pub mod config;
pub mod permission;
pub mod player;
pub mod recorder;

// Re-export common types
pub use config::ConfigStore;
pub use permission::{MicrophonePermission, PermissionStatus};
pub use player::{PlaybackError, PlaybackHandle, PlaybackOptions, Player, StatusCallback};
pub use recorder::{AudioMode, Recorder, RecordingError, RecordingHandle, RecordingOptions};
