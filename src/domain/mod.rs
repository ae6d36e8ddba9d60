//! Domain layer - Core state and value objects
//!
//! Contains clip references, the append-only clip store, playback status
//! tracking, recording presets, session states, clock formatting,
//! configuration and errors.
//! This layer has no dependencies on external systems.

pub mod clip;
pub mod clock;
pub mod config;
pub mod error;
pub mod library;
pub mod playback;
pub mod recording;
pub mod session;

// Re-export common types
pub use clip::{ClipIndex, ClipReference, ClipStore};
pub use clock::{format_millis, parse_clock};
pub use config::AppConfig;
pub use error::*;
pub use library::{ClipRow, Library};
pub use playback::{EngineStatus, PlaybackStatesByClip, PlaybackStatus};
pub use recording::RecordingQuality;
pub use session::{PlaybackState, RecordingState};
