//! Application layer - Sessions and port interfaces
//!
//! Contains the recording and playback sessions, the library they share,
//! and trait definitions for the platform audio engine.

pub mod handle_slot;
pub mod playback_session;
pub mod ports;
pub mod recording_session;
pub mod shared_library;
pub mod voice_notes;

#[cfg(test)]
pub(crate) mod testing;

// Re-export use cases
pub use playback_session::PlaybackSession;
pub use recording_session::RecordingSession;
pub use shared_library::SharedLibrary;
pub use voice_notes::{ToggleOutcome, VoiceNotes, VoiceNotesConfig};
