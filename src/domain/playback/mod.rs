//! Playback status tracking

mod states;
mod status;

pub use states::PlaybackStatesByClip;
pub use status::{EngineStatus, PlaybackStatus, MIN_DURATION_MS};
