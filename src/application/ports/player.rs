//! Playback port interfaces

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::clip::ClipReference;
use crate::domain::playback::EngineStatus;

/// Playback errors
#[derive(Debug, Clone, Error)]
pub enum PlaybackError {
    #[error("Audio output device not available: {0}")]
    DeviceNotAvailable(String),

    #[error("Failed to open clip: {0}")]
    OpenFailed(String),

    #[error("Failed to decode clip: {0}")]
    DecodeFailed(String),

    #[error("Playback failed: {0}")]
    PlaybackFailed(String),

    #[error("Seek failed: {0}")]
    SeekFailed(String),

    #[error("Playback handle was already released")]
    Released,
}

/// Status callback registered with a playback handle.
/// Invoked repeatedly from engine-owned threads while subscribed.
pub type StatusCallback = Arc<dyn Fn(EngineStatus) + Send + Sync>;

/// Options for loading a clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackOptions {
    /// Start playing as soon as the clip is loaded
    pub autoplay: bool,
    /// How often position updates are pushed while loaded
    pub status_interval: Duration,
}

/// Port for clip playback
#[async_trait]
pub trait Player: Send + Sync {
    type Handle: PlaybackHandle;

    /// Load a clip and subscribe `on_status` to its status updates.
    async fn create_playback(
        &self,
        clip: &ClipReference,
        options: PlaybackOptions,
        on_status: StatusCallback,
    ) -> Result<Self::Handle, PlaybackError>;
}

/// A loaded clip owned by the engine
#[async_trait]
pub trait PlaybackHandle: Send + Sync {
    /// Start or resume playback
    async fn play(&self) -> Result<(), PlaybackError>;

    /// Move to an absolute position in milliseconds
    async fn seek_to(&self, position_ms: u64) -> Result<(), PlaybackError>;

    /// Drop the status subscription.
    ///
    /// Once this returns, the callback is never invoked again, including a
    /// call that was in flight when unsubscribing began.
    fn unsubscribe_status(&self);

    /// Unload the clip and free the output device.
    async fn release(&mut self) -> Result<(), PlaybackError>;
}
