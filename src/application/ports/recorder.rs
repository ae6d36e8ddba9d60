//! Recording port interfaces

use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::recording::RecordingQuality;

/// Recording errors
#[derive(Debug, Clone, Error)]
pub enum RecordingError {
    #[error("No audio input device available")]
    NoAudioDevice,

    #[error("Failed to configure audio mode: {0}")]
    ConfigureFailed(String),

    #[error("Failed to start recording: {0}")]
    StartFailed(String),

    #[error("Failed to finalize recording: {0}")]
    FinalizeFailed(String),

    #[error("Failed to write clip: {0}")]
    WriteFailed(String),
}

/// Audio session mode requested before recording.
///
/// Platforms without a silent switch ignore `plays_in_silent_mode`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AudioMode {
    pub allows_recording: bool,
    pub plays_in_silent_mode: bool,
}

impl AudioMode {
    /// Recording-capable mode
    pub const fn recording(plays_in_silent_mode: bool) -> Self {
        Self {
            allows_recording: true,
            plays_in_silent_mode,
        }
    }
}

/// Options for a new recording
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordingOptions {
    pub quality: RecordingQuality,
    /// Directory finished clips are written to
    pub directory: PathBuf,
}

/// Port for microphone recording
#[async_trait]
pub trait Recorder: Send + Sync {
    type Handle: RecordingHandle;

    /// Switch the audio subsystem into the given mode.
    async fn configure(&self, mode: AudioMode) -> Result<(), RecordingError>;

    /// Begin capturing a new clip.
    ///
    /// # Returns
    /// A handle owning the in-progress recording
    async fn create_recording(
        &self,
        options: &RecordingOptions,
    ) -> Result<Self::Handle, RecordingError>;
}

/// An in-progress recording owned by the engine
#[async_trait]
pub trait RecordingHandle: Send + Sync {
    /// Finalize the recording and release the microphone.
    ///
    /// # Returns
    /// The raw clip locator, or `None` when nothing usable was captured.
    /// On error the handle stays valid and the call may be retried.
    async fn stop_and_release(&mut self) -> Result<Option<String>, RecordingError>;

    /// Release the microphone and throw the captured audio away.
    async fn discard(&mut self) -> Result<(), RecordingError>;

    /// Milliseconds captured so far
    fn elapsed_ms(&self) -> u64;
}
