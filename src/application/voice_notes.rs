//! Voice notes use case
//!
//! Owns both sessions and the library they share. The permission request
//! happens exactly once, when the notes are opened.

use tokio::sync::watch;
use tracing::{info, warn};

use super::playback_session::PlaybackSession;
use super::ports::{
    AudioMode, MicrophonePermission, PermissionStatus, PlaybackOptions, Player, Recorder,
    RecordingOptions,
};
use super::recording_session::RecordingSession;
use super::shared_library::SharedLibrary;
use crate::domain::clip::ClipIndex;
use crate::domain::error::SessionError;
use crate::domain::library::Library;
use crate::domain::session::{PlaybackState, RecordingState};

/// Settings resolved from configuration before opening
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceNotesConfig {
    pub recording: RecordingOptions,
    pub mode: AudioMode,
    pub playback: PlaybackOptions,
}

/// Result of the record toggle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleOutcome {
    Started,
    Stopped(Option<ClipIndex>),
}

pub struct VoiceNotes<R: Recorder, P: Player> {
    permission: PermissionStatus,
    recording: RecordingSession<R>,
    playback: PlaybackSession<P>,
    library: SharedLibrary,
}

impl<R: Recorder, P: Player> VoiceNotes<R, P> {
    /// Request microphone permission and set up idle sessions.
    ///
    /// A denied permission does not fail opening; recording is refused for
    /// the lifetime of these notes while playback keeps working.
    pub async fn open(
        permission: &impl MicrophonePermission,
        recorder: R,
        player: P,
        config: VoiceNotesConfig,
    ) -> Self {
        let status = permission.request().await;
        if status.is_granted() {
            info!("microphone permission granted");
        } else {
            warn!("microphone permission denied, recording disabled");
        }

        let library = SharedLibrary::new();
        Self {
            permission: status,
            recording: RecordingSession::new(
                recorder,
                config.recording,
                config.mode,
                status,
                library.clone(),
            ),
            playback: PlaybackSession::new(player, config.playback, library.clone()),
            library,
        }
    }

    pub fn permission(&self) -> PermissionStatus {
        self.permission
    }

    pub fn recording_state(&self) -> RecordingState {
        self.recording.state()
    }

    pub fn playback_state(&self) -> PlaybackState {
        self.playback.state()
    }

    pub fn recording_elapsed_ms(&self) -> u64 {
        self.recording.elapsed_ms()
    }

    /// Watch library changes for rendering
    pub fn subscribe(&self) -> watch::Receiver<Library> {
        self.library.subscribe()
    }

    pub fn snapshot(&self) -> Library {
        self.library.snapshot()
    }

    pub async fn start_recording(&mut self) -> Result<(), SessionError> {
        self.recording.start().await
    }

    pub async fn stop_recording(&mut self) -> Result<Option<ClipIndex>, SessionError> {
        self.recording.stop().await
    }

    /// Start when idle, stop when recording
    pub async fn toggle_recording(&mut self) -> Result<ToggleOutcome, SessionError> {
        match self.recording.state() {
            RecordingState::Idle => {
                self.recording.start().await?;
                Ok(ToggleOutcome::Started)
            }
            RecordingState::Recording => {
                let clip = self.recording.stop().await?;
                Ok(ToggleOutcome::Stopped(clip))
            }
        }
    }

    pub async fn cancel_recording(&mut self) -> Result<bool, SessionError> {
        self.recording.cancel().await
    }

    pub async fn play(&mut self, index: ClipIndex) -> Result<(), SessionError> {
        self.playback.play(index).await
    }

    /// Seek within a clip's row.
    ///
    /// Only the loaded clip can be seeked; seeking any other row fails
    /// rather than silently loading it.
    pub async fn seek(&self, index: ClipIndex, position_ms: u64) -> Result<(), SessionError> {
        match self.playback.state().active_clip() {
            Some(active) if active == index => self.playback.seek(position_ms).await,
            Some(active) => Err(SessionError::SeekFailed(format!(
                "{} is not loaded, {} is",
                index, active
            ))),
            None => Err(SessionError::SeekFailed(format!("{} is not loaded", index))),
        }
    }

    /// Tear down both sessions. An unfinished recording is discarded.
    pub async fn shutdown(&mut self) {
        self.playback.shutdown().await;
        self.recording.shutdown().await;
        info!("voice notes closed");
    }
}
