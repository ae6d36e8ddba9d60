//! Recording session
//!
//! Mediates access to the microphone so at most one recording is active.
//! A successful stop appends the finished clip to the shared library.

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::handle_slot::{HandleSlot, Releasable};
use super::ports::{
    AudioMode, PermissionStatus, Recorder, RecordingError, RecordingHandle, RecordingOptions,
};
use super::shared_library::SharedLibrary;
use crate::domain::clip::{ClipIndex, ClipReference};
use crate::domain::error::SessionError;
use crate::domain::session::RecordingState;

/// In-progress recording owned by the session.
/// Releasing it discards the captured audio.
struct ActiveRecording<H> {
    handle: H,
}

#[async_trait]
impl<H: RecordingHandle> Releasable for ActiveRecording<H> {
    type Error = RecordingError;

    async fn release(&mut self) -> Result<(), RecordingError> {
        self.handle.discard().await
    }
}

/// Recording session.
///
/// State machine:
///   IDLE -> RECORDING (start)
///   RECORDING -> IDLE (stop, cancel)
pub struct RecordingSession<R: Recorder> {
    recorder: R,
    options: RecordingOptions,
    mode: AudioMode,
    permission: PermissionStatus,
    slot: HandleSlot<ActiveRecording<R::Handle>>,
    library: SharedLibrary,
}

impl<R: Recorder> RecordingSession<R> {
    /// Create an idle session.
    ///
    /// `permission` is the outcome of the one permission request made when
    /// the screen opened; it is not re-queried.
    pub fn new(
        recorder: R,
        options: RecordingOptions,
        mode: AudioMode,
        permission: PermissionStatus,
        library: SharedLibrary,
    ) -> Self {
        Self {
            recorder,
            options,
            mode,
            permission,
            slot: HandleSlot::new(),
            library,
        }
    }

    pub fn state(&self) -> RecordingState {
        if self.slot.is_occupied() {
            RecordingState::Recording
        } else {
            RecordingState::Idle
        }
    }

    /// Milliseconds captured by the active recording, 0 when idle
    pub fn elapsed_ms(&self) -> u64 {
        self.slot.get().map_or(0, |active| active.handle.elapsed_ms())
    }

    /// Start recording. Does nothing if a recording is already active.
    pub async fn start(&mut self) -> Result<(), SessionError> {
        if self.slot.is_occupied() {
            debug!("start ignored, already recording");
            return Ok(());
        }
        if !self.permission.is_granted() {
            return Err(SessionError::PermissionDenied);
        }

        self.recorder.configure(self.mode).await.map_err(|e| {
            warn!(error = %e, "audio mode configuration failed");
            SessionError::RecordingStartFailed(e.to_string())
        })?;

        let recorder = &self.recorder;
        let options = &self.options;
        self.slot
            .acquire(move || async move {
                let handle = recorder.create_recording(options).await?;
                Ok::<_, RecordingError>(ActiveRecording { handle })
            })
            .await
            .map_err(|e| {
                warn!(error = %e, "recording did not start");
                SessionError::RecordingStartFailed(e.to_string())
            })?;

        self.library.set_recording(RecordingState::Recording);
        info!(quality = %self.options.quality, "recording started");
        Ok(())
    }

    /// Stop recording and keep the clip.
    ///
    /// # Returns
    /// The index of the appended clip; `None` when idle or when the engine
    /// produced no usable locator, in which case the clip is dropped.
    /// On failure the recording stays active so stop can be retried.
    pub async fn stop(&mut self) -> Result<Option<ClipIndex>, SessionError> {
        let Some(active) = self.slot.get_mut() else {
            debug!("stop ignored, not recording");
            return Ok(None);
        };

        let locator = active.handle.stop_and_release().await.map_err(|e| {
            warn!(error = %e, "recording could not be finalized, keeping it active");
            SessionError::RecordingStopFailed(e.to_string())
        })?;

        // already released by stop_and_release
        self.slot.take();
        self.library.set_recording(RecordingState::Idle);

        match locator.and_then(ClipReference::from_locator) {
            Some(clip) => {
                let index = self.library.append_clip(clip);
                info!(clip = %index, "recording saved");
                Ok(Some(index))
            }
            None => {
                warn!("recording produced no clip, dropping it");
                Ok(None)
            }
        }
    }

    /// Discard the active recording without keeping a clip.
    ///
    /// # Returns
    /// Whether a recording was active. The session is idle afterwards even
    /// if the engine failed to discard cleanly.
    pub async fn cancel(&mut self) -> Result<bool, SessionError> {
        let result = self.slot.release().await;
        self.library.set_recording(RecordingState::Idle);
        match result {
            Ok(was_recording) => {
                if was_recording {
                    info!("recording cancelled");
                }
                Ok(was_recording)
            }
            Err(e) => {
                warn!(error = %e, "recording discarded with errors");
                Err(SessionError::RecordingStopFailed(e.to_string()))
            }
        }
    }

    /// Tear down on exit
    pub async fn shutdown(&mut self) {
        if let Err(e) = self.cancel().await {
            warn!(error = %e, "recording teardown failed");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::testing::MockRecorder;
    use crate::domain::playback::PlaybackStatus;
    use crate::domain::recording::RecordingQuality;

    fn session(recorder: &MockRecorder, permission: PermissionStatus) -> RecordingSession<MockRecorder> {
        RecordingSession::new(
            recorder.clone(),
            RecordingOptions {
                quality: RecordingQuality::Speech,
                directory: std::env::temp_dir(),
            },
            AudioMode::recording(true),
            permission,
            SharedLibrary::new(),
        )
    }

    #[tokio::test]
    async fn start_from_idle() {
        let recorder = MockRecorder::default();
        let mut session = session(&recorder, PermissionStatus::Granted);

        assert_eq!(session.state(), RecordingState::Idle);
        session.start().await.unwrap();

        assert_eq!(session.state(), RecordingState::Recording);
        assert_eq!(session.library.recording(), RecordingState::Recording);
        assert_eq!(recorder.created(), 1);
        assert_eq!(
            recorder.log.lock().unwrap().configured,
            vec![AudioMode {
                allows_recording: true,
                plays_in_silent_mode: true
            }]
        );
    }

    #[tokio::test]
    async fn second_start_is_noop() {
        let recorder = MockRecorder::default();
        let mut session = session(&recorder, PermissionStatus::Granted);

        session.start().await.unwrap();
        session.start().await.unwrap();

        assert_eq!(session.state(), RecordingState::Recording);
        assert_eq!(recorder.created(), 1);
        assert_eq!(recorder.log.lock().unwrap().configured.len(), 1);
    }

    #[tokio::test]
    async fn start_without_permission_fails() {
        let recorder = MockRecorder::default();
        let mut session = session(&recorder, PermissionStatus::Denied);

        assert_eq!(session.start().await, Err(SessionError::PermissionDenied));
        assert_eq!(session.state(), RecordingState::Idle);
        assert_eq!(recorder.created(), 0);
    }

    #[tokio::test]
    async fn failed_start_stays_idle() {
        let recorder = MockRecorder::default();
        recorder.script.lock().unwrap().fail_create = true;
        let mut session = session(&recorder, PermissionStatus::Granted);

        let err = session.start().await.unwrap_err();
        assert!(matches!(err, SessionError::RecordingStartFailed(_)));
        assert_eq!(session.state(), RecordingState::Idle);
        assert_eq!(session.library.recording(), RecordingState::Idle);
    }

    #[tokio::test]
    async fn failed_configure_stays_idle() {
        let recorder = MockRecorder::default();
        recorder.script.lock().unwrap().fail_configure = true;
        let mut session = session(&recorder, PermissionStatus::Granted);

        let err = session.start().await.unwrap_err();
        assert!(matches!(err, SessionError::RecordingStartFailed(_)));
        assert_eq!(recorder.created(), 0);
    }

    #[tokio::test]
    async fn stop_when_idle_is_noop() {
        let recorder = MockRecorder::default();
        let mut session = session(&recorder, PermissionStatus::Granted);

        assert_eq!(session.stop().await, Ok(None));
        assert_eq!(recorder.log.lock().unwrap().stopped, 0);
    }

    #[tokio::test]
    async fn stop_appends_clip_with_default_status() {
        let recorder = MockRecorder::default();
        let mut session = session(&recorder, PermissionStatus::Granted);

        session.start().await.unwrap();
        let index = session.stop().await.unwrap();

        assert_eq!(index, Some(ClipIndex::new(0)));
        assert_eq!(session.state(), RecordingState::Idle);
        let library = session.library.snapshot();
        assert_eq!(library.clips().len(), 1);
        assert_eq!(
            library.clips().get(ClipIndex::new(0)).unwrap().locator(),
            "clip-0.wav"
        );
        assert_eq!(
            library.status(ClipIndex::new(0)),
            PlaybackStatus {
                position_ms: 0,
                duration_ms: 1,
                is_playing: false
            }
        );
    }

    #[tokio::test]
    async fn n_stops_append_n_clips_in_order() {
        let recorder = MockRecorder::default();
        let mut session = session(&recorder, PermissionStatus::Granted);

        for expected in 0..4 {
            session.start().await.unwrap();
            assert_eq!(session.state(), RecordingState::Recording);
            assert_eq!(session.stop().await.unwrap(), Some(ClipIndex::new(expected)));
            assert_eq!(session.state(), RecordingState::Idle);
        }

        let library = session.library.snapshot();
        let locators: Vec<_> = library
            .clips()
            .iter()
            .map(|(_, clip)| clip.locator().to_string())
            .collect();
        assert_eq!(locators, vec!["clip-0.wav", "clip-1.wav", "clip-2.wav", "clip-3.wav"]);
    }

    #[tokio::test]
    async fn empty_locator_is_dropped() {
        let recorder = MockRecorder::default();
        {
            let mut script = recorder.script.lock().unwrap();
            script.locators.push_back(None);
            script.locators.push_back(Some("  ".to_string()));
        }
        let mut session = session(&recorder, PermissionStatus::Granted);

        for _ in 0..2 {
            session.start().await.unwrap();
            assert_eq!(session.stop().await, Ok(None));
            assert_eq!(session.state(), RecordingState::Idle);
        }
        assert!(session.library.snapshot().clips().is_empty());
    }

    #[tokio::test]
    async fn failed_stop_keeps_recording() {
        let recorder = MockRecorder::default();
        recorder.script.lock().unwrap().failing_stops = 1;
        let mut session = session(&recorder, PermissionStatus::Granted);

        session.start().await.unwrap();
        let err = session.stop().await.unwrap_err();
        assert!(matches!(err, SessionError::RecordingStopFailed(_)));
        assert_eq!(session.state(), RecordingState::Recording);

        // the same handle can be stopped again
        assert_eq!(session.stop().await, Ok(Some(ClipIndex::new(0))));
        assert_eq!(recorder.created(), 1);
    }

    #[tokio::test]
    async fn cancel_discards_without_clip() {
        let recorder = MockRecorder::default();
        let mut session = session(&recorder, PermissionStatus::Granted);

        assert_eq!(session.cancel().await, Ok(false));
        session.start().await.unwrap();
        assert_eq!(session.cancel().await, Ok(true));

        assert_eq!(session.state(), RecordingState::Idle);
        assert_eq!(recorder.log.lock().unwrap().discarded, 1);
        assert!(session.library.snapshot().clips().is_empty());
    }
}
