//! Scriptable in-memory adapters for session tests

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;

use super::ports::{
    AudioMode, MicrophonePermission, PermissionStatus, PlaybackError, PlaybackHandle,
    PlaybackOptions, Player, Recorder, RecordingError, RecordingHandle, RecordingOptions,
    StatusCallback,
};
use crate::domain::clip::ClipReference;
use crate::domain::playback::EngineStatus;

pub struct MockPermission(pub PermissionStatus);

#[async_trait]
impl MicrophonePermission for MockPermission {
    async fn request(&self) -> PermissionStatus {
        self.0
    }
}

#[derive(Default)]
pub struct RecorderScript {
    pub fail_configure: bool,
    pub fail_create: bool,
    /// Locators for successive stops; defaults to `clip-<n>.wav`
    pub locators: VecDeque<Option<String>>,
    /// Number of upcoming stops that fail
    pub failing_stops: usize,
    /// Reported by every active handle
    pub elapsed_ms: u64,
}

#[derive(Default)]
pub struct RecorderLog {
    pub configured: Vec<AudioMode>,
    pub created: usize,
    pub stopped: usize,
    pub discarded: usize,
}

#[derive(Clone, Default)]
pub struct MockRecorder {
    pub script: Arc<Mutex<RecorderScript>>,
    pub log: Arc<Mutex<RecorderLog>>,
}

impl MockRecorder {
    pub fn created(&self) -> usize {
        self.log.lock().unwrap().created
    }
}

pub struct MockRecordingHandle {
    id: usize,
    recorder: MockRecorder,
}

#[async_trait]
impl Recorder for MockRecorder {
    type Handle = MockRecordingHandle;

    async fn configure(&self, mode: AudioMode) -> Result<(), RecordingError> {
        self.log.lock().unwrap().configured.push(mode);
        if self.script.lock().unwrap().fail_configure {
            return Err(RecordingError::ConfigureFailed("audio session busy".into()));
        }
        Ok(())
    }

    async fn create_recording(
        &self,
        _options: &RecordingOptions,
    ) -> Result<MockRecordingHandle, RecordingError> {
        if self.script.lock().unwrap().fail_create {
            return Err(RecordingError::StartFailed("device busy".into()));
        }
        let mut log = self.log.lock().unwrap();
        log.created += 1;
        Ok(MockRecordingHandle {
            id: log.created - 1,
            recorder: self.clone(),
        })
    }
}

#[async_trait]
impl RecordingHandle for MockRecordingHandle {
    async fn stop_and_release(&mut self) -> Result<Option<String>, RecordingError> {
        let mut script = self.recorder.script.lock().unwrap();
        if script.failing_stops > 0 {
            script.failing_stops -= 1;
            return Err(RecordingError::WriteFailed("disk full".into()));
        }
        self.recorder.log.lock().unwrap().stopped += 1;
        Ok(script
            .locators
            .pop_front()
            .unwrap_or_else(|| Some(format!("clip-{}.wav", self.id))))
    }

    async fn discard(&mut self) -> Result<(), RecordingError> {
        self.recorder.log.lock().unwrap().discarded += 1;
        Ok(())
    }

    fn elapsed_ms(&self) -> u64 {
        self.recorder.script.lock().unwrap().elapsed_ms
    }
}

#[derive(Default)]
pub struct PlayerScript {
    pub fail_load: bool,
    pub fail_play: bool,
    pub fail_seek: bool,
    /// Duration reported by the status pushed on `play()`
    pub duration_ms: Option<u64>,
}

type Subscription = Arc<Mutex<Option<StatusCallback>>>;

#[derive(Clone, Default)]
pub struct MockPlayer {
    pub script: Arc<Mutex<PlayerScript>>,
    events: Arc<Mutex<Vec<String>>>,
    subscriptions: Arc<Mutex<Vec<Subscription>>>,
}

impl MockPlayer {
    /// Engine calls in the order they happened
    pub fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    /// Push a status through the handle created `handle`-th (zero-based).
    /// Returns whether a subscriber received it.
    pub fn emit(&self, handle: usize, status: EngineStatus) -> bool {
        let subscription = Arc::clone(&self.subscriptions.lock().unwrap()[handle]);
        let guard = subscription.lock().unwrap();
        match guard.as_ref() {
            Some(callback) => {
                callback(status);
                true
            }
            None => false,
        }
    }

    fn record(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

pub struct MockPlaybackHandle {
    id: usize,
    subscription: Subscription,
    player: MockPlayer,
}

#[async_trait]
impl Player for MockPlayer {
    type Handle = MockPlaybackHandle;

    async fn create_playback(
        &self,
        clip: &ClipReference,
        _options: PlaybackOptions,
        on_status: StatusCallback,
    ) -> Result<MockPlaybackHandle, PlaybackError> {
        if self.script.lock().unwrap().fail_load {
            return Err(PlaybackError::OpenFailed(format!("{}: no such file", clip)));
        }
        let subscription = Arc::new(Mutex::new(Some(on_status)));
        let id = {
            let mut subscriptions = self.subscriptions.lock().unwrap();
            subscriptions.push(Arc::clone(&subscription));
            subscriptions.len() - 1
        };
        self.record(format!("create {} {}", id, clip));
        Ok(MockPlaybackHandle {
            id,
            subscription,
            player: self.clone(),
        })
    }
}

#[async_trait]
impl PlaybackHandle for MockPlaybackHandle {
    async fn play(&self) -> Result<(), PlaybackError> {
        self.player.record(format!("play {}", self.id));
        let (fail, duration_ms) = {
            let script = self.player.script.lock().unwrap();
            (script.fail_play, script.duration_ms)
        };
        if fail {
            return Err(PlaybackError::PlaybackFailed("output device lost".into()));
        }
        // a fresh handle always starts from the top
        if let Some(callback) = self.subscription.lock().unwrap().as_ref() {
            callback(EngineStatus {
                is_loaded: true,
                position_ms: 0,
                duration_ms,
                is_playing: true,
            });
        }
        Ok(())
    }

    async fn seek_to(&self, position_ms: u64) -> Result<(), PlaybackError> {
        self.player.record(format!("seek {} {}", self.id, position_ms));
        if self.player.script.lock().unwrap().fail_seek {
            return Err(PlaybackError::SeekFailed("not seekable".into()));
        }
        Ok(())
    }

    fn unsubscribe_status(&self) {
        self.player.record(format!("unsubscribe {}", self.id));
        *self.subscription.lock().unwrap() = None;
    }

    async fn release(&mut self) -> Result<(), PlaybackError> {
        self.player.record(format!("release {}", self.id));
        Ok(())
    }
}
