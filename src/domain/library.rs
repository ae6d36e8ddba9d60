//! Observable voice-note library

use crate::domain::clip::{ClipIndex, ClipReference, ClipStore};
use crate::domain::playback::{EngineStatus, PlaybackStatesByClip, PlaybackStatus};
use crate::domain::session::{PlaybackState, RecordingState};

/// Everything presentation renders: the clips, their playback states and
/// the state of both sessions.
///
/// Only the recording session appends clips; only playback status callbacks
/// and the playback session touch playback fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Library {
    clips: ClipStore,
    states: PlaybackStatesByClip,
    recording: RecordingState,
    playback: PlaybackState,
}

/// One rendered row of the library
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClipRow<'a> {
    pub index: ClipIndex,
    pub clip: &'a ClipReference,
    pub status: PlaybackStatus,
    pub is_active: bool,
}

impl Library {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clips(&self) -> &ClipStore {
        &self.clips
    }

    pub fn states(&self) -> &PlaybackStatesByClip {
        &self.states
    }

    pub fn recording(&self) -> RecordingState {
        self.recording
    }

    pub fn playback(&self) -> PlaybackState {
        self.playback
    }

    /// Status of one clip (default if never observed)
    pub fn status(&self, index: ClipIndex) -> PlaybackStatus {
        self.states.get(index)
    }

    /// Append a finished recording with a fresh default status
    pub fn append_clip(&mut self, clip: ClipReference) -> ClipIndex {
        let index = self.clips.append(clip);
        self.states.set(index, PlaybackStatus::default());
        index
    }

    /// Apply an engine status to a clip.
    ///
    /// Returns whether anything changed; statuses that are not loaded never do.
    pub fn apply_status(&mut self, index: ClipIndex, status: &EngineStatus) -> bool {
        let Some(next) = PlaybackStatus::from_engine(status) else {
            return false;
        };
        if self.states.contains(index) && self.states.get(index) == next {
            return false;
        }
        self.states.set(index, next);
        true
    }

    pub fn set_recording(&mut self, state: RecordingState) {
        self.recording = state;
    }

    pub fn set_playback(&mut self, state: PlaybackState) {
        self.playback = state;
    }

    /// Rows in recording order
    pub fn rows(&self) -> impl Iterator<Item = ClipRow<'_>> {
        let active = self.playback.active_clip();
        self.clips.iter().map(move |(index, clip)| ClipRow {
            index,
            clip,
            status: self.states.get(index),
            is_active: active == Some(index),
        })
    }
}
