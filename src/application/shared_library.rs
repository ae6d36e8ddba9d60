//! Library state shared between sessions and presentation
//!
//! Backed by a `tokio::sync::watch` channel: sessions and status callbacks
//! write through the sender, presentation subscribes for change
//! notifications.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::clip::{ClipIndex, ClipReference};
use crate::domain::library::Library;
use crate::domain::playback::EngineStatus;
use crate::domain::session::{PlaybackState, RecordingState};

/// Cloneable handle to the observable library
#[derive(Clone)]
pub struct SharedLibrary {
    sender: Arc<watch::Sender<Library>>,
}

impl SharedLibrary {
    pub fn new() -> Self {
        let (sender, _) = watch::channel(Library::new());
        Self {
            sender: Arc::new(sender),
        }
    }

    /// Subscribe to library changes
    pub fn subscribe(&self) -> watch::Receiver<Library> {
        self.sender.subscribe()
    }

    /// Clone the current library state
    pub fn snapshot(&self) -> Library {
        self.sender.borrow().clone()
    }

    /// Look up a clip by index
    pub fn clip(&self, index: ClipIndex) -> Option<ClipReference> {
        self.sender.borrow().clips().get(index).cloned()
    }

    pub fn recording(&self) -> RecordingState {
        self.sender.borrow().recording()
    }

    pub fn playback(&self) -> PlaybackState {
        self.sender.borrow().playback()
    }

    /// Append a finished recording, returning its index
    pub fn append_clip(&self, clip: ClipReference) -> ClipIndex {
        let mut index = ClipIndex::new(0);
        self.sender.send_modify(|library| index = library.append_clip(clip));
        index
    }

    /// Apply an engine status to one clip; subscribers are only woken on change
    pub fn apply_status(&self, index: ClipIndex, status: &EngineStatus) -> bool {
        self.sender
            .send_if_modified(|library| library.apply_status(index, status))
    }

    pub fn set_recording(&self, state: RecordingState) {
        self.sender.send_if_modified(|library| {
            let changed = library.recording() != state;
            library.set_recording(state);
            changed
        });
    }

    pub fn set_playback(&self, state: PlaybackState) {
        self.sender.send_if_modified(|library| {
            let changed = library.playback() != state;
            library.set_playback(state);
            changed
        });
    }
}

impl Default for SharedLibrary {
    fn default() -> Self {
        Self::new()
    }
}
