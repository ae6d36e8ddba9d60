//! Per-clip playback states

use std::collections::BTreeMap;

use super::PlaybackStatus;
use crate::domain::clip::ClipIndex;

/// Last observed playback status of every clip.
///
/// Lets each clip row keep its own position while another clip is the
/// active one. Entries are never removed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PlaybackStatesByClip {
    states: BTreeMap<ClipIndex, PlaybackStatus>,
}

impl PlaybackStatesByClip {
    pub fn new() -> Self {
        Self::default()
    }

    /// Status for a clip, or the default status if none was observed yet
    pub fn get(&self, index: ClipIndex) -> PlaybackStatus {
        self.states.get(&index).copied().unwrap_or_default()
    }

    /// Whether a status was ever recorded for this clip
    pub fn contains(&self, index: ClipIndex) -> bool {
        self.states.contains_key(&index)
    }

    /// Record the latest status for a clip, creating the entry if needed
    pub fn set(&mut self, index: ClipIndex, status: PlaybackStatus) {
        self.states.insert(index, status);
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }
}
