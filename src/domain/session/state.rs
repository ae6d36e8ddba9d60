//! Recording and playback session states

use std::fmt;

use crate::domain::clip::ClipIndex;

/// Recording session states
///
/// State machine:
///   IDLE -> RECORDING (start)
///   RECORDING -> IDLE (stop, cancel)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordingState {
    #[default]
    Idle,
    Recording,
}

impl RecordingState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
        }
    }

    pub const fn is_recording(&self) -> bool {
        matches!(self, Self::Recording)
    }

    /// Label of the record toggle in this state
    pub const fn toggle_label(&self) -> &'static str {
        match self {
            Self::Idle => "Start Recording",
            Self::Recording => "Stop Recording",
        }
    }
}

impl fmt::Display for RecordingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Playback session states
///
/// `Playing` names the clip whose handle is loaded, whether or not audio is
/// currently audible; per-clip progress lives in the playback status map.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlaybackState {
    #[default]
    Idle,
    Playing { clip: ClipIndex },
}

impl PlaybackState {
    pub const fn active_clip(&self) -> Option<ClipIndex> {
        match self {
            Self::Idle => None,
            Self::Playing { clip } => Some(*clip),
        }
    }

    pub const fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl fmt::Display for PlaybackState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Idle => write!(f, "idle"),
            Self::Playing { clip } => write!(f, "playing {}", clip),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_state_defaults_to_idle() {
        assert_eq!(RecordingState::default(), RecordingState::Idle);
        assert!(!RecordingState::Idle.is_recording());
        assert!(RecordingState::Recording.is_recording());
    }

    #[test]
    fn recording_state_display() {
        assert_eq!(RecordingState::Idle.to_string(), "idle");
        assert_eq!(RecordingState::Recording.to_string(), "recording");
    }

    #[test]
    fn toggle_label_follows_state() {
        assert_eq!(RecordingState::Idle.toggle_label(), "Start Recording");
        assert_eq!(RecordingState::Recording.toggle_label(), "Stop Recording");
    }

    #[test]
    fn playback_state_active_clip() {
        assert_eq!(PlaybackState::Idle.active_clip(), None);
        let playing = PlaybackState::Playing {
            clip: ClipIndex::new(2),
        };
        assert_eq!(playing.active_clip(), Some(ClipIndex::new(2)));
        assert!(!playing.is_idle());
        assert_eq!(playing.to_string(), "playing Voice note 3");
    }
}
