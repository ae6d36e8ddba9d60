//! Playback status value objects

/// Smallest duration ever reported to presentation.
///
/// Keeps scrub ranges non-empty and progress ratios finite.
pub const MIN_DURATION_MS: u64 = 1;

/// Status payload pushed by a playback engine
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineStatus {
    pub is_loaded: bool,
    pub position_ms: u64,
    /// `None` when the engine cannot tell the clip length yet
    pub duration_ms: Option<u64>,
    pub is_playing: bool,
}

impl EngineStatus {
    /// Status of a handle that has no media loaded
    pub const fn unloaded() -> Self {
        Self {
            is_loaded: false,
            position_ms: 0,
            duration_ms: None,
            is_playing: false,
        }
    }
}

/// Last observed playback state of one clip
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackStatus {
    pub position_ms: u64,
    /// Always at least [`MIN_DURATION_MS`]
    pub duration_ms: u64,
    pub is_playing: bool,
}

impl PlaybackStatus {
    /// Derive a clip status from an engine payload.
    ///
    /// Returns `None` for payloads that are not loaded. An unknown or zero
    /// duration falls back to [`MIN_DURATION_MS`].
    pub fn from_engine(status: &EngineStatus) -> Option<Self> {
        if !status.is_loaded {
            return None;
        }
        Some(Self {
            position_ms: status.position_ms,
            duration_ms: status
                .duration_ms
                .filter(|&d| d > 0)
                .unwrap_or(MIN_DURATION_MS),
            is_playing: status.is_playing,
        })
    }

    /// Position as a 0.0..=1.0 fraction of the duration
    pub fn progress(&self) -> f64 {
        (self.position_ms as f64 / self.duration_ms.max(MIN_DURATION_MS) as f64).min(1.0)
    }
}

impl Default for PlaybackStatus {
    fn default() -> Self {
        Self {
            position_ms: 0,
            duration_ms: MIN_DURATION_MS,
            is_playing: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(position_ms: u64, duration_ms: Option<u64>, is_playing: bool) -> EngineStatus {
        EngineStatus {
            is_loaded: true,
            position_ms,
            duration_ms,
            is_playing,
        }
    }

    #[test]
    fn default_is_stopped_at_zero() {
        assert_eq!(
            PlaybackStatus::default(),
            PlaybackStatus {
                position_ms: 0,
                duration_ms: 1,
                is_playing: false
            }
        );
    }

    #[test]
    fn unloaded_payload_is_ignored() {
        assert!(PlaybackStatus::from_engine(&EngineStatus::unloaded()).is_none());
    }

    #[test]
    fn loaded_payload_is_copied() {
        let status = PlaybackStatus::from_engine(&loaded(1200, Some(4200), true)).unwrap();
        assert_eq!(status.position_ms, 1200);
        assert_eq!(status.duration_ms, 4200);
        assert!(status.is_playing);
    }

    #[test]
    fn unknown_or_zero_duration_falls_back() {
        let unknown = PlaybackStatus::from_engine(&loaded(0, None, true)).unwrap();
        assert_eq!(unknown.duration_ms, MIN_DURATION_MS);

        let zero = PlaybackStatus::from_engine(&loaded(0, Some(0), false)).unwrap();
        assert_eq!(zero.duration_ms, MIN_DURATION_MS);
    }

    #[test]
    fn progress_is_clamped() {
        let half = PlaybackStatus {
            position_ms: 2100,
            duration_ms: 4200,
            is_playing: true,
        };
        assert!((half.progress() - 0.5).abs() < f64::EPSILON);

        let past_end = PlaybackStatus {
            position_ms: 5000,
            duration_ms: 4200,
            is_playing: false,
        };
        assert_eq!(past_end.progress(), 1.0);
        assert_eq!(PlaybackStatus::default().progress(), 0.0);
    }
}
