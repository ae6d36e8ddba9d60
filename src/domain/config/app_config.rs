//! Application configuration value object

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::domain::recording::RecordingQuality;

/// Default interval between playback status updates
pub const DEFAULT_STATUS_INTERVAL_MS: u64 = 250;

/// Default tracing filter when RUST_LOG is not set
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Application configuration.
/// All fields are optional to support partial configs and merging.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Directory recorded clips are written to
    pub clips_dir: Option<String>,
    /// Recording quality preset (speech, high)
    pub quality: Option<String>,
    /// Interval between playback status updates in milliseconds
    pub status_interval_ms: Option<u64>,
    /// Keep playback audible when the device is in silent mode
    pub silent_mode_playback: Option<bool>,
    /// Tracing filter directive (e.g. warn, info, voice_notes=debug)
    pub log_level: Option<String>,
}

impl AppConfig {
    /// Create config with default values
    pub fn defaults() -> Self {
        Self {
            clips_dir: Some(Self::default_clips_dir().to_string_lossy().to_string()),
            quality: Some(RecordingQuality::default().to_string()),
            status_interval_ms: Some(DEFAULT_STATUS_INTERVAL_MS),
            silent_mode_playback: Some(true),
            log_level: Some(DEFAULT_LOG_LEVEL.to_string()),
        }
    }

    /// Create an empty config (all None)
    pub fn empty() -> Self {
        Self::default()
    }

    /// Merge this config with another, where other takes precedence.
    /// Only non-None values from other will override this.
    pub fn merge(self, other: Self) -> Self {
        Self {
            clips_dir: other.clips_dir.or(self.clips_dir),
            quality: other.quality.or(self.quality),
            status_interval_ms: other.status_interval_ms.or(self.status_interval_ms),
            silent_mode_playback: other.silent_mode_playback.or(self.silent_mode_playback),
            log_level: other.log_level.or(self.log_level),
        }
    }

    /// Platform cache directory for clips. Clips are not reloaded on the next
    /// run, so they live with other disposable data.
    pub fn default_clips_dir() -> PathBuf {
        dirs::cache_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("voice-notes")
            .join("clips")
    }

    /// Get clips directory, or the platform default if not set
    pub fn clips_dir_or_default(&self) -> PathBuf {
        self.clips_dir
            .as_ref()
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(Self::default_clips_dir)
    }

    /// Get quality as parsed preset, or default if not set/invalid
    pub fn quality_or_default(&self) -> RecordingQuality {
        self.quality
            .as_ref()
            .and_then(|s| s.parse().ok())
            .unwrap_or_default()
    }

    /// Get status interval, or default if not set/zero
    pub fn status_interval_ms_or_default(&self) -> u64 {
        self.status_interval_ms
            .filter(|&ms| ms > 0)
            .unwrap_or(DEFAULT_STATUS_INTERVAL_MS)
    }

    /// Get silent mode playback setting, or true if not set
    pub fn silent_mode_playback_or_default(&self) -> bool {
        self.silent_mode_playback.unwrap_or(true)
    }

    /// Get log level, or "warn" if not set
    pub fn log_level_or_default(&self) -> &str {
        self.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}
