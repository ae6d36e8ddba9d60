//! Recording quality presets

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Sample rate of the speech preset
pub const SPEECH_SAMPLE_RATE: u32 = 16_000;

/// Sample rate of the high quality preset
pub const HIGH_SAMPLE_RATE: u32 = 44_100;

/// Error when an unknown quality preset is named
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid quality: \"{input}\". Valid presets are: speech, high")]
pub struct InvalidQualityError {
    pub input: String,
}

/// Recording quality preset. Clips are always mono 16-bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RecordingQuality {
    /// 16kHz, small files, enough for voice
    Speech,
    /// 44.1kHz
    #[default]
    High,
}

impl RecordingQuality {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Speech => "speech",
            Self::High => "high",
        }
    }

    /// Sample rate clips are stored at
    pub const fn sample_rate(&self) -> u32 {
        match self {
            Self::Speech => SPEECH_SAMPLE_RATE,
            Self::High => HIGH_SAMPLE_RATE,
        }
    }
}

impl fmt::Display for RecordingQuality {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for RecordingQuality {
    type Err = InvalidQualityError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "speech" => Ok(Self::Speech),
            "high" => Ok(Self::High),
            _ => Err(InvalidQualityError {
                input: s.to_string(),
            }),
        }
    }
}
