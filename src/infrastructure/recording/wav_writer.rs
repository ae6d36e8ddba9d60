//! WAV clip writer
//!
//! Clips are stored as mono 16-bit PCM WAV so the playback decoder can seek
//! them.

use std::path::Path;

use crate::application::ports::RecordingError;

/// Write mono 16-bit samples to `path`, replacing any existing file.
pub fn write_wav(path: &Path, samples: &[i16], sample_rate: u32) -> Result<(), RecordingError> {
    let spec = hound::WavSpec {
        channels: 1,
        sample_rate,
        bits_per_sample: 16,
        sample_format: hound::SampleFormat::Int,
    };

    let mut writer = hound::WavWriter::create(path, spec).map_err(|e| {
        RecordingError::WriteFailed(format!("Failed to create {}: {}", path.display(), e))
    })?;
    for &sample in samples {
        writer
            .write_sample(sample)
            .map_err(|e| RecordingError::WriteFailed(format!("Failed to write sample: {}", e)))?;
    }
    writer
        .finalize()
        .map_err(|e| RecordingError::WriteFailed(format!("Failed to finalize wav: {}", e)))
}
