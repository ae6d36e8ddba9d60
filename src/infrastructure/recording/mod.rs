//! Recording infrastructure module
//!
//! Captures microphone audio with cpal and stores clips as WAV files.

mod cpal_recorder;
mod wav_writer;

pub use cpal_recorder::{CpalRecorder, CpalRecordingHandle};
pub use wav_writer::write_wav;
