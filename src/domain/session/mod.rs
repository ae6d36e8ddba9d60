//! Session states shared with presentation

mod state;

pub use state::{PlaybackState, RecordingState};
