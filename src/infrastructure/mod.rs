//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces,
//! integrating with the audio devices (cpal, rodio) and the filesystem.

pub mod config;
pub mod permission;
pub mod playback;
pub mod recording;

// Re-export adapters
pub use config::XdgConfigStore;
pub use permission::CpalPermission;
pub use playback::RodioPlayer;
pub use recording::CpalRecorder;
