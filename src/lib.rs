//! Voice Notes - record short voice notes and play them back
//!
//! This crate provides the recording and playback sessions behind a simple
//! voice-memo screen: one microphone recording at a time, one playing clip at
//! a time, and a per-clip record of the last known playback position.
//!
//! # Architecture
//!
//! The crate follows hexagonal (ports & adapters) architecture:
//!
//! - **Domain**: Clip store, playback status, session states, clock formatting and errors
//! - **Application**: Recording and playback sessions and port interfaces (traits)
//! - **Infrastructure**: Adapter implementations (cpal, rodio, hound, XDG config)
//! - **CLI**: Command-line interface, interactive shell and output formatting

pub mod application;
pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod logging;
