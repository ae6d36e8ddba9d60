//! Microphone permission adapters

mod cpal_permission;

pub use cpal_permission::CpalPermission;
