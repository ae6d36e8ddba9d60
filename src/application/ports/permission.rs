//! Microphone permission port

use std::fmt;

use async_trait::async_trait;

/// Outcome of a permission request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

impl PermissionStatus {
    pub const fn is_granted(&self) -> bool {
        matches!(self, Self::Granted)
    }
}

impl fmt::Display for PermissionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Granted => write!(f, "granted"),
            Self::Denied => write!(f, "denied"),
        }
    }
}

/// Port for querying microphone access
#[async_trait]
pub trait MicrophonePermission: Send + Sync {
    /// Ask for microphone access.
    ///
    /// Never fails: anything that prevents access reads as `Denied`.
    async fn request(&self) -> PermissionStatus;
}
