//! Microphone access check using cpal
//!
//! Desktop hosts have no permission prompt. Access counts as granted when a
//! default input device exists and reports at least one configuration;
//! sandboxes that block the microphone typically hide the device.

use async_trait::async_trait;
use cpal::traits::{DeviceTrait, HostTrait};
use tracing::debug;

use crate::application::ports::{MicrophonePermission, PermissionStatus};

pub struct CpalPermission;

impl CpalPermission {
    pub fn new() -> Self {
        Self
    }
}

impl Default for CpalPermission {
    fn default() -> Self {
        Self::new()
    }
}

fn probe_input() -> PermissionStatus {
    let host = cpal::default_host();
    let Some(device) = host.default_input_device() else {
        debug!(host = ?host.id(), "no default input device");
        return PermissionStatus::Denied;
    };
    match device.supported_input_configs() {
        Ok(mut configs) => {
            if configs.next().is_some() {
                PermissionStatus::Granted
            } else {
                debug!("input device reports no configurations");
                PermissionStatus::Denied
            }
        }
        Err(e) => {
            debug!(error = %e, "input device not accessible");
            PermissionStatus::Denied
        }
    }
}

#[async_trait]
impl MicrophonePermission for CpalPermission {
    async fn request(&self) -> PermissionStatus {
        tokio::task::spawn_blocking(probe_input)
            .await
            .unwrap_or(PermissionStatus::Denied)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    #[ignore = "Requires audio hardware"]
    async fn microphone_is_granted() {
        let permission = CpalPermission::new();
        assert_eq!(permission.request().await, PermissionStatus::Granted);
    }
}
