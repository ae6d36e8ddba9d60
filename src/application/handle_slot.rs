//! Single-occupancy slot for engine handles
//!
//! A session owns at most one engine handle at a time. The slot makes the
//! teardown of the current handle part of acquiring the next one, so a new
//! handle never coexists with the one it replaces.

use std::fmt;
use std::future::Future;

use async_trait::async_trait;
use tracing::warn;

/// An engine resource that must be torn down explicitly rather than dropped.
#[async_trait]
pub trait Releasable: Send {
    type Error: fmt::Display + Send;

    /// Tear the resource down. The resource is dropped afterwards whatever
    /// the outcome.
    async fn release(&mut self) -> Result<(), Self::Error>;
}

/// Owned optional handle with release-before-acquire semantics
pub struct HandleSlot<H> {
    handle: Option<H>,
}

impl<H: Releasable> HandleSlot<H> {
    /// Create an empty slot
    pub fn new() -> Self {
        Self { handle: None }
    }

    pub fn is_occupied(&self) -> bool {
        self.handle.is_some()
    }

    pub fn get(&self) -> Option<&H> {
        self.handle.as_ref()
    }

    pub fn get_mut(&mut self) -> Option<&mut H> {
        self.handle.as_mut()
    }

    /// Remove a handle that was already torn down by other means
    pub fn take(&mut self) -> Option<H> {
        self.handle.take()
    }

    /// Release the current handle, if any.
    ///
    /// # Returns
    /// `true` when a handle was present. The slot is empty afterwards even if
    /// releasing failed.
    pub async fn release(&mut self) -> Result<bool, H::Error> {
        let Some(mut handle) = self.handle.take() else {
            return Ok(false);
        };
        handle.release().await?;
        Ok(true)
    }

    /// Release the current handle, then create and install a new one.
    ///
    /// A failed release is logged and does not block the acquisition. If
    /// `create` fails the slot is left empty.
    pub async fn acquire<F, Fut, E>(&mut self, create: F) -> Result<&mut H, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<H, E>>,
    {
        if let Err(e) = self.release().await {
            warn!(error = %e, "previous handle did not release cleanly");
        }
        let handle = create().await?;
        Ok(self.handle.insert(handle))
    }
}

impl<H: Releasable> Default for HandleSlot<H> {
    fn default() -> Self {
        Self::new()
    }
}
