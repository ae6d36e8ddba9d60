//! Playback session
//!
//! Mediates access to the single audio output handle. Starting playback of
//! any clip first tears down whatever is currently loaded.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use super::handle_slot::{HandleSlot, Releasable};
use super::ports::{PlaybackError, PlaybackHandle, PlaybackOptions, Player, StatusCallback};
use super::shared_library::SharedLibrary;
use crate::domain::clip::ClipIndex;
use crate::domain::error::SessionError;
use crate::domain::playback::EngineStatus;
use crate::domain::session::PlaybackState;

/// Loaded playback handle and the clip it reports for
struct ActivePlayback<H> {
    handle: H,
    clip: ClipIndex,
}

#[async_trait]
impl<H: PlaybackHandle> Releasable for ActivePlayback<H> {
    type Error = PlaybackError;

    /// Unsubscribe first so no status for this clip lands after release.
    async fn release(&mut self) -> Result<(), PlaybackError> {
        self.handle.unsubscribe_status();
        self.handle.release().await
    }
}

/// Status subscription scoped to one clip index
fn status_callback(library: SharedLibrary, clip: ClipIndex) -> StatusCallback {
    Arc::new(move |status: EngineStatus| {
        library.apply_status(clip, &status);
    })
}

pub struct PlaybackSession<P: Player> {
    player: P,
    options: PlaybackOptions,
    slot: HandleSlot<ActivePlayback<P::Handle>>,
    library: SharedLibrary,
}

impl<P: Player> PlaybackSession<P> {
    pub fn new(player: P, options: PlaybackOptions, library: SharedLibrary) -> Self {
        Self {
            player,
            options,
            slot: HandleSlot::new(),
            library,
        }
    }

    pub fn state(&self) -> PlaybackState {
        match self.slot.get() {
            Some(active) => PlaybackState::Playing { clip: active.clip },
            None => PlaybackState::Idle,
        }
    }

    /// Load and start the clip at `index`, replacing any active playback.
    ///
    /// Playing the clip that is already loaded restarts it from the top.
    /// Returns once playback has been initiated.
    pub async fn play(&mut self, index: ClipIndex) -> Result<(), SessionError> {
        let Some(clip) = self.library.clip(index) else {
            return Err(SessionError::PlaybackLoadFailed(format!(
                "{} does not exist",
                index
            )));
        };

        let player = &self.player;
        let options = self.options;
        let on_status = status_callback(self.library.clone(), index);
        let result = self
            .slot
            .acquire(move || async move {
                let mut handle = player.create_playback(&clip, options, on_status).await?;
                if let Err(e) = handle.play().await {
                    handle.unsubscribe_status();
                    if let Err(release_err) = handle.release().await {
                        debug!(error = %release_err, "release after failed play");
                    }
                    return Err(e);
                }
                Ok(ActivePlayback {
                    handle,
                    clip: index,
                })
            })
            .await;

        match result {
            Ok(_) => {
                self.library.set_playback(PlaybackState::Playing { clip: index });
                info!(clip = %index, "playback started");
                Ok(())
            }
            Err(e) => {
                self.library.set_playback(PlaybackState::Idle);
                warn!(clip = %index, error = %e, "playback failed to start");
                Err(SessionError::PlaybackLoadFailed(e.to_string()))
            }
        }
    }

    /// Forward an absolute seek target to the active handle.
    ///
    /// Local position is left untouched; the next status update reports
    /// where playback actually landed.
    pub async fn seek(&self, position_ms: u64) -> Result<(), SessionError> {
        let Some(active) = self.slot.get() else {
            return Err(SessionError::SeekFailed("nothing is playing".to_string()));
        };
        active.handle.seek_to(position_ms).await.map_err(|e| {
            warn!(clip = %active.clip, position_ms, error = %e, "seek failed");
            SessionError::SeekFailed(e.to_string())
        })?;
        debug!(clip = %active.clip, position_ms, "seek requested");
        Ok(())
    }

    /// Release the active handle. No status update fires afterwards.
    pub async fn shutdown(&mut self) {
        if let Err(e) = self.slot.release().await {
            warn!(error = %e, "playback teardown failed");
        }
        self.library.set_playback(PlaybackState::Idle);
    }
}
