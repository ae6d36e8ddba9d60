//! Main app runner for the interactive shell

use std::process::ExitCode;
use std::time::Duration;

use crate::application::ports::{AudioMode, ConfigStore, PlaybackOptions, RecordingOptions};
use crate::application::{VoiceNotes, VoiceNotesConfig};
use crate::domain::config::AppConfig;
use crate::infrastructure::{CpalPermission, CpalRecorder, RodioPlayer, XdgConfigStore};

use super::presenter::Presenter;
use super::repl::run_shell;

/// Exit codes
pub const EXIT_SUCCESS: u8 = 0;
pub const EXIT_ERROR: u8 = 1;
pub const EXIT_USAGE_ERROR: u8 = 2;

/// Resolve session settings from merged configuration
pub fn voice_notes_config(config: &AppConfig) -> VoiceNotesConfig {
    VoiceNotesConfig {
        recording: RecordingOptions {
            quality: config.quality_or_default(),
            directory: config.clips_dir_or_default(),
        },
        mode: AudioMode::recording(config.silent_mode_playback_or_default()),
        playback: PlaybackOptions {
            autoplay: true,
            status_interval: Duration::from_millis(config.status_interval_ms_or_default()),
        },
    }
}

/// Open the voice notes on the default audio devices and run the shell
pub async fn run_interactive(config: AppConfig) -> ExitCode {
    let presenter = Presenter::new();
    let settings = voice_notes_config(&config);
    let clips_dir = settings.recording.directory.clone();

    let mut notes = VoiceNotes::open(
        &CpalPermission::new(),
        CpalRecorder::new(),
        RodioPlayer::new(),
        settings,
    )
    .await;

    if !notes.permission().is_granted() {
        presenter.warn("Microphone is not available, recording is disabled");
    }
    presenter.info(&format!("Clips are saved to {}", clips_dir.display()));

    let result = run_shell(&mut notes, &presenter).await;
    notes.shutdown().await;

    match result {
        Ok(()) => ExitCode::from(EXIT_SUCCESS),
        Err(e) => {
            presenter.error(&format!("Failed to read input: {}", e));
            ExitCode::from(EXIT_ERROR)
        }
    }
}

/// Load and merge configuration from file and CLI
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    let store = XdgConfigStore::new();
    let file_config = store.load_or_empty().await;

    // Merge: defaults < file < cli
    AppConfig::defaults().merge(file_config).merge(cli_config)
}
