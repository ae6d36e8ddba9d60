//! CLI argument definitions using Clap

use clap::{Parser, Subcommand, ValueEnum};

use crate::domain::recording::RecordingQuality;

/// Voice Notes - record short voice notes and play them back
#[derive(Parser, Debug)]
#[command(name = "voice-notes")]
#[command(version)]
#[command(about = "Record voice notes from the microphone and play them back")]
#[command(long_about = None)]
pub struct Cli {
    /// Directory recorded clips are written to
    #[arg(long, value_name = "DIR", env = "VOICE_NOTES_CLIPS_DIR")]
    pub clips_dir: Option<String>,

    /// Recording quality preset
    #[arg(short = 'q', long, value_name = "QUALITY")]
    pub quality: Option<QualityArg>,

    /// Log filter when RUST_LOG is not set (e.g. info, voice_notes=debug)
    #[arg(long, value_name = "FILTER")]
    pub log_level: Option<String>,

    /// Config subcommand
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Config action subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Create config file with defaults
    Init,
    /// Set a config value
    Set {
        /// Config key
        key: String,
        /// Config value
        value: String,
    },
    /// Get a config value
    Get {
        /// Config key
        key: String,
    },
    /// List all config values
    List,
    /// Show config file path
    Path,
}

/// Quality argument for clap ValueEnum
#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum QualityArg {
    /// 16kHz mono, small files
    Speech,
    /// 44.1kHz mono
    High,
}

impl From<QualityArg> for RecordingQuality {
    fn from(arg: QualityArg) -> Self {
        match arg {
            QualityArg::Speech => RecordingQuality::Speech,
            QualityArg::High => RecordingQuality::High,
        }
    }
}

/// Valid config keys
pub const VALID_CONFIG_KEYS: &[&str] = &[
    "clips_dir",
    "quality",
    "status_interval_ms",
    "silent_mode_playback",
    "log_level",
];

/// Check if a config key is valid
pub fn is_valid_config_key(key: &str) -> bool {
    VALID_CONFIG_KEYS.contains(&key)
}
