//! Config command handler

use tracing_subscriber::EnvFilter;

use crate::application::ports::ConfigStore;
use crate::domain::config::AppConfig;
use crate::domain::error::ConfigError;
use crate::domain::recording::RecordingQuality;

use super::args::{is_valid_config_key, ConfigAction, VALID_CONFIG_KEYS};
use super::presenter::Presenter;

const NOT_SET: &str = "(not set)";

/// Handle config subcommand
pub async fn handle_config_command<S: ConfigStore>(
    action: ConfigAction,
    store: &S,
    presenter: &Presenter,
) -> Result<(), ConfigError> {
    match action {
        ConfigAction::Init => handle_init(store, presenter).await,
        ConfigAction::Set { key, value } => handle_set(store, presenter, &key, &value).await,
        ConfigAction::Get { key } => handle_get(store, presenter, &key).await,
        ConfigAction::List => handle_list(store, presenter).await,
        ConfigAction::Path => handle_path(store, presenter),
    }
}

async fn handle_init<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    store.init().await?;
    presenter.success(&format!(
        "Config file created at: {}",
        store.path().display()
    ));
    Ok(())
}

async fn handle_set<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
    value: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let mut config = store.load().await?;
    apply_value(&mut config, key, value)?;

    store.save(&config).await?;
    presenter.success(&format!("{} = {}", key, value));

    Ok(())
}

async fn handle_get<S: ConfigStore>(
    store: &S,
    presenter: &Presenter,
    key: &str,
) -> Result<(), ConfigError> {
    ensure_valid_key(key)?;

    let config = store.load().await?;
    match config_value(&config, key) {
        Some(v) => presenter.output(&v),
        None => presenter.output(NOT_SET),
    }

    Ok(())
}

async fn handle_list<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    let config = store.load().await?;

    for key in VALID_CONFIG_KEYS {
        presenter.key_value(
            key,
            config_value(&config, key).as_deref().unwrap_or(NOT_SET),
        );
    }

    Ok(())
}

fn handle_path<S: ConfigStore>(store: &S, presenter: &Presenter) -> Result<(), ConfigError> {
    presenter.output(&store.path().to_string_lossy());
    Ok(())
}

fn ensure_valid_key(key: &str) -> Result<(), ConfigError> {
    if is_valid_config_key(key) {
        return Ok(());
    }
    Err(ConfigError::ValidationError {
        key: key.to_string(),
        message: format!("Unknown key. Valid keys: {}", VALID_CONFIG_KEYS.join(", ")),
    })
}

fn invalid(key: &str, message: impl Into<String>) -> ConfigError {
    ConfigError::ValidationError {
        key: key.to_string(),
        message: message.into(),
    }
}

/// Validate `value` for `key` and store it in `config`
fn apply_value(config: &mut AppConfig, key: &str, value: &str) -> Result<(), ConfigError> {
    match key {
        "clips_dir" => {
            if value.trim().is_empty() {
                return Err(invalid(key, "Value must not be empty"));
            }
            config.clips_dir = Some(value.to_string());
        }
        "quality" => {
            let quality = value
                .parse::<RecordingQuality>()
                .map_err(|e| invalid(key, e.to_string()))?;
            config.quality = Some(quality.to_string());
        }
        "status_interval_ms" => {
            let ms = value
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|&ms| ms > 0)
                .ok_or_else(|| invalid(key, "Value must be a positive number of milliseconds"))?;
            config.status_interval_ms = Some(ms);
        }
        "silent_mode_playback" => {
            let enabled =
                parse_bool(value).map_err(|_| invalid(key, "Value must be 'true' or 'false'"))?;
            config.silent_mode_playback = Some(enabled);
        }
        "log_level" => {
            EnvFilter::try_new(value).map_err(|e| invalid(key, e.to_string()))?;
            config.log_level = Some(value.to_string());
        }
        _ => return Err(invalid(key, "Unknown key")),
    }
    Ok(())
}

fn config_value(config: &AppConfig, key: &str) -> Option<String> {
    match key {
        "clips_dir" => config.clips_dir.clone(),
        "quality" => config.quality.clone(),
        "status_interval_ms" => config.status_interval_ms.map(|ms| ms.to_string()),
        "silent_mode_playback" => config.silent_mode_playback.map(|b| b.to_string()),
        "log_level" => config.log_level.clone(),
        _ => None,
    }
}

/// Parse a boolean value
fn parse_bool(value: &str) -> Result<bool, ()> {
    match value.to_lowercase().as_str() {
        "true" | "yes" | "1" => Ok(true),
        "false" | "no" | "0" => Ok(false),
        _ => Err(()),
    }
}
