//! Voice Notes CLI entry point

use std::process::ExitCode;

use clap::Parser;

use voice_notes::cli::{
    app::{load_merged_config, run_interactive, EXIT_ERROR, EXIT_USAGE_ERROR},
    args::{Cli, Commands},
    config_cmd::handle_config_command,
    presenter::Presenter,
};
use voice_notes::domain::config::{AppConfig, DEFAULT_LOG_LEVEL};
use voice_notes::domain::recording::RecordingQuality;
use voice_notes::infrastructure::XdgConfigStore;
use voice_notes::logging;

#[tokio::main(flavor = "multi_thread", worker_threads = 2)]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    let presenter = Presenter::new();

    // Handle subcommands
    if let Some(Commands::Config { action }) = cli.command {
        if let Err(e) = logging::init(cli.log_level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)) {
            presenter.error(&format!("Invalid log level: {}", e));
            return ExitCode::from(EXIT_USAGE_ERROR);
        }
        let store = XdgConfigStore::new();
        if let Err(e) = handle_config_command(action, &store, &presenter).await {
            presenter.error(&e.to_string());
            return ExitCode::from(EXIT_ERROR);
        }
        return ExitCode::SUCCESS;
    }

    // Build CLI config from args
    let cli_config = AppConfig {
        clips_dir: cli.clips_dir.clone(),
        quality: cli
            .quality
            .map(|q| RecordingQuality::from(q).to_string()),
        log_level: cli.log_level.clone(),
        ..Default::default()
    };

    // Merge config
    let config = load_merged_config(cli_config).await;

    if let Err(e) = logging::init(config.log_level_or_default()) {
        presenter.error(&format!("Invalid log level: {}", e));
        return ExitCode::from(EXIT_USAGE_ERROR);
    }

    run_interactive(config).await
}
