//! Interactive shell
//!
//! Reads one command per line from stdin and drives the voice notes. A
//! background task follows library changes and redraws the scrub bar.

use std::io;
use std::str::FromStr;

use indicatif::ProgressBar;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::watch;
use tracing::debug;

use crate::application::ports::{Player, Recorder};
use crate::application::{ToggleOutcome, VoiceNotes};
use crate::domain::clip::ClipIndex;
use crate::domain::clock::{format_millis, parse_clock};
use crate::domain::error::ClockParseError;
use crate::domain::library::Library;
use crate::domain::session::RecordingState;

use super::presenter::Presenter;

/// A parsed shell command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Record,
    Stop,
    Cancel,
    Play(ClipIndex),
    Seek(ClipIndex, u64),
    List,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("Unknown command \"{0}\". Type 'help' for a list of commands")]
    Unknown(String),

    #[error("Usage: {0}")]
    Usage(&'static str),

    #[error("Invalid note number \"{0}\". Notes are numbered from 1")]
    InvalidNote(String),

    #[error(transparent)]
    InvalidTime(#[from] ClockParseError),
}

fn parse_note(word: Option<&str>, usage: &'static str) -> Result<ClipIndex, CommandError> {
    let word = word.ok_or(CommandError::Usage(usage))?;
    word.parse::<usize>()
        .ok()
        .and_then(ClipIndex::from_row_number)
        .ok_or_else(|| CommandError::InvalidNote(word.to_string()))
}

impl FromStr for Command {
    type Err = CommandError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let mut words = line.split_whitespace();
        let Some(name) = words.next() else {
            return Err(CommandError::Unknown(String::new()));
        };

        let command = match name.to_lowercase().as_str() {
            "record" | "r" => Command::Record,
            "stop" | "s" => Command::Stop,
            "cancel" | "c" => Command::Cancel,
            "play" | "p" => Command::Play(parse_note(words.next(), "play <n>")?),
            "seek" => {
                const USAGE: &str = "seek <n> <M:SS|Nms>";
                let index = parse_note(words.next(), USAGE)?;
                let time = words.next().ok_or(CommandError::Usage(USAGE))?;
                Command::Seek(index, parse_clock(time)?)
            }
            "list" | "ls" | "l" => Command::List,
            "help" | "h" | "?" => Command::Help,
            "quit" | "exit" | "q" => Command::Quit,
            _ => return Err(CommandError::Unknown(name.to_string())),
        };

        if words.next().is_some() {
            return Err(CommandError::Usage(match command {
                Command::Play(_) => "play <n>",
                Command::Seek(..) => "seek <n> <M:SS|Nms>",
                _ => "commands other than play and seek take no arguments",
            }));
        }
        Ok(command)
    }
}

/// Run one command against the notes, reporting the outcome
pub async fn execute<R: Recorder, P: Player>(
    notes: &mut VoiceNotes<R, P>,
    presenter: &Presenter,
    command: Command,
) {
    debug!(?command, "shell command");
    match command {
        Command::Record => {
            let elapsed_ms = notes.recording_elapsed_ms();
            match notes.toggle_recording().await {
                Ok(ToggleOutcome::Started) => {
                    presenter.success("Recording. Type 'record' or 'stop' to finish")
                }
                Ok(ToggleOutcome::Stopped(clip)) => report_saved(presenter, clip, elapsed_ms),
                Err(e) => presenter.error(&e.to_string()),
            }
        }
        Command::Stop => {
            if notes.recording_state() == RecordingState::Idle {
                presenter.info("Not recording");
                return;
            }
            let elapsed_ms = notes.recording_elapsed_ms();
            match notes.stop_recording().await {
                Ok(clip) => report_saved(presenter, clip, elapsed_ms),
                Err(e) => presenter.error(&format!("{} (type 'stop' to retry or 'cancel')", e)),
            }
        }
        Command::Cancel => match notes.cancel_recording().await {
            Ok(true) => presenter.info("Recording discarded"),
            Ok(false) => presenter.info("Not recording"),
            Err(e) => presenter.error(&e.to_string()),
        },
        Command::Play(index) => match notes.play(index).await {
            Ok(()) => presenter.success(&format!("Playing {}", index)),
            Err(e) => presenter.error(&e.to_string()),
        },
        Command::Seek(index, position_ms) => {
            if let Err(e) = notes.seek(index, position_ms).await {
                presenter.error(&e.to_string());
            }
        }
        Command::List => presenter.clip_list(
            &notes.snapshot(),
            notes.recording_state(),
            notes.recording_elapsed_ms(),
        ),
        Command::Help => presenter.help(),
        Command::Quit => {}
    }
}

fn report_saved(presenter: &Presenter, clip: Option<ClipIndex>, elapsed_ms: u64) {
    match clip {
        Some(index) => presenter.success(&format!(
            "Saved {} ({})",
            index,
            format_millis(elapsed_ms as i64)
        )),
        None => presenter.warn("Nothing was captured, note discarded"),
    }
}

/// Redraw the scrub bar on every library change until the sender closes
async fn render_library(
    mut library: watch::Receiver<Library>,
    presenter: Presenter,
    bar: ProgressBar,
) {
    while library.changed().await.is_ok() {
        let snapshot = library.borrow_and_update().clone();
        presenter.update_scrub_bar(&bar, &snapshot);
    }
}

/// Read and run commands until `quit`, end of input or Ctrl-C.
///
/// The caller owns teardown of the notes.
pub async fn run_shell<R: Recorder, P: Player>(
    notes: &mut VoiceNotes<R, P>,
    presenter: &Presenter,
) -> io::Result<()> {
    let bar = presenter.scrub_bar();
    let render = tokio::spawn(render_library(
        notes.subscribe(),
        Presenter::new(),
        bar.clone(),
    ));

    presenter.help();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let result = loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break Ok(()),
                    Err(e) => break Err(e),
                };
                if line.trim().is_empty() {
                    continue;
                }
                match line.parse::<Command>() {
                    Ok(Command::Quit) => break Ok(()),
                    Ok(command) => execute(notes, presenter, command).await,
                    Err(e) => {
                        presenter.warn(&e.to_string());
                        continue;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                presenter.info("Interrupted");
                break Ok(());
            }
        }
    };

    render.abort();
    bar.finish_and_clear();
    result
}
