//! CLI presenter for output formatting

use colored::*;
use indicatif::{ProgressBar, ProgressStyle};

use crate::domain::clock::format_millis;
use crate::domain::library::{ClipRow, Library};
use crate::domain::playback::PlaybackStatus;
use crate::domain::session::RecordingState;

const BAR_WIDTH: usize = 20;

/// Presenter for CLI output formatting
pub struct Presenter;

impl Presenter {
    /// Create a new presenter
    pub fn new() -> Self {
        Self
    }

    /// Print info message to stderr
    pub fn info(&self, message: &str) {
        eprintln!("{} {}", "ℹ".cyan(), message);
    }

    /// Print success message to stderr
    pub fn success(&self, message: &str) {
        eprintln!("{} {}", "✓".green(), message);
    }

    /// Print warning message to stderr
    pub fn warn(&self, message: &str) {
        eprintln!("{} {}", "⚠".yellow(), message);
    }

    /// Print error message to stderr
    pub fn error(&self, message: &str) {
        eprintln!("{} {}", "✗".red(), message);
    }

    /// Output text to stdout
    pub fn output(&self, text: &str) {
        println!("{}", text);
    }

    /// Print a key-value pair (for config list)
    pub fn key_value(&self, key: &str, value: &str) {
        println!("{}: {}", key.cyan(), value);
    }

    /// Elapsed / total with a block bar, e.g. `[███░░] 0:42 / 1:30`
    pub fn format_progress(&self, status: &PlaybackStatus) -> String {
        let filled = (status.progress() * BAR_WIDTH as f64) as usize;
        let filled = filled.min(BAR_WIDTH);
        let empty = BAR_WIDTH - filled;

        format!(
            "[{}{}] {} / {}",
            "█".repeat(filled).cyan(),
            "░".repeat(empty),
            format_millis(status.position_ms as i64),
            format_millis(status.duration_ms as i64)
        )
    }

    /// One line per clip: marker, row number, progress
    pub fn format_row(&self, row: &ClipRow<'_>) -> String {
        let marker = if row.status.is_playing {
            "▶".green()
        } else if row.is_active {
            "‖".yellow()
        } else {
            " ".normal()
        };
        format!(
            "{} {:>3}  {}  {}",
            marker,
            row.index.row_number(),
            self.format_progress(&row.status),
            row.clip.locator().dimmed()
        )
    }

    /// Record button, with the captured time while recording
    pub fn format_record_button(&self, recording: RecordingState, elapsed_ms: u64) -> String {
        match recording {
            RecordingState::Idle => format!("[{}]", recording.toggle_label().normal()),
            RecordingState::Recording => format!(
                "[{}] {} {}",
                recording.toggle_label().red().bold(),
                "●".red(),
                format_millis(elapsed_ms as i64)
            ),
        }
    }

    /// Print the clip list and the record button state
    pub fn clip_list(&self, library: &Library, recording: RecordingState, elapsed_ms: u64) {
        if library.clips().is_empty() {
            self.output("No voice notes yet");
        }
        for row in library.rows() {
            self.output(&self.format_row(&row));
        }
        self.output(&self.format_record_button(recording, elapsed_ms));
    }

    /// Shell command summary
    pub fn help(&self) {
        let commands = [
            ("record", "Start recording, or stop if recording"),
            ("stop", "Stop recording and keep the note"),
            ("cancel", "Stop recording and discard it"),
            ("play <n>", "Play note n from the start"),
            ("seek <n> <time>", "Jump within the playing note (1:05 or 65000ms)"),
            ("list", "Show all notes"),
            ("help", "Show this help"),
            ("quit", "Exit (Ctrl-C also works)"),
        ];
        for (command, description) in commands {
            eprintln!("  {:<16} {}", command.cyan(), description);
        }
    }

    /// Status line for the playing clip, redrawn in place on stderr
    pub fn scrub_bar(&self) -> ProgressBar {
        let bar = ProgressBar::new(1);
        let style = ProgressStyle::default_bar()
            .template("{prefix:.green} {bar:30.cyan/blue} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓░");
        bar.set_style(style);
        bar
    }

    /// Point the scrub bar at the library's active clip
    pub fn update_scrub_bar(&self, bar: &ProgressBar, library: &Library) {
        let prefix = if library.recording().is_recording() {
            "● REC".red().to_string()
        } else {
            String::new()
        };
        bar.set_prefix(prefix);

        match library.playback().active_clip() {
            Some(clip) => {
                let status = library.status(clip);
                bar.set_length(status.duration_ms);
                bar.set_position(status.position_ms.min(status.duration_ms));
                bar.set_message(format!(
                    "{} {} / {}",
                    clip,
                    format_millis(status.position_ms as i64),
                    format_millis(status.duration_ms as i64)
                ));
            }
            None => {
                bar.set_length(1);
                bar.set_position(0);
                bar.set_message("");
            }
        }
    }
}

impl Default for Presenter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::clip::{ClipIndex, ClipReference};
    use crate::domain::playback::EngineStatus;
    use crate::domain::session::PlaybackState;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn format_progress_at_start() {
        plain();
        let presenter = Presenter::new();
        let progress = presenter.format_progress(&PlaybackStatus::default());
        assert!(progress.ends_with("0:00 / 0:00"));
        assert!(progress.contains(&"░".repeat(BAR_WIDTH)));
    }

    #[test]
    fn format_progress_at_half() {
        plain();
        let presenter = Presenter::new();
        let progress = presenter.format_progress(&PlaybackStatus {
            position_ms: 32_500,
            duration_ms: 65_000,
            is_playing: true,
        });
        assert!(progress.ends_with("0:32 / 1:05"));
        assert!(progress.contains(&"█".repeat(BAR_WIDTH / 2)));
    }

    #[test]
    fn format_row_shows_row_number_and_locator() {
        plain();
        let mut library = Library::new();
        library.append_clip(ClipReference::from_locator("a.wav").unwrap());
        let row = library.rows().next().unwrap();

        let line = Presenter::new().format_row(&row);
        assert!(line.contains("  1  "));
        assert!(line.ends_with("a.wav"));
    }

    #[test]
    fn record_button_shows_elapsed_while_recording() {
        plain();
        let presenter = Presenter::new();
        assert_eq!(
            presenter.format_record_button(RecordingState::Idle, 0),
            "[Start Recording]"
        );
        assert_eq!(
            presenter.format_record_button(RecordingState::Recording, 12_500),
            "[Stop Recording] ● 0:12"
        );
    }

    #[test]
    fn scrub_bar_tracks_active_clip() {
        let mut library = Library::new();
        let index = library.append_clip(ClipReference::from_locator("a.wav").unwrap());
        library.apply_status(
            index,
            &EngineStatus {
                is_loaded: true,
                position_ms: 1000,
                duration_ms: Some(4200),
                is_playing: true,
            },
        );
        library.set_playback(PlaybackState::Playing { clip: index });

        let presenter = Presenter::new();
        let bar = presenter.scrub_bar();
        presenter.update_scrub_bar(&bar, &library);

        assert_eq!(bar.length(), Some(4200));
        assert_eq!(bar.position(), 1000);
        assert_eq!(bar.message(), "Voice note 1 0:01 / 0:04");
        assert_eq!(index, ClipIndex::new(0));
    }
}
