//! Clock formatting for clip positions and durations

use crate::domain::error::ClockParseError;

/// Format milliseconds as `M:SS`.
///
/// Minutes are unpadded and may exceed 59; seconds are always two digits.
/// Sub-second remainders are truncated and negative input reads as zero.
pub fn format_millis(millis: i64) -> String {
    let total_secs = millis.max(0) / 1000;
    let minutes = total_secs / 60;
    let seconds = total_secs % 60;
    format!("{}:{:02}", minutes, seconds)
}

/// Parse an unsigned run of ASCII digits; signs and blanks are rejected
fn digits(text: &str) -> Option<u64> {
    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    text.parse().ok()
}

/// Parse a clock string into milliseconds.
///
/// Accepts `M:SS` (seconds below 60) or a millisecond count such as `1500ms`.
pub fn parse_clock(input: &str) -> Result<u64, ClockParseError> {
    let err = || ClockParseError {
        input: input.to_string(),
    };
    let trimmed = input.trim();

    if let Some(ms) = trimmed.strip_suffix("ms") {
        return digits(ms.trim()).ok_or_else(err);
    }

    let (minutes, seconds) = trimmed.split_once(':').ok_or_else(err)?;
    if seconds.len() != 2 {
        return Err(err());
    }
    let minutes = digits(minutes).ok_or_else(err)?;
    let seconds = digits(seconds).ok_or_else(err)?;
    if seconds >= 60 {
        return Err(err());
    }

    minutes
        .checked_mul(60)
        .and_then(|m| m.checked_add(seconds))
        .and_then(|s| s.checked_mul(1000))
        .ok_or_else(err)
}
