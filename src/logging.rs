//! Diagnostic logging setup
//!
//! Logs go to stderr so they never mix with command output on stdout.

use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Pick the filter: usable `RUST_LOG` directives win, anything else falls
/// back to `default_filter`, which must parse.
fn select_filter(env: Option<&str>, default_filter: &str) -> Result<EnvFilter, ParseError> {
    let from_env = env
        .filter(|directives| !directives.trim().is_empty())
        .and_then(|directives| EnvFilter::try_new(directives).ok());
    match from_env {
        Some(filter) => Ok(filter),
        None => EnvFilter::try_new(default_filter),
    }
}

/// Build the filter from `RUST_LOG`, falling back to `default_filter`.
pub fn env_filter(default_filter: &str) -> Result<EnvFilter, ParseError> {
    let env = std::env::var("RUST_LOG").ok();
    select_filter(env.as_deref(), default_filter)
}

/// Install the global subscriber. Calling it again is a no-op.
pub fn init(default_filter: &str) -> Result<(), ParseError> {
    let filter = env_filter(default_filter)?;
    let _ = tracing_subscriber::fmt()
        .with_target(false)
        .with_writer(std::io::stderr)
        .with_env_filter(filter)
        .try_init();
    Ok(())
}
