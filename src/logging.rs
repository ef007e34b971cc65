//! Tracing subscriber setup.
//!
//! The filter comes from `RUST_LOG` and falls back to [`DEFAULT_FILTER`]. Where the output goes
//! depends on the front end: the terminal interface owns the screen, so it either logs to a file
//! or not at all.

use std::{fs::File, io, path::Path, sync::Mutex};

use color_eyre::eyre::Result;
use tracing_subscriber::{fmt, layer::SubscriberExt as _, registry::Registry, EnvFilter};

/// Filter used when `RUST_LOG` is unset or invalid.
pub(crate) const DEFAULT_FILTER: &str = "labyrinthe=info";

/// Destination for log output.
#[derive(Debug)]
pub enum LogSink<'path> {
    /// Write to standard error.
    Stderr,
    /// Append to the file at this path, creating it if needed.
    File(&'path Path),
    /// Install nothing, which drops every event.
    Discard,
}

/// Builds the level filter from the environment.
fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_err| EnvFilter::new(DEFAULT_FILTER))
}

/// Installs the global tracing subscriber.
///
/// Calling this more than once keeps the first subscriber and returns an error.
///
/// # Errors
///
/// This function returns an error if the log file cannot be opened or a global subscriber is
/// already installed.
pub fn install(sink: LogSink<'_>) -> Result<()> {
    let registry = Registry::default().with(env_filter());

    match sink {
        LogSink::Stderr => {
            let layer = fmt::layer().with_writer(io::stderr).with_target(false);
            tracing::subscriber::set_global_default(registry.with(layer))?;
        }
        LogSink::File(path) => {
            let file = File::options().create(true).append(true).open(path)?;
            let layer = fmt::layer()
                .with_writer(Mutex::new(file))
                .with_ansi(false);
            tracing::subscriber::set_global_default(registry.with(layer))?;
        }
        LogSink::Discard => {}
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        assert!(EnvFilter::try_new(DEFAULT_FILTER).is_ok());
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let path = Path::new("/definitely/not/a/real/directory/labyrinthe.log");

        assert!(install(LogSink::File(path)).is_err());
    }
}
