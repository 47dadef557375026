use crate::error::LoggingError;
use crate::session::LogSession;
use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Arc;
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

/// Create the console filter for a verbosity level.
///
/// `RUST_LOG` wins when set.
pub fn create_env_filter(verbosity: u8) -> EnvFilter {
    env_filter(verbosity, std::env::var("RUST_LOG").ok().as_deref())
}

fn env_filter(verbosity: u8, rust_log: Option<&str>) -> EnvFilter {
    if let Some(directives) = rust_log {
        return EnvFilter::new(directives);
    }

    match verbosity {
        0 => EnvFilter::new("info"),
        1 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    }
}

/// Install the global subscriber for a prepared session.
///
/// Three layers: the console on stderr filtered by verbosity,
/// `operations.log` with everything from debug up, and `errors.log` with
/// errors only.
///
/// # Errors
///
/// Returns an error if a log file cannot be opened or a subscriber is
/// already installed.
pub fn init(session: &LogSession) -> Result<(), LoggingError> {
    let operations = open_log(&session.operations_log())?;
    let errors = open_log(&session.errors_log())?;

    let console = fmt::layer()
        .with_writer(io::stderr)
        .with_target(false)
        .with_filter(create_env_filter(session.verbosity()));

    let operations = fmt::layer()
        .with_writer(Arc::new(operations))
        .with_ansi(false)
        .with_filter(LevelFilter::DEBUG);

    let errors = fmt::layer()
        .with_writer(Arc::new(errors))
        .with_ansi(false)
        .with_filter(LevelFilter::ERROR);

    tracing_subscriber::registry()
        .with(console)
        .with(operations)
        .with(errors)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}

/// Install a console-only subscriber, for runs without log files.
///
/// # Errors
///
/// Returns an error if a subscriber is already installed.
pub fn init_console_only(verbosity: u8) -> Result<(), LoggingError> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(create_env_filter(verbosity))
        .with_target(false)
        .try_init()
        .map_err(|e| LoggingError::AlreadyInitialized(e.to_string()))
}

fn open_log(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::OpenFile {
            path: path.to_path_buf(),
            source,
        })
}
