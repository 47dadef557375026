//! Narrow logging capability.
//!
//! Components that trace their decisions take a `&dyn Log` instead of
//! reaching for a global logger, so callers can hand in [`TracingLog`] or
//! [`Silent`] and get identical behavior apart from the output.

use std::fmt;

/// Message severity on the 1 to 6 scale used by the command-line tools.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Severity {
    Debug = 1,
    Info = 2,
    Warning = 3,
    Error = 4,
    Critical = 5,
    Exception = 6,
}

impl Severity {
    /// Maps a numeric level onto a severity. Values outside 1..=6 yield `None`.
    #[must_use]
    pub fn from_level(level: u8) -> Option<Self> {
        match level {
            1 => Some(Self::Debug),
            2 => Some(Self::Info),
            3 => Some(Self::Warning),
            4 => Some(Self::Error),
            5 => Some(Self::Critical),
            6 => Some(Self::Exception),
            _ => None,
        }
    }

    /// Returns the numeric level.
    #[must_use]
    pub fn level(self) -> u8 {
        self as u8
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
            Self::Exception => "exception",
        };
        f.write_str(name)
    }
}

/// A sink accepting a message and its severity.
pub trait Log {
    fn log(&self, message: &str, severity: Severity);
}

/// Forwards messages to the `tracing` macros.
///
/// `tracing` has no level above `ERROR`, so `Critical` and `Exception` are
/// emitted as errors carrying a `severity` field.
#[derive(Debug, Default, Copy, Clone)]
pub struct TracingLog;

impl Log for TracingLog {
    fn log(&self, message: &str, severity: Severity) {
        match severity {
            Severity::Debug => tracing::debug!("{message}"),
            Severity::Info => tracing::info!("{message}"),
            Severity::Warning => tracing::warn!("{message}"),
            Severity::Error => tracing::error!("{message}"),
            Severity::Critical | Severity::Exception => {
                tracing::error!(severity = %severity, "{message}");
            }
        }
    }
}

/// Discards every message.
#[derive(Debug, Default, Copy, Clone)]
pub struct Silent;

impl Log for Silent {
    fn log(&self, _message: &str, _severity: Severity) {}
}
