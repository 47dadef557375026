//! Per-run log directory.
//!
//! The binary builds one [`LogConfig`] from its settings, calls
//! [`LogConfig::prepare`] once at startup and passes the resulting
//! [`LogSession`] to [`crate::init`]. Nothing is memoized behind the caller's
//! back: preparing twice creates two directories.

use crate::error::LoggingError;
use std::fs;
use std::path::{Path, PathBuf};
use time::OffsetDateTime;
use time::macros::format_description;

const OPERATIONS_LOG: &str = "operations.log";
const ERRORS_LOG: &str = "errors.log";

/// Where session logs go and how their directory is named.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Parent directory for all session directories.
    pub logs_path: PathBuf,
    /// Prefix of each session directory name.
    pub run_name: String,
    /// Console verbosity (`-v` count).
    pub verbosity: u8,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            logs_path: PathBuf::from("/tmp/logs"),
            run_name: "run".to_string(),
            verbosity: 0,
        }
    }
}

impl LogConfig {
    /// Returns the session directory for a run started at `started`.
    ///
    /// Format: `<logs_path>/<run_name>_<month>-<day>-<year>_<hour>-<minute>-<second>`.
    ///
    /// # Errors
    ///
    /// Returns an error if the timestamp cannot be formatted.
    pub fn session_dir(&self, started: OffsetDateTime) -> Result<PathBuf, LoggingError> {
        let stamp = started.format(format_description!(
            "[month padding:none]-[day padding:none]-[year]_[hour padding:none]-[minute padding:none]-[second padding:none]"
        ))?;
        Ok(self.logs_path.join(format!("{}_{stamp}", self.run_name)))
    }

    /// Creates the session directory for the current local time.
    ///
    /// Falls back to UTC when the local offset cannot be determined.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn prepare(&self) -> Result<LogSession, LoggingError> {
        let now = OffsetDateTime::now_local().unwrap_or_else(|_| OffsetDateTime::now_utc());
        self.prepare_at(now)
    }

    /// Creates the session directory for a fixed start time.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn prepare_at(&self, started: OffsetDateTime) -> Result<LogSession, LoggingError> {
        let dir = self.session_dir(started)?;
        fs::create_dir_all(&dir).map_err(|source| LoggingError::CreateDir {
            path: dir.clone(),
            source,
        })?;

        Ok(LogSession {
            dir,
            verbosity: self.verbosity,
        })
    }
}

/// A prepared session directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSession {
    dir: PathBuf,
    verbosity: u8,
}

impl LogSession {
    /// The session directory.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Console verbosity carried over from the config.
    #[must_use]
    pub fn verbosity(&self) -> u8 {
        self.verbosity
    }

    /// File receiving every event at debug level and above.
    #[must_use]
    pub fn operations_log(&self) -> PathBuf {
        self.dir.join(OPERATIONS_LOG)
    }

    /// File receiving errors only.
    #[must_use]
    pub fn errors_log(&self) -> PathBuf {
        self.dir.join(ERRORS_LOG)
    }
}
