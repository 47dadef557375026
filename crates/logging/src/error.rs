use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Error type for log session setup.
#[derive(Error, Debug)]
pub enum LoggingError {
    /// The session directory could not be created.
    #[error("failed to create logs directory {}: {source}", path.display())]
    CreateDir {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A log file inside the session directory could not be opened.
    #[error("failed to open log file {}: {source}", path.display())]
    OpenFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The timestamp for the session directory could not be rendered.
    #[error("failed to format session timestamp: {0}")]
    Timestamp(#[from] time::error::Format),

    /// A global subscriber was already installed.
    #[error("logging already initialized: {0}")]
    AlreadyInitialized(String),
}
