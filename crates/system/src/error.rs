use crate::preconditions::Version;
use descriptor::ResolveError;
use std::io;
use thiserror::Error;

/// Error type for local command and environment checks.
#[derive(Error, Debug)]
pub enum SystemError {
    /// The shell could not be started.
    #[error("failed to run {command:?}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: io::Error,
    },

    /// The command exited non-zero or wrote to stderr.
    #[error("got error running {command:?} (return code {code:?}): {stderr}")]
    Command {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    /// No `rsync` executable on `PATH`.
    #[error("no rsync utility is found on the system, install rsync")]
    RsyncMissing,

    /// The installed rsync is older than required.
    #[error("rsync {required} or greater is needed, but got {found}")]
    RsyncVersion { found: Version, required: Version },

    /// A version string could not be understood.
    #[error("cannot read a version from {0:?}")]
    UnparsableVersion(String),

    /// A search over command output failed.
    #[error(transparent)]
    Resolve(#[from] ResolveError),
}
