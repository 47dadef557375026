//! Checks the environment must pass before a sync can run.

use crate::error::SystemError;
use crate::runner::Runner;
use descriptor::{Matcher, Mode, Pattern};
use logging::TracingLog;
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;
use std::sync::OnceLock;

/// A `major.minor` version.
#[derive(Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Version {
    pub major: u32,
    pub minor: u32,
}

impl Version {
    pub const fn new(major: u32, minor: u32) -> Self {
        Self { major, minor }
    }
}

impl fmt::Display for Version {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.major, self.minor)
    }
}

impl FromStr for Version {
    type Err = SystemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let unparsable = || SystemError::UnparsableVersion(s.to_string());
        let (major, minor) = s.trim().split_once('.').ok_or_else(unparsable)?;
        Ok(Self {
            major: major.parse().map_err(|_| unparsable())?,
            minor: minor.parse().map_err(|_| unparsable())?,
        })
    }
}

/// Location and version of the rsync found on `PATH`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RsyncInfo {
    pub path: PathBuf,
    pub version: Version,
}

fn version_pattern() -> &'static Pattern {
    static VERSION: OnceLock<Pattern> = OnceLock::new();
    VERSION.get_or_init(|| {
        Pattern::new(r"version\s+(?P<m>[0-9]+\.[0-9]+)").expect("valid regex")
    })
}

/// Extracts `major.minor` from `rsync --version` output.
///
/// # Errors
///
/// Returns an error if no line carries a version.
pub fn parse_rsync_version(lines: &[String]) -> Result<Version, SystemError> {
    let found = Matcher::new(&TracingLog)
        .search(lines, version_pattern(), Mode::Obligatory)
        .map_err(|_| SystemError::UnparsableVersion(lines.join(" ")))?
        .ok_or_else(|| SystemError::UnparsableVersion(lines.join(" ")))?;
    found.parse()
}

/// Locates rsync and checks it is at least `minimum`.
///
/// # Errors
///
/// Returns an error if rsync is missing, its version cannot be read, or it
/// is older than `minimum`.
pub fn check_rsync(runner: &Runner, minimum: Version) -> Result<RsyncInfo, SystemError> {
    let path = which::which("rsync").map_err(|_| SystemError::RsyncMissing)?;
    let lines = runner.exec_checked(&path, &["--version"])?;
    let version = parse_rsync_version(&lines)?;

    if version < minimum {
        return Err(SystemError::RsyncVersion {
            found: version,
            required: minimum,
        });
    }

    tracing::debug!("Using rsync {version} at {}", path.display());
    Ok(RsyncInfo { path, version })
}
