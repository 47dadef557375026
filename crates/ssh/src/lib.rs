//! Hosts and logins known from the user's SSH client configuration.

use ssh2_config::{ParseRule, SshConfig};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for SSH config loading.
#[derive(Error, Debug)]
pub enum SshError {
    /// Home directory not found.
    #[error("could not determine home directory")]
    NoHomeDir,

    /// The config file exists but could not be opened.
    #[error("failed to read SSH config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// SSH config parse error (fatal - user should fix their SSH config).
    #[error("failed to parse SSH config: {0}")]
    Parse(String),
}

/// Concrete host names and `User` values from an SSH config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct KnownTargets {
    /// Host aliases, wildcards and negations excluded, sorted case-insensitively.
    pub hosts: Vec<String>,
    /// Distinct logins named by `User` directives, sorted.
    pub logins: Vec<String>,
}

impl KnownTargets {
    /// Returns `true` if `host` is declared as a concrete host alias.
    pub fn knows_host(&self, host: &str) -> bool {
        self.hosts.iter().any(|h| h == host)
    }
}

/// Returns the default SSH config file path (~/.ssh/config).
fn ssh_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".ssh").join("config"))
}

/// Parses `~/.ssh/config`.
///
/// Returns empty targets if the file doesn't exist.
///
/// # Errors
///
/// Returns `SshError::Parse` if the file exists but is malformed.
pub fn load_known_targets() -> Result<KnownTargets, SshError> {
    let path = ssh_config_path().ok_or(SshError::NoHomeDir)?;
    load_known_targets_from(&path)
}

/// Parses an SSH config at `path`; a missing file is not an error.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be read or parsed.
pub fn load_known_targets_from(path: &Path) -> Result<KnownTargets, SshError> {
    if !path.exists() {
        tracing::debug!("No SSH config at {}", path.display());
        return Ok(KnownTargets::default());
    }

    let file = File::open(path).map_err(|source| SshError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    parse_known_targets(&mut BufReader::new(file))
}

/// Parses SSH config text from a reader.
///
/// # Errors
///
/// Returns `SshError::Parse` if the config is malformed.
pub fn parse_known_targets(reader: &mut impl BufRead) -> Result<KnownTargets, SshError> {
    let config = SshConfig::default()
        .parse(reader, ParseRule::ALLOW_UNKNOWN_FIELDS)
        .map_err(|e| SshError::Parse(e.to_string()))?;

    let mut hosts = Vec::new();
    let mut logins = Vec::new();

    for host in config.get_hosts() {
        if let Some(user) = &host.params.user {
            logins.push(user.clone());
        }

        for clause in &host.pattern {
            let name = clause.pattern.as_str();

            // Skip wildcards and patterns
            if name.contains('*') || name.contains('?') || name == "!" {
                continue;
            }

            if clause.negated {
                continue;
            }

            hosts.push(name.to_string());
        }
    }

    hosts.sort_by_key(|a| a.to_lowercase());
    hosts.dedup();
    logins.sort();
    logins.dedup();

    Ok(KnownTargets { hosts, logins })
}
