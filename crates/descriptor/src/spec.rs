//! Resolved connection parameters.

use crate::error::ResolveError;
use crate::resolver::Resolver;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// Remote path used when the descriptor names none.
pub const DEFAULT_PATH: &str = "~/";

/// Connection parameters resolved from one descriptor.
///
/// Built only by [`Resolver::parse`]; immutable afterwards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConnectionSpec {
    login: String,
    port: u16,
    hosts: BTreeSet<String>,
    path: String,
}

impl ConnectionSpec {
    pub(crate) fn new(login: String, port: u16, hosts: BTreeSet<String>, path: String) -> Self {
        Self {
            login,
            port,
            hosts,
            path,
        }
    }

    pub fn login(&self) -> &str {
        &self.login
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    /// Target hosts, deduplicated and sorted. Never empty.
    pub fn hosts(&self) -> &BTreeSet<String> {
        &self.hosts
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    /// `login@host:path` for every host, as handed to rsync.
    pub fn destinations(&self) -> Vec<String> {
        self.hosts
            .iter()
            .map(|host| format!("{}@{host}:{}", self.login, self.path))
            .collect()
    }
}

impl fmt::Display for ConnectionSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let hosts = self.hosts.iter().cloned().collect::<Vec<_>>().join(" ");
        write!(f, "{}:{}@{hosts}:{}", self.login, self.port, self.path)
    }
}

impl FromStr for ConnectionSpec {
    type Err = ResolveError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Resolver::default().parse(s)
    }
}
