use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default = "default_logs_path")]
    pub logs_path: PathBuf,

    #[serde(default = "default_run_name")]
    pub run_name: String,

    #[serde(default = "default_known_logins")]
    pub known_logins: Vec<String>,

    #[serde(default = "default_true")]
    pub include_root: bool,

    #[serde(default = "default_true")]
    pub read_ssh_config: bool,

    #[serde(default = "default_min_rsync_version")]
    pub min_rsync_version: String,
}

fn default_logs_path() -> PathBuf {
    PathBuf::from("/tmp/logs")
}

fn default_run_name() -> String {
    "run".to_string()
}

fn default_known_logins() -> Vec<String> {
    vec!["ddn".to_string(), "user".to_string()]
}

fn default_true() -> bool {
    true
}

fn default_min_rsync_version() -> String {
    "3.0".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logs_path: default_logs_path(),
            run_name: default_run_name(),
            known_logins: default_known_logins(),
            include_root: true,
            read_ssh_config: true,
            min_rsync_version: default_min_rsync_version(),
        }
    }
}
