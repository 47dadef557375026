use crate::schema::{ConfigError, validate};
use crate::types::Config;
use serde_json::Value;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use thiserror::Error;

const DEFAULT_JSON: &str = include_str!("../../../assets/rsyncer.default.json");
const FILE_NAME: &str = ".rsyncer.json";

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("could not determine home directory")]
    NoHomeDir,

    #[error("cannot access config file: {0}")]
    Io(#[from] io::Error),

    #[error(transparent)]
    Config(#[from] ConfigError),
}

/// `~/.rsyncer.json`, or `None` without a home directory.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(FILE_NAME))
}

/// Writes the bundled defaults to `path` when nothing is there yet.
///
/// Missing parent directories are created. Returns whether a file was
/// written.
///
/// # Errors
///
/// Returns an error if the directory or file cannot be written.
pub fn ensure_config_at(path: &Path) -> Result<bool, LoadError> {
    if path.exists() {
        return Ok(false);
    }

    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }
    fs::write(path, DEFAULT_JSON)?;
    tracing::info!("Wrote default config to {}", path.display());
    Ok(true)
}

/// [`ensure_config_at`] for the home config, returning its path.
///
/// # Errors
///
/// Returns an error without a home directory or if writing fails.
pub fn ensure_config_exists() -> Result<PathBuf, LoadError> {
    let path = config_path().ok_or(LoadError::NoHomeDir)?;
    ensure_config_at(&path)?;
    Ok(path)
}

/// # Errors
///
/// Returns an error if `s` is not JSON or breaks the schema.
pub fn load_from_str(s: &str) -> Result<Config, ConfigError> {
    s.parse()
}

/// Reads and checks the config at `path`.
///
/// # Errors
///
/// Returns an error if the file is unreadable or its content is rejected.
pub fn load_from_path(path: &Path) -> Result<Config, LoadError> {
    let text = fs::read_to_string(path)?;
    let config = load_from_str(&text)?;
    tracing::debug!("Loaded config from {}", path.display());
    Ok(config)
}

/// Loads `~/.rsyncer.json`, falling back to defaults when it is absent.
///
/// # Errors
///
/// Returns an error without a home directory or if the file is rejected.
pub fn load() -> Result<Config, LoadError> {
    let path = config_path().ok_or(LoadError::NoHomeDir)?;
    if path.exists() {
        load_from_path(&path)
    } else {
        tracing::debug!("{} not found, using defaults", path.display());
        Ok(Config::default())
    }
}

impl FromStr for Config {
    type Err = ConfigError;

    /// Schema first, so every violation is reported rather than the first
    /// serde stumbles on.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: Value = serde_json::from_str(s).map_err(ConfigError::InvalidJson)?;
        validate(&value).map_err(ConfigError::ValidationFailed)?;
        serde_json::from_value(value).map_err(ConfigError::InvalidJson)
    }
}
