use config::{Config, LoadError, ensure_config_at, ensure_config_exists, load, load_from_path};
use descriptor::{AlwaysReachable, ResolveError, Resolver};
use logging::{LogConfig, LoggingError};
use ssh::{KnownTargets, SshError, load_known_targets};
use std::io::{self, Write};
use std::path::PathBuf;
use system::{LocalUsers, Runner, SystemError, UserResolver, Version, check_rsync};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Config(#[from] LoadError),

    #[error(transparent)]
    Logging(#[from] LoggingError),

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error(transparent)]
    System(#[from] SystemError),

    #[error(transparent)]
    Ssh(#[from] SshError),

    #[error("failed to encode JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("failed to write output: {0}")]
    Io(#[from] io::Error),
}

#[derive(Debug)]
pub struct App {
    config: Config,
    config_path: Option<PathBuf>,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            config_path: None,
        }
    }

    /// Loads the config from `path`, or from ~/.rsyncer.json when `None`.
    pub fn load(path: Option<PathBuf>) -> Result<Self, AppError> {
        let config = match &path {
            Some(path) if path.exists() => load_from_path(path)?,
            Some(_) => Config::default(),
            None => load()?,
        };

        Ok(Self {
            config,
            config_path: path,
        })
    }

    pub fn log_config(&self, verbosity: u8) -> LogConfig {
        LogConfig {
            logs_path: self.config.logs_path.clone(),
            run_name: self.config.run_name.clone(),
            verbosity,
        }
    }

    pub fn init_logging(&self, verbosity: u8, console_only: bool) -> Result<(), AppError> {
        if console_only {
            logging::init_console_only(verbosity)?;
            return Ok(());
        }

        let session = self.log_config(verbosity).prepare()?;
        logging::init(&session)?;
        tracing::debug!("Logging to {}", session.dir().display());
        Ok(())
    }

    /// SSH config knowledge; an unreadable SSH config only costs a warning.
    fn known_targets(&self) -> KnownTargets {
        if !self.config.read_ssh_config {
            return KnownTargets::default();
        }

        load_known_targets().unwrap_or_else(|e| {
            tracing::warn!("{e}");
            KnownTargets::default()
        })
    }

    pub fn resolve(&self, descriptor: &str, json: bool, out: &mut impl Write) -> Result<(), AppError> {
        let spec = Resolver::default().parse(descriptor)?;
        let statuses = spec.probe(&AlwaysReachable);

        let known = self.known_targets();
        for host in spec.hosts() {
            if known.knows_host(host) {
                tracing::debug!("Host {host} is declared in the SSH config");
            }
        }
        for status in statuses.iter().filter(|s| !s.reachable) {
            tracing::warn!("Host {}:{} is not reachable", status.host, status.port);
        }

        if json {
            let mut value = serde_json::to_value(&spec)?;
            value["reachability"] = serde_json::to_value(&statuses)?;
            writeln!(out, "{}", serde_json::to_string_pretty(&value)?)?;
        } else {
            writeln!(out, "login: {}", spec.login())?;
            writeln!(out, "port:  {}", spec.port())?;
            for host in spec.hosts() {
                writeln!(out, "host:  {host}")?;
            }
            writeln!(out, "path:  {}", spec.path())?;
        }

        Ok(())
    }

    pub fn ips(text: &[String], out: &mut impl Write) -> Result<(), AppError> {
        for ip in Resolver::default().collect_ips(text) {
            writeln!(out, "{ip}")?;
        }
        Ok(())
    }

    pub fn users(&self, no_root: bool, no_known: bool, out: &mut impl Write) -> Result<(), AppError> {
        let known_logins = if no_known {
            Vec::new()
        } else {
            let mut logins = self.config.known_logins.clone();
            logins.extend(self.known_targets().logins);
            logins
        };

        let users = LocalUsers::new(Runner::silent())
            .with_known_logins(known_logins)
            .include_root(self.config.include_root && !no_root);

        writeln!(out, "current: {}", users.current_user()?)?;
        for user in users.system_users()? {
            writeln!(out, "{user}")?;
        }
        Ok(())
    }

    pub fn check(&self, out: &mut impl Write) -> Result<(), AppError> {
        let minimum: Version = self.config.min_rsync_version.parse()?;
        let rsync = check_rsync(&Runner::silent(), minimum)?;
        writeln!(out, "rsync {} at {}", rsync.version, rsync.path.display())?;
        Ok(())
    }

    pub fn init_config(&self, out: &mut impl Write) -> Result<(), AppError> {
        let path = match &self.config_path {
            Some(path) => {
                ensure_config_at(path)?;
                path.clone()
            }
            None => ensure_config_exists()?,
        };
        writeln!(out, "{}", path.display())?;
        Ok(())
    }
}
