use crate::error::SystemError;
use crate::runner::Runner;
use descriptor::{Matcher, Mode, normalize_with, single_word_pattern};
use logging::TracingLog;

/// Source of OS user names.
pub trait UserResolver {
    /// The user running this process.
    ///
    /// # Errors
    ///
    /// Returns an error if the user cannot be determined.
    fn current_user(&self) -> Result<String, SystemError>;

    /// Users known to the system, `root` added in front when included and missing.
    ///
    /// # Errors
    ///
    /// Returns an error if the user list cannot be read.
    fn system_users(&self) -> Result<Vec<String>, SystemError>;
}

/// Reads users through local commands (`whoami`, `users`).
#[derive(Debug, Clone)]
pub struct LocalUsers {
    runner: Runner,
    known_logins: Vec<String>,
    include_root: bool,
}

impl Default for LocalUsers {
    fn default() -> Self {
        Self::new(Runner::silent())
    }
}

impl LocalUsers {
    pub fn new(runner: Runner) -> Self {
        Self {
            runner,
            known_logins: Vec::new(),
            include_root: true,
        }
    }

    /// Logins to list even when nobody is logged in under them.
    #[must_use]
    pub fn with_known_logins(mut self, logins: Vec<String>) -> Self {
        self.known_logins = logins;
        self
    }

    #[must_use]
    pub fn include_root(mut self, include: bool) -> Self {
        self.include_root = include;
        self
    }
}

impl UserResolver for LocalUsers {
    fn current_user(&self) -> Result<String, SystemError> {
        let lines = self.runner.run_checked("whoami")?;
        let user = Matcher::new(&TracingLog)
            .search(&lines, single_word_pattern(), Mode::Obligatory)?
            .unwrap_or_default();
        Ok(user.trim().to_string())
    }

    fn system_users(&self) -> Result<Vec<String>, SystemError> {
        let logged_in = self.runner.run_checked("users")?;
        Ok(merge_users(&logged_in, &self.known_logins, self.include_root))
    }
}

/// Combines logged-in users with known logins.
///
/// The result is deduplicated and sorted. With `include_root`, a missing
/// `root` is put in front; one already present keeps its sorted place.
pub fn merge_users(logged_in: &[String], known_logins: &[String], include_root: bool) -> Vec<String> {
    let mut users = normalize_with(logged_in, [known_logins], true);

    if include_root && !users.iter().any(|user| user == "root") {
        users.insert(0, "root".to_string());
    }

    users
}
