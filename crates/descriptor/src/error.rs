use thiserror::Error;

/// Error type for descriptor resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    /// The descriptor is not exactly one `login@host` pair, or names no host.
    #[error("format error for target login-host set {0:?}: expected \"login@host\"")]
    Format(String),

    /// No login pattern matched the login/port segment.
    #[error("cannot define login in {0:?}")]
    MissingLogin(String),

    /// An obligatory search was asked to look through nothing.
    #[error("input for search is empty")]
    EmptyInput,

    /// An obligatory search found no match.
    #[error("expected pattern {pattern} not found in {tokens:?}")]
    PatternNotFound {
        /// The pattern, or the patterns tried in order separated by `|`.
        pattern: String,
        /// The tokens searched.
        tokens: Vec<String>,
    },
}
