//! JSON Schema checks for `~/.rsyncer.json`.

use jsonschema::Validator;
use serde_json::Value;
use std::fmt;
use std::sync::OnceLock;
use thiserror::Error;

const SCHEMA_JSON: &str = include_str!("../../../assets/rsyncer.schema.json");

/// One schema violation, located by JSON pointer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationError {
    /// JSON pointer into the config, empty for the document root.
    pub pointer: String,
    pub message: String,
}

impl ValidationError {
    /// Top-level config field the violation belongs to, if any.
    pub fn field(&self) -> Option<&str> {
        self.pointer
            .strip_prefix('/')
            .and_then(|rest| rest.split('/').next())
            .filter(|field| !field.is_empty())
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.field() {
            Some(_) => write!(f, "{}: {}", self.pointer, self.message),
            None => f.write_str(&self.message),
        }
    }
}

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid JSON: {0}")]
    InvalidJson(#[source] serde_json::Error),

    #[error("config rejected: {}", join(.0))]
    ValidationFailed(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// The embedded schema text.
pub fn schema() -> &'static str {
    SCHEMA_JSON
}

fn validator() -> &'static Validator {
    static VALIDATOR: OnceLock<Validator> = OnceLock::new();
    VALIDATOR.get_or_init(|| {
        let schema: Value = serde_json::from_str(SCHEMA_JSON).expect("embedded schema is JSON");
        Validator::new(&schema).expect("embedded schema is a valid JSON Schema")
    })
}

/// Checks `value` against the config schema, collecting every violation.
///
/// # Errors
///
/// Returns all violations found, in schema evaluation order.
///
/// # Panics
///
/// Panics if the embedded schema is broken.
pub fn validate(value: &Value) -> Result<(), Vec<ValidationError>> {
    let errors: Vec<ValidationError> = validator()
        .iter_errors(value)
        .map(|e| ValidationError {
            pointer: e.instance_path.to_string(),
            message: e.to_string(),
        })
        .collect();

    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn violations(json: &str) -> Vec<ValidationError> {
        let value: Value = serde_json::from_str(json).unwrap();
        validate(&value).err().unwrap_or_default()
    }

    #[test]
    fn test_schema_declares_draft() {
        let schema: Value = serde_json::from_str(schema()).unwrap();
        assert!(schema.get("$schema").is_some());
    }

    #[test]
    fn test_partial_config_is_valid() {
        assert!(violations(r#"{"logs_path": "/var/log/rsyncer", "known_logins": ["ops"]}"#).is_empty());
    }

    #[test]
    fn test_default_asset_is_valid() {
        assert!(violations(include_str!("../../../assets/rsyncer.default.json")).is_empty());
    }

    #[test]
    fn test_wrong_type() {
        let errors = violations(r#"{"include_root": "yes"}"#);
        assert_eq!(errors[0].field(), Some("include_root"));
    }

    #[test]
    fn test_login_with_space_points_at_item() {
        let errors = violations(r#"{"known_logins": ["ops", "two words"]}"#);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].pointer, "/known_logins/1");
        assert_eq!(errors[0].field(), Some("known_logins"));
    }

    #[test]
    fn test_duplicate_logins_rejected() {
        assert!(!violations(r#"{"known_logins": ["ops", "ops"]}"#).is_empty());
    }

    #[test]
    fn test_bad_version_and_run_name_both_reported() {
        let errors = violations(r#"{"min_rsync_version": "three", "run_name": "a b"}"#);
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn test_unknown_field_is_a_root_violation() {
        let errors = violations(r#"{"unknown_field": "value"}"#);
        assert_eq!(errors[0].field(), None);
        assert!(!errors[0].to_string().starts_with('/'));
    }
}
