use regex::Regex;
use std::sync::OnceLock;

/// Port used whenever no valid port can be resolved.
pub const DEFAULT_PORT: u16 = 22;

/// Returns the first run of digits in `candidate` as a port.
///
/// Falls back to [`DEFAULT_PORT`] when the candidate is absent, holds no
/// digits, or the number is outside `1..=65535`.
pub fn validate_port(candidate: Option<&str>) -> u16 {
    static DIGITS: OnceLock<Regex> = OnceLock::new();
    let digits = DIGITS.get_or_init(|| Regex::new("[0-9]+").expect("valid regex"));

    candidate
        .and_then(|text| digits.find(text))
        .and_then(|m| m.as_str().parse::<u16>().ok())
        .filter(|&port| port != 0)
        .unwrap_or(DEFAULT_PORT)
}

/// Integer flavor of [`validate_port`]. The sign is ignored like any other
/// non-digit character.
pub fn validate_port_number(candidate: i64) -> u16 {
    validate_port(Some(&candidate.to_string()))
}
