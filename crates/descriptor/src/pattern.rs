//! Compiled patterns and the priority tables used for disambiguation.
//!
//! The `regex` engine has no lookaround. Where the match must sit next to a
//! delimiter without including it, the pattern wraps the wanted part in a
//! capture group named `m` and [`Pattern::find`] returns that group.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// Login candidates, in priority order:
/// a word starting the segment and ending at a delimiter or the end,
/// a word after a delimiter running to the end,
/// the whole segment as a single word.
const LOGIN_PATTERNS: [&str; 3] = [
    r"^(?P<m>[^\W\d]\w*)(?:[,.:]|$)",
    r"[,.:](?P<m>[^\W\d]\w*)$",
    r"^[^\W\d]\w*$",
];

/// Port candidates, in priority order:
/// a digit field ending at a delimiter,
/// a digit field after a delimiter running to the end.
const PORT_PATTERNS: [&str; 2] = [r"(?:^|[,.:])(?P<m>[0-9]+)[,.:]", r"[,.:](?P<m>[0-9]+)$"];

const IP_PATTERN: &str = r"[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}\.[0-9]{1,3}";

const SINGLE_WORD_PATTERN: &str = r"^\w+$";

/// A compiled search pattern.
#[derive(Debug, Clone)]
pub struct Pattern {
    regex: Regex,
}

impl Pattern {
    /// Compiles a pattern.
    ///
    /// # Errors
    ///
    /// Returns an error if `expr` is not a valid regular expression.
    pub fn new(expr: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            regex: Regex::new(expr)?,
        })
    }

    /// Returns the leftmost match in `text`.
    ///
    /// If the pattern has a group named `m`, only that group is returned.
    pub fn find<'t>(&self, text: &'t str) -> Option<&'t str> {
        let captures = self.regex.captures(text)?;
        captures
            .name("m")
            .or_else(|| captures.get(0))
            .map(|m| m.as_str())
    }

    /// The source expression.
    pub fn as_str(&self) -> &str {
        self.regex.as_str()
    }
}

impl fmt::Display for Pattern {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn compile(exprs: &[&str]) -> Vec<Pattern> {
    exprs
        .iter()
        .map(|expr| Pattern::new(expr).expect("valid regex"))
        .collect()
}

/// Ordered login patterns.
pub fn login_patterns() -> &'static [Pattern] {
    static LOGIN: OnceLock<Vec<Pattern>> = OnceLock::new();
    LOGIN.get_or_init(|| compile(&LOGIN_PATTERNS))
}

/// Ordered port patterns.
pub fn port_patterns() -> &'static [Pattern] {
    static PORT: OnceLock<Vec<Pattern>> = OnceLock::new();
    PORT.get_or_init(|| compile(&PORT_PATTERNS))
}

/// Dotted-quad IPv4 shape, octet ranges unchecked.
pub fn ip_pattern() -> &'static Pattern {
    static IP: OnceLock<Pattern> = OnceLock::new();
    IP.get_or_init(|| Pattern::new(IP_PATTERN).expect("valid regex"))
}

/// A token made only of word characters.
pub fn single_word_pattern() -> &'static Pattern {
    static WORD: OnceLock<Pattern> = OnceLock::new();
    WORD.get_or_init(|| Pattern::new(SINGLE_WORD_PATTERN).expect("valid regex"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn first_hit<'t>(patterns: &[Pattern], text: &'t str) -> Option<(usize, &'t str)> {
        patterns
            .iter()
            .enumerate()
            .find_map(|(i, p)| p.find(text).map(|m| (i, m)))
    }

    #[test]
    fn test_named_group_excludes_delimiter() {
        let pattern = Pattern::new(r"(?P<m>\w+):").unwrap();
        assert_eq!(pattern.find("user:22"), Some("user"));
    }

    #[test]
    fn test_whole_match_without_group() {
        let pattern = Pattern::new(r"\d+").unwrap();
        assert_eq!(pattern.find("abc123def"), Some("123"));
        assert_eq!(pattern.find("abc"), None);
    }

    #[test]
    fn test_invalid_expression() {
        assert!(Pattern::new("(unclosed").is_err());
    }

    #[test]
    fn test_login_start_anchored_first() {
        assert_eq!(first_hit(login_patterns(), "user:2222"), Some((0, "user")));
        assert_eq!(first_hit(login_patterns(), "user"), Some((0, "user")));
    }

    #[test]
    fn test_login_after_delimiter() {
        assert_eq!(first_hit(login_patterns(), "2222:user"), Some((1, "user")));
        assert_eq!(first_hit(login_patterns(), "2222.admin"), Some((1, "admin")));
    }

    #[test]
    fn test_login_rejects_digit_initial() {
        assert_eq!(first_hit(login_patterns(), "22"), None);
        assert_eq!(first_hit(login_patterns(), "1user"), None);
    }

    #[test]
    fn test_port_followed_by_delimiter_first() {
        assert_eq!(first_hit(port_patterns(), "2222:user"), Some((0, "2222")));
        assert_eq!(first_hit(port_patterns(), "user:2222"), Some((1, "2222")));
    }

    #[test]
    fn test_port_ignores_digits_inside_words() {
        assert_eq!(first_hit(port_patterns(), "user1:2222"), Some((1, "2222")));
        assert_eq!(first_hit(port_patterns(), "user1"), None);
    }

    #[test]
    fn test_ip_pattern() {
        assert_eq!(ip_pattern().find("addr=192.168.0.10;"), Some("192.168.0.10"));
        assert_eq!(ip_pattern().find("10.0.1"), None);
    }

    #[test]
    fn test_single_word_pattern() {
        assert_eq!(single_word_pattern().find("deploy"), Some("deploy"));
        assert_eq!(single_word_pattern().find("two words"), None);
    }

    #[test]
    fn test_display_shows_expression() {
        assert_eq!(ip_pattern().to_string(), IP_PATTERN);
    }
}
