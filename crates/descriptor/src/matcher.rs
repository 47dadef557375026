use crate::error::ResolveError;
use crate::pattern::Pattern;
use logging::{Log, Severity};
use std::fmt;
use std::slice;

/// What a search does when it comes up empty.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Mode {
    /// Nothing found is an error.
    Obligatory,
    /// Nothing found is `None`.
    Optional,
}

/// First-match search over normalized tokens.
///
/// Matches and misses are reported to the [`Log`] sink at debug severity.
pub struct Matcher<'a> {
    log: &'a dyn Log,
}

impl fmt::Debug for Matcher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Matcher").finish_non_exhaustive()
    }
}

impl<'a> Matcher<'a> {
    pub fn new(log: &'a dyn Log) -> Self {
        Self { log }
    }

    /// Returns the first match of `pattern`, scanning tokens in order.
    ///
    /// # Errors
    ///
    /// In [`Mode::Obligatory`], returns [`ResolveError::EmptyInput`] for an
    /// empty token list and [`ResolveError::PatternNotFound`] when no token
    /// matches.
    pub fn search<'t>(
        &self,
        tokens: &'t [String],
        pattern: &Pattern,
        mode: Mode,
    ) -> Result<Option<&'t str>, ResolveError> {
        self.search_first(tokens, slice::from_ref(pattern), mode)
    }

    /// Tries each pattern in turn; the first one matching any token wins.
    ///
    /// Within a pattern, earlier tokens win over later ones.
    ///
    /// # Errors
    ///
    /// Same as [`Matcher::search`], once every pattern has been tried.
    pub fn search_first<'t>(
        &self,
        tokens: &'t [String],
        patterns: &[Pattern],
        mode: Mode,
    ) -> Result<Option<&'t str>, ResolveError> {
        if tokens.is_empty() {
            self.log.log("Input for search is empty", Severity::Debug);
            return match mode {
                Mode::Obligatory => Err(ResolveError::EmptyInput),
                Mode::Optional => Ok(None),
            };
        }

        for pattern in patterns {
            for token in tokens {
                if let Some(found) = pattern.find(token) {
                    self.log
                        .log(&format!("Found pattern {found:?} by {pattern}"), Severity::Debug);
                    return Ok(Some(found));
                }
            }
        }

        self.log
            .log(&format!("Nothing found in {tokens:?}"), Severity::Debug);

        match mode {
            Mode::Obligatory => Err(ResolveError::PatternNotFound {
                pattern: patterns
                    .iter()
                    .map(Pattern::as_str)
                    .collect::<Vec<_>>()
                    .join("|"),
                tokens: tokens.to_vec(),
            }),
            Mode::Optional => Ok(None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pattern::{login_patterns, port_patterns};
    use logging::Silent;
    use std::cell::RefCell;

    #[derive(Default)]
    struct Recorder(RefCell<Vec<String>>);

    impl Log for Recorder {
        fn log(&self, message: &str, _severity: Severity) {
            self.0.borrow_mut().push(message.to_string());
        }
    }

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_first_token_wins() {
        let matcher = Matcher::new(&Silent);
        let digits = Pattern::new(r"\d+").unwrap();
        let list = tokens(&["alpha", "b12", "c34"]);

        let found = matcher.search(&list, &digits, Mode::Obligatory).unwrap();
        assert_eq!(found, Some("12"));
    }

    #[test]
    fn test_leftmost_within_token() {
        let matcher = Matcher::new(&Silent);
        let digits = Pattern::new(r"\d+").unwrap();
        let list = tokens(&["x7y88"]);

        assert_eq!(matcher.search(&list, &digits, Mode::Optional).unwrap(), Some("7"));
    }

    #[test]
    fn test_pattern_priority_beats_token_order() {
        let matcher = Matcher::new(&Silent);
        let patterns = vec![
            Pattern::new("^second$").unwrap(),
            Pattern::new("first").unwrap(),
        ];
        let list = tokens(&["first", "second"]);

        let found = matcher
            .search_first(&list, &patterns, Mode::Obligatory)
            .unwrap();
        assert_eq!(found, Some("second"));
    }

    #[test]
    fn test_obligatory_empty_input() {
        let matcher = Matcher::new(&Silent);
        let err = matcher
            .search_first(&[], login_patterns(), Mode::Obligatory)
            .unwrap_err();
        assert_eq!(err, ResolveError::EmptyInput);
    }

    #[test]
    fn test_optional_empty_input() {
        let matcher = Matcher::new(&Silent);
        let found = matcher
            .search_first(&[], port_patterns(), Mode::Optional)
            .unwrap();
        assert_eq!(found, None);
    }

    #[test]
    fn test_obligatory_not_found() {
        let matcher = Matcher::new(&Silent);
        let list = tokens(&["22"]);
        let err = matcher
            .search_first(&list, login_patterns(), Mode::Obligatory)
            .unwrap_err();

        match err {
            ResolveError::PatternNotFound { pattern, tokens } => {
                let tried = login_patterns()
                    .iter()
                    .map(Pattern::as_str)
                    .collect::<Vec<_>>()
                    .join("|");
                assert_eq!(pattern, tried);
                assert_eq!(tokens, vec!["22"]);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_optional_not_found() {
        let matcher = Matcher::new(&Silent);
        let list = tokens(&["user"]);
        assert_eq!(
            matcher
                .search_first(&list, port_patterns(), Mode::Optional)
                .unwrap(),
            None
        );
    }

    #[test]
    fn test_matches_are_logged() {
        let recorder = Recorder::default();
        let matcher = Matcher::new(&recorder);
        let list = tokens(&["user:2222"]);

        matcher
            .search_first(&list, login_patterns(), Mode::Obligatory)
            .unwrap();
        matcher
            .search_first(&list, &[Pattern::new("nope").unwrap()], Mode::Optional)
            .unwrap();

        let messages = recorder.0.borrow();
        assert_eq!(messages.len(), 2);
        assert!(messages[0].contains("\"user\""));
        assert!(messages[1].starts_with("Nothing found"));
    }
}
