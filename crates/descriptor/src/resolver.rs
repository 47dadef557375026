use crate::error::ResolveError;
use crate::matcher::{Matcher, Mode};
use crate::pattern::{ip_pattern, login_patterns, port_patterns};
use crate::port::validate_port;
use crate::spec::{ConnectionSpec, DEFAULT_PATH};
use crate::tokens::{Source, normalize};
use logging::{Log, Severity, TracingLog};
use std::collections::BTreeSet;
use std::fmt;
use std::slice;

/// Descriptor resolution bound to a log sink.
///
/// `Resolver::default()` traces through [`TracingLog`]; any other
/// [`Log`] implementation can be supplied with [`Resolver::new`].
pub struct Resolver<'a> {
    log: &'a dyn Log,
    matcher: Matcher<'a>,
}

impl fmt::Debug for Resolver<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Resolver")
            .field("matcher", &self.matcher)
            .finish_non_exhaustive()
    }
}

impl Default for Resolver<'static> {
    fn default() -> Self {
        Self::new(&TracingLog)
    }
}

impl<'a> Resolver<'a> {
    pub fn new(log: &'a dyn Log) -> Self {
        Self {
            log,
            matcher: Matcher::new(log),
        }
    }

    /// The matcher this resolver searches with.
    pub fn matcher(&self) -> &Matcher<'a> {
        &self.matcher
    }

    /// Resolves `login[:port]@host[:path]`.
    ///
    /// The login/port half is searched with the login and port priority
    /// tables. Port falls back to 22 and path to `~/`; hosts may be several,
    /// separated by whitespace.
    ///
    /// # Errors
    ///
    /// - [`ResolveError::Format`] unless the descriptor is exactly two
    ///   non-empty `@`-separated halves naming at least one host.
    /// - [`ResolveError::MissingLogin`] if no login can be found, e.g. for
    ///   `22@host`.
    pub fn parse(&self, descriptor: &str) -> Result<ConnectionSpec, ResolveError> {
        let (login_port, host_path) = split_descriptor(descriptor)?;
        let segment = normalize(login_port, false);

        let login = self
            .matcher
            .search_first(&segment, login_patterns(), Mode::Obligatory)
            .ok()
            .flatten()
            .ok_or_else(|| ResolveError::MissingLogin(descriptor.to_string()))?
            .to_string();

        let port = validate_port(
            self.matcher
                .search_first(&segment, port_patterns(), Mode::Optional)?,
        );

        let (hosts, path) = match host_path.split_once(':') {
            Some((hosts, path)) => (hosts, Some(path)),
            None => (host_path, None),
        };

        let hosts: BTreeSet<String> = normalize(hosts, true).into_iter().collect();
        if hosts.is_empty() {
            return Err(ResolveError::Format(descriptor.to_string()));
        }

        let path = path
            .filter(|p| !p.is_empty())
            .unwrap_or(DEFAULT_PATH)
            .to_string();

        self.log.log(
            &format!("Host set: {login} {port} {hosts:?} {path}"),
            Severity::Debug,
        );

        Ok(ConnectionSpec::new(login, port, hosts, path))
    }

    /// Collects every IPv4-shaped substring found in `source`.
    ///
    /// One address per token at most; the result is deduplicated.
    pub fn collect_ips(&self, source: impl Into<Source>) -> BTreeSet<String> {
        normalize(source, true)
            .iter()
            .filter_map(|token| {
                self.matcher
                    .search(slice::from_ref(token), ip_pattern(), Mode::Optional)
                    .ok()
                    .flatten()
                    .map(str::to_string)
            })
            .collect()
    }
}

fn split_descriptor(descriptor: &str) -> Result<(&str, &str), ResolveError> {
    let mut parts = descriptor.split('@');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(login_port), Some(host_path), None)
            if !login_port.is_empty() && !host_path.is_empty() =>
        {
            Ok((login_port, host_path))
        }
        _ => Err(ResolveError::Format(descriptor.to_string())),
    }
}

/// Resolves a descriptor, tracing through [`TracingLog`].
///
/// # Errors
///
/// See [`Resolver::parse`].
pub fn parse(descriptor: &str) -> Result<ConnectionSpec, ResolveError> {
    Resolver::default().parse(descriptor)
}

/// Collects IPv4 addresses, tracing through [`TracingLog`].
pub fn collect_ips(source: impl Into<Source>) -> BTreeSet<String> {
    Resolver::default().collect_ips(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use logging::Silent;

    fn hosts(items: &[&str]) -> BTreeSet<String> {
        items.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn test_parse_login_host() {
        let spec = parse("user@host").unwrap();
        assert_eq!(spec.login(), "user");
        assert_eq!(spec.port(), 22);
        assert_eq!(spec.hosts(), &hosts(&["host"]));
        assert_eq!(spec.path(), "~/");
    }

    #[test]
    fn test_parse_ip_and_path() {
        let spec = parse("user@192.168.1.5:/data").unwrap();
        assert_eq!(spec.login(), "user");
        assert_eq!(spec.port(), 22);
        assert_eq!(spec.hosts(), &hosts(&["192.168.1.5"]));
        assert_eq!(spec.path(), "/data");
    }

    #[test]
    fn test_parse_login_port() {
        let spec = parse("user:2222@host").unwrap();
        assert_eq!(spec.login(), "user");
        assert_eq!(spec.port(), 2222);
        assert_eq!(spec.hosts(), &hosts(&["host"]));
        assert_eq!(spec.path(), "~/");
    }

    #[test]
    fn test_parse_port_before_login() {
        let spec = parse("2222:user@host:/backup").unwrap();
        assert_eq!(spec.login(), "user");
        assert_eq!(spec.port(), 2222);
        assert_eq!(spec.path(), "/backup");
    }

    #[test]
    fn test_parse_other_delimiters() {
        let spec = parse("admin.8022@host").unwrap();
        assert_eq!(spec.login(), "admin");
        assert_eq!(spec.port(), 8022);

        let spec = parse("admin,8022@host").unwrap();
        assert_eq!(spec.login(), "admin");
        assert_eq!(spec.port(), 8022);
    }

    #[test]
    fn test_parse_invalid_port_defaults() {
        assert_eq!(parse("user:0@host").unwrap().port(), 22);
        assert_eq!(parse("user:70000@host").unwrap().port(), 22);
        assert_eq!(parse("user:ssh@host").unwrap().port(), 22);
    }

    #[test]
    fn test_parse_numeric_login_segment() {
        let err = parse("22@host").unwrap_err();
        assert_eq!(err, ResolveError::MissingLogin("22@host".into()));
    }

    #[test]
    fn test_parse_blank_login_segment() {
        let err = parse("   @host").unwrap_err();
        assert!(matches!(err, ResolveError::MissingLogin(_)));
    }

    #[test]
    fn test_parse_without_at() {
        let err = parse("host-only").unwrap_err();
        assert_eq!(err, ResolveError::Format("host-only".into()));
    }

    #[test]
    fn test_parse_rejects_extra_at_and_empty_halves() {
        for descriptor in ["a@b@c", "@host", "user@", "@", ""] {
            let err = parse(descriptor).unwrap_err();
            assert!(
                matches!(err, ResolveError::Format(_)),
                "{descriptor:?} gave {err:?}"
            );
        }
    }

    #[test]
    fn test_parse_requires_a_host() {
        let err = parse("user@:/data").unwrap_err();
        assert_eq!(err, ResolveError::Format("user@:/data".into()));
    }

    #[test]
    fn test_parse_several_hosts() {
        let spec = parse("user@web2 web1 web2:/srv").unwrap();
        assert_eq!(spec.hosts(), &hosts(&["web1", "web2"]));
        assert_eq!(spec.path(), "/srv");
    }

    #[test]
    fn test_parse_empty_path_defaults() {
        assert_eq!(parse("user@host:").unwrap().path(), "~/");
    }

    #[test]
    fn test_parse_path_keeps_later_colons() {
        assert_eq!(parse("user@host:/a:b").unwrap().path(), "/a:b");
    }

    #[test]
    fn test_silent_and_tracing_agree() {
        let silent = Resolver::new(&Silent);
        let traced = Resolver::default();
        for descriptor in ["user:2222@host", "22@host", "x@y:/z"] {
            assert_eq!(silent.parse(descriptor), traced.parse(descriptor));
        }
    }

    #[test]
    fn test_collect_ips() {
        let found = collect_ips(vec!["host1", "10.0.0.1", "other", "10.0.0.2", "10.0.0.1"]);
        assert_eq!(found, hosts(&["10.0.0.1", "10.0.0.2"]));
    }

    #[test]
    fn test_collect_ips_from_free_text() {
        let found = Resolver::new(&Silent)
            .collect_ips("connect to addr=172.16.0.4, fallback 172.16.0.5\nnone here");
        assert_eq!(found, hosts(&["172.16.0.4", "172.16.0.5"]));
    }

    #[test]
    fn test_collect_ips_none() {
        assert!(collect_ips("no addresses at all").is_empty());
        assert!(collect_ips("").is_empty());
    }
}
