//! Resolution of `login[:port]@host[:path]` sync targets.
//!
//! The entry point is [`parse`] (or [`Resolver::parse`] when a specific
//! [`logging::Log`] sink is wanted). The building blocks are public too:
//! token normalization, ordered pattern matching, port validation and IPv4
//! collection.

mod error;
mod matcher;
mod pattern;
mod port;
mod probe;
mod resolver;
mod spec;
mod tokens;

pub use error::ResolveError;
pub use matcher::{Matcher, Mode};
pub use pattern::{Pattern, ip_pattern, login_patterns, port_patterns, single_word_pattern};
pub use port::{DEFAULT_PORT, validate_port, validate_port_number};
pub use probe::{AlwaysReachable, HostProber, HostStatus};
pub use resolver::{Resolver, collect_ips, parse};
pub use spec::{ConnectionSpec, DEFAULT_PATH};
pub use tokens::{Source, normalize, normalize_with};
