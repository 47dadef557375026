mod error;
mod session;
mod sink;
mod subscriber;

pub use error::LoggingError;
pub use session::{LogConfig, LogSession};
pub use sink::{Log, Severity, Silent, TracingLog};
pub use subscriber::{create_env_filter, init, init_console_only};
