mod error;
mod preconditions;
mod runner;
mod users;

pub use error::SystemError;
pub use preconditions::{RsyncInfo, Version, check_rsync, parse_rsync_version};
pub use runner::{CommandOutput, Runner};
pub use users::{LocalUsers, UserResolver, merge_users};
