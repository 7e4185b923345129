//! File-backed AVL tree store with a small command-line front end.

pub mod cli;
pub mod config;
pub mod error;
pub mod logging;
pub mod store;
#[cfg(test)]
mod test_support;

pub use cli::{Cli, Command, USAGE};
pub use config::{Config, validate_dir};
pub use error::{CommandError, LoggingError, StoreError, UsageError};
pub use logging::init_logging;
pub use store::Store;
