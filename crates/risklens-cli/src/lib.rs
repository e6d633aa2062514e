//! RiskLens CLI library.
//!
//! This library provides the core functionality for the `risklens` command-line
//! interface: configuration management, register loading, command execution,
//! and output formatting. The analysis itself lives in the library crates;
//! everything here is file and terminal plumbing around them.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod output;
pub mod records;

pub use cli::{Cli, Command};
pub use config::Config;
pub use error::{CliError, Result};
pub use output::Formatter;
