//! Command-line driver for the `<itimeline>` tag.
//!
//! Renders wiki pages containing `<itimeline>` tags, reports what validation
//! dropped, and lists the supported options and locales.

pub mod cli;
pub mod commands;
pub mod config;
pub mod error;

pub use cli::Cli;
pub use config::CliConfig;
pub use error::{CliError, CliResult};
