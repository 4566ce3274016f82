//! Subcommand implementations.
//!
//! Each command builds its output as a `String` and leaves printing to the
//! caller, so the commands can be exercised directly in tests.

pub mod check;
pub mod config;
pub mod registry;
pub mod render;

use std::io::Read;
use std::path::Path;

use crate::error::CliResult;

/// Reads the page from `file`, or from stdin when `file` is absent or `-`.
pub fn read_input(file: Option<&Path>) -> CliResult<String> {
    match file {
        Some(path) if path != Path::new("-") => Ok(std::fs::read_to_string(path)?),
        _ => {
            let mut page = String::new();
            std::io::stdin().read_to_string(&mut page)?;
            Ok(page)
        }
    }
}
