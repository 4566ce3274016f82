//! Configuration commands.
//!
//! Both take the file actually in use: `--config` / `ITIMELINE_CONFIG` when
//! given, the default path otherwise.

use std::path::Path;

use crate::config::CliConfig;
use crate::error::{CliError, CliResult};

/// Returns the effective configuration as TOML.
pub fn dump(config: &CliConfig, source: &Path) -> CliResult<String> {
    let toml_str = toml::to_string_pretty(config)
        .map_err(|e| CliError::config(format!("failed to serialize config: {}", e)))?;
    Ok(format!(
        "# config.toml ({})\n{}",
        source.display(),
        toml_str
    ))
}

/// Returns the configuration file path.
pub fn path(source: &Path) -> String {
    format!("config: {}\n", source.display())
}
