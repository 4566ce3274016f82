//! CLI configuration.
//!
//! Settings live in a single `config.toml` file at
//! `~/.config/itimeline/config.toml` by default:
//!
//! ```toml
//! [render]
//! mode = "config-vars"     # or "inline"
//! id_prefix = "itimeline"
//! end_dates = "degrade"    # or "reject-line"
//!
//! [logging]
//! level = "warn"
//! format = "compact"       # "pretty", "compact" or "json"
//! timestamps = false
//! filter = "itimeline_core::event=trace"   # optional, replaces `level`
//! ```

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::Level;

use itimeline_core::{RenderOptions, TracingConfig, TracingOutputFormat};

use crate::error::{CliError, CliResult};

/// Configuration for the itimeline command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Rendering settings.
    pub render: RenderOptions,

    /// Logging settings.
    pub logging: LoggingSettings,
}

/// Logging settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    /// Default level when RUST_LOG is unset.
    pub level: String,

    /// Output format.
    pub format: TracingOutputFormat,

    /// Prefix log lines with the time.
    pub timestamps: bool,

    /// Full filter directive; takes precedence over `level` and RUST_LOG.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
            format: TracingOutputFormat::Compact,
            timestamps: false,
            filter: None,
        }
    }
}

impl LoggingSettings {
    /// Builds the tracing configuration. `debug` forces verbose output and
    /// ignores `level` and `filter`.
    pub fn tracing_config(&self, debug: bool) -> CliResult<TracingConfig> {
        let config = if debug {
            TracingConfig::cli_debug()
        } else {
            let level: Level = self
                .level
                .parse()
                .map_err(|_| CliError::config(format!("invalid log level {:?}", self.level)))?;
            let config = TracingConfig::cli().with_level(level);
            match &self.filter {
                Some(filter) => config.with_env_filter(filter.as_str()),
                None => config,
            }
        };
        Ok(config
            .with_format(self.format)
            .with_timestamps(self.timestamps))
    }
}

impl CliConfig {
    /// Loads configuration from the default path, or defaults if it does not exist.
    pub fn load() -> CliResult<Self> {
        let path = Self::default_path();
        if path.exists() {
            Self::load_from(&path)
        } else {
            Ok(Self::default())
        }
    }

    /// Loads configuration from a specific path.
    pub fn load_from(path: &Path) -> CliResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            CliError::config(format!("failed to read {}: {}", path.display(), e))
        })?;
        Self::parse(&content)
    }

    /// Parses configuration from TOML text.
    pub fn parse(content: &str) -> CliResult<Self> {
        toml::from_str(content)
            .map_err(|e| CliError::config(format!("failed to parse config: {}", e)))
    }

    /// Returns the default configuration file path.
    pub fn default_path() -> PathBuf {
        Self::default_config_dir().join("config.toml")
    }

    /// Returns the default configuration directory.
    pub fn default_config_dir() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("itimeline")
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use itimeline_core::{EndDatePolicy, OutputMode};

    use super::*;

    #[test]
    fn empty_config_uses_defaults() {
        let config = CliConfig::parse("").unwrap();
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.render.mode, OutputMode::Inline);
        assert_eq!(config.render.id_prefix, "itimeline");
        assert_eq!(config.logging.level, "warn");
    }

    #[test]
    fn full_config() {
        let config = CliConfig::parse(
            r#"
[render]
mode = "config-vars"
id_prefix = "tl"
end_dates = "reject-line"

[logging]
level = "debug"
format = "json"
timestamps = true
"#,
        )
        .unwrap();

        assert_eq!(config.render.mode, OutputMode::ConfigVars);
        assert_eq!(config.render.id_prefix, "tl");
        assert_eq!(config.render.end_dates, EndDatePolicy::RejectLine);
        assert_eq!(config.logging.format, TracingOutputFormat::Json);

        let tracing = config.logging.tracing_config(false).unwrap();
        assert_eq!(tracing.default_level, Level::DEBUG);
        assert_eq!(tracing.output_format, TracingOutputFormat::Json);
        assert!(tracing.include_timestamp);
        assert_eq!(tracing.env_filter, None);
    }

    #[test]
    fn logging_filter_reaches_tracing() {
        let config = CliConfig::parse(
            "[logging]\nfilter = \"itimeline_core::options=debug\"\n",
        )
        .unwrap();

        let tracing = config.logging.tracing_config(false).unwrap();
        assert_eq!(tracing.env_filter.as_deref(), Some("itimeline_core::options=debug"));
        assert!(!tracing.include_timestamp);

        let debug = config.logging.tracing_config(true).unwrap();
        assert_eq!(debug.env_filter, None);
        assert_eq!(debug.default_level, Level::DEBUG);
    }

    #[test]
    fn unknown_mode_is_a_config_error() {
        let err = CliConfig::parse("[render]\nmode = \"sideways\"\n").unwrap_err();
        assert!(matches!(err, CliError::Config { .. }));
    }

    #[test]
    fn invalid_log_level_is_reported() {
        let settings = LoggingSettings {
            level: "chatty".to_string(),
            ..Default::default()
        };
        assert!(settings.tracing_config(false).is_err());
        assert!(settings.tracing_config(true).is_ok());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[render]\nid_prefix = \"timeline\"").unwrap();

        let config = CliConfig::load_from(file.path()).unwrap();
        assert_eq!(config.render.id_prefix, "timeline");
        assert_eq!(config.render.mode, OutputMode::Inline);
    }

    #[test]
    fn load_from_missing_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let err = CliConfig::load_from(&dir.path().join("nope.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }

    #[test]
    fn default_path_is_under_itimeline_dir() {
        let path = CliConfig::default_path();
        assert!(path.ends_with("itimeline/config.toml"));
    }
}
