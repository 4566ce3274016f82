//! Tracing setup for itimeline.
//!
//! The library only emits events; installing a subscriber is left to the
//! binary (or the host embedding the library). This module provides the
//! subscriber setup shared by the `itimeline` command.
//!
//! # Usage
//!
//! ```ignore
//! use itimeline_core::tracing::{init_tracing, TracingConfig};
//!
//! init_tracing(TracingConfig::cli())?;
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{Level, Subscriber};
use tracing_subscriber::{EnvFilter, Layer, fmt, prelude::*, registry::LookupSpan};

/// Errors that can occur during tracing initialization
#[derive(Debug, Error)]
pub enum TracingError {
    /// Failed to set global subscriber
    #[error("failed to set global tracing subscriber: {0}")]
    SetGlobalSubscriber(#[from] tracing::subscriber::SetGlobalDefaultError),

    /// Failed to parse env filter directive
    #[error("failed to parse env filter: {0}")]
    EnvFilter(#[from] tracing_subscriber::filter::ParseError),
}

/// Log line format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TracingOutputFormat {
    /// Multi-line, for reading by hand
    Pretty,
    #[default]
    Compact,
    /// One JSON object per line
    Json,
}

/// How the `itimeline` command reports what it drops.
#[derive(Debug, Clone)]
pub struct TracingConfig {
    /// Level for itimeline targets when neither `env_filter` nor RUST_LOG is set
    pub default_level: Level,
    pub output_format: TracingOutputFormat,
    /// Source file and line of each event
    pub include_location: bool,
    /// Module path of each event
    pub include_target: bool,
    pub include_timestamp: bool,
    /// Full filter directive, e.g. `itimeline_core::event=trace`
    pub env_filter: Option<String>,
}

impl Default for TracingConfig {
    fn default() -> Self {
        Self::cli()
    }
}

impl TracingConfig {
    /// Quiet single-line output on stderr: only warnings unless RUST_LOG says otherwise.
    #[must_use]
    pub fn cli() -> Self {
        Self {
            default_level: Level::WARN,
            output_format: TracingOutputFormat::Compact,
            include_location: false,
            include_target: false,
            include_timestamp: false,
            env_filter: None,
        }
    }

    /// Verbose output for `--debug`, with source locations.
    #[must_use]
    pub fn cli_debug() -> Self {
        Self {
            default_level: Level::DEBUG,
            include_location: true,
            include_target: true,
            ..Self::cli()
        }
    }

    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.default_level = level;
        self
    }

    #[must_use]
    pub fn with_format(mut self, format: TracingOutputFormat) -> Self {
        self.output_format = format;
        self
    }

    #[must_use]
    pub fn with_timestamps(mut self, enabled: bool) -> Self {
        self.include_timestamp = enabled;
        self
    }

    /// Use `filter` instead of the level-based default directive.
    #[must_use]
    pub fn with_env_filter(mut self, filter: impl Into<String>) -> Self {
        self.env_filter = Some(filter.into());
        self
    }

    /// The filter directive used when neither `env_filter` nor RUST_LOG is set.
    pub fn default_directive(&self) -> String {
        format!("itimeline={}", self.default_level)
    }

    fn filter(&self) -> Result<EnvFilter, TracingError> {
        match &self.env_filter {
            Some(filter) => Ok(EnvFilter::try_new(filter)?),
            None => Ok(EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(self.default_directive()))),
        }
    }

    fn fmt_layer<S>(&self) -> Box<dyn Layer<S> + Send + Sync>
    where
        S: Subscriber + for<'a> LookupSpan<'a>,
    {
        let layer = fmt::layer()
            .with_writer(std::io::stderr)
            .with_file(self.include_location)
            .with_line_number(self.include_location)
            .with_target(self.include_target);

        match (self.output_format, self.include_timestamp) {
            (TracingOutputFormat::Pretty, true) => layer.pretty().boxed(),
            (TracingOutputFormat::Pretty, false) => layer.pretty().without_time().boxed(),
            (TracingOutputFormat::Compact, true) => layer.compact().boxed(),
            (TracingOutputFormat::Compact, false) => layer.compact().without_time().boxed(),
            (TracingOutputFormat::Json, true) => layer.json().boxed(),
            (TracingOutputFormat::Json, false) => layer.json().without_time().boxed(),
        }
    }
}

/// Installs the global subscriber described by `config`.
///
/// Logs go to stderr so rendered pages on stdout stay clean.
///
/// # Errors
///
/// Fails if a global subscriber is already set or the filter directive does
/// not parse.
pub fn init_tracing(config: TracingConfig) -> Result<(), TracingError> {
    let subscriber = tracing_subscriber::registry()
        .with(config.filter()?)
        .with(config.fmt_layer());
    tracing::subscriber::set_global_default(subscriber)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_quiet_cli() {
        let config = TracingConfig::default();
        assert_eq!(config.default_level, Level::WARN);
        assert_eq!(config.output_format, TracingOutputFormat::Compact);
        assert!(!config.include_timestamp);
        assert!(config.env_filter.is_none());
        assert_eq!(config.default_directive(), "itimeline=WARN");
    }

    #[test]
    fn cli_debug_adds_locations() {
        let config = TracingConfig::cli_debug();
        assert_eq!(config.default_level, Level::DEBUG);
        assert!(config.include_location);
        assert!(config.include_target);
    }

    #[test]
    fn explicit_filter_is_used() {
        let config = TracingConfig::cli()
            .with_format(TracingOutputFormat::Json)
            .with_timestamps(true)
            .with_env_filter("itimeline_core::event=trace");

        assert_eq!(config.output_format, TracingOutputFormat::Json);
        assert!(config.include_timestamp);
        assert_eq!(config.env_filter.as_deref(), Some("itimeline_core::event=trace"));
        assert!(config.filter().is_ok());
    }

    #[test]
    fn bad_filter_is_an_error() {
        let config = TracingConfig::cli().with_env_filter("itimeline=loud");
        assert!(matches!(config.filter(), Err(TracingError::EnvFilter(_))));
    }
}
