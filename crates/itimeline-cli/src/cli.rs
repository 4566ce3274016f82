//! Command-line interface definition.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

use itimeline_core::{EndDatePolicy, OutputMode, RenderOptions};

/// itimeline - render <itimeline> tags in wiki pages
#[derive(Debug, Parser)]
#[command(name = "itimeline")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(long, short, env = "ITIMELINE_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Enable debug output
    #[arg(long, short = 'v', global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Replace every <itimeline> tag in a page with its markup
    Render {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        render: RenderArgs,

        /// Print one JSON object with the page and its config blobs
        #[arg(long)]
        json: bool,
    },

    /// Report options and event lines that would be dropped
    Check {
        #[command(flatten)]
        input: InputArgs,

        #[command(flatten)]
        render: RenderArgs,
    },

    /// List the recognized tag options
    Options,

    /// List the supported locales
    Locales,

    /// Configuration commands
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

/// Page input.
#[derive(Debug, Clone, Args)]
pub struct InputArgs {
    /// Page file to read; `-` or nothing reads stdin
    pub file: Option<PathBuf>,
}

/// Overrides for the `[render]` config section.
#[derive(Debug, Clone, Default, Args)]
pub struct RenderArgs {
    /// Where the timeline data is written
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// Prefix for element ids
    #[arg(long)]
    pub prefix: Option<String>,

    /// Drop event lines whose end date does not parse
    #[arg(long)]
    pub strict_end_dates: bool,
}

impl RenderArgs {
    /// Applies these flags on top of configured render options.
    pub fn apply(&self, mut options: RenderOptions) -> RenderOptions {
        if let Some(mode) = self.mode {
            options.mode = mode.into();
        }
        if let Some(ref prefix) = self.prefix {
            options.id_prefix = prefix.clone();
        }
        if self.strict_end_dates {
            options.end_dates = EndDatePolicy::RejectLine;
        }
        options
    }
}

/// Output mode flag values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// Events and options as child elements
    Inline,
    /// Empty container plus page config keyed by element id
    ConfigVars,
}

impl From<ModeArg> for OutputMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Inline => OutputMode::Inline,
            ModeArg::ConfigVars => OutputMode::ConfigVars,
        }
    }
}

/// Configuration actions.
#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Dump current configuration
    Dump,

    /// Show configuration file path
    Path,
}
