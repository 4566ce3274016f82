//! itimeline CLI entry point.

use std::process::ExitCode;

use clap::Parser;

use itimeline_cli::cli::{Cli, Command, ConfigAction};
use itimeline_cli::commands::{self, check, registry, render};
use itimeline_cli::config::CliConfig;
use itimeline_cli::error::{CliError, CliResult};

fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run(cli: Cli) -> CliResult<()> {
    // Load configuration
    let config = if let Some(ref path) = cli.config {
        CliConfig::load_from(path)?
    } else {
        CliConfig::load()?
    };
    let config_path = cli.config.clone().unwrap_or_else(CliConfig::default_path);

    // Initialize tracing
    itimeline_core::init_tracing(config.logging.tracing_config(cli.debug)?)?;

    match cli.command {
        Command::Render {
            input,
            render: args,
            json,
        } => {
            let page = commands::read_input(input.file.as_deref())?;
            let options = args.apply(config.render);
            print!("{}", render::render(&page, options, json)?);
            Ok(())
        }
        Command::Check {
            input,
            render: args,
        } => {
            let page = commands::read_input(input.file.as_deref())?;
            let report = check::check(&page, args.apply(config.render));
            print!("{}", report.text);
            if report.problems > 0 {
                return Err(CliError::Rejected {
                    count: report.problems,
                });
            }
            Ok(())
        }
        Command::Options => {
            print!("{}", registry::options());
            Ok(())
        }
        Command::Locales => {
            print!("{}", registry::locales());
            Ok(())
        }
        Command::Config { action } => {
            match action {
                ConfigAction::Dump => {
                    print!("{}", commands::config::dump(&config, &config_path)?)
                }
                ConfigAction::Path => print!("{}", commands::config::path(&config_path)),
            }
            Ok(())
        }
    }
}
