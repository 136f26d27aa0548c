use std::io;
use std::path::Path;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::EnvFilter;

use ptm_cli::commands::matching::{self, MatchOptions};
use ptm_cli::commands::parse;
use ptm_cli::{Cli, Commands, Config};

fn load_config(config_path: Option<&Path>) -> Result<Config> {
    let config = Config::load_from(config_path).context("failed to load configuration")?;
    tracing::debug!(?config, "loaded configuration");
    Ok(config)
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize tracing with verbose flag support
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::from_default_env()
    };
    // Use try_init to avoid panic if tracing is already initialized (e.g., in tests)
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .try_init();

    match cli.command {
        Some(Commands::Match {
            trainers,
            clients,
            output,
            top,
            json,
        }) => {
            let config = load_config(cli.config.as_deref())?;
            let options = MatchOptions {
                trainers_path: trainers.unwrap_or_else(|| config.trainers_path.clone()),
                clients_path: clients.unwrap_or_else(|| config.clients_path.clone()),
                output_path: output.unwrap_or_else(|| config.output_path.clone()),
                top_n: top.unwrap_or(config.top_n),
                json,
                matching: config.match_config(),
            };
            matching::run(&mut io::stdout().lock(), &options)?;
        }
        Some(Commands::Parse { text }) => {
            parse::run(&mut io::stdout().lock(), &text)?;
        }
        None => {
            // No subcommand, show help
            use clap::CommandFactory;
            Cli::command().print_help()?;
            println!();
        }
    }

    Ok(())
}
