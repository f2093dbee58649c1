//! docdex - static search-index generator and loader for Markdown docs.

mod build;
mod check;
mod cli;
mod config;
mod generator;
mod index;
mod init;
mod logger;
mod search;
mod source;
mod utils;

use anyhow::{Result, bail};
use build::build_index;
use check::check_index;
use clap::Parser;
use cli::{Cli, Commands};
use config::SiteConfig;
use init::new_project;
use search::search_index;
use std::process::ExitCode;

fn main() -> ExitCode {
    match run() {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            log!("error"; "{err:#}");
            ExitCode::FAILURE
        }
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;

    match &cli.command {
        Commands::Init { name } => new_project(&config, name.is_some()),
        Commands::Build { .. } => build_index(&config).map(|_| ()),
        Commands::Check { file } => check_index(&config, file.as_deref()).map(|_| ()),
        Commands::Search { query, file, .. } => {
            search_index(&config, query, file.as_deref()).map(|_| ())
        }
    }
}

/// Load and validate configuration from CLI arguments
fn load_config(cli: &Cli) -> Result<SiteConfig> {
    let root = cli.root.clone().unwrap_or_else(|| "./".into());
    let config_path = root.join(&cli.config);

    let mut config = if config_path.exists() && !cli.is_init() {
        SiteConfig::from_path(&config_path)?
    } else {
        SiteConfig::default()
    };
    config.update_with_cli(cli);

    let config_exists = config.config_path.exists();
    match (cli.is_init(), config_exists) {
        (true, true) => {
            bail!("Config file already exists. Remove it manually or init in a different path.")
        }
        (false, false) => log!("config"; "no {} found, using defaults", cli.config.display()),
        _ => {}
    }

    config.validate()?;
    if cli.is_build() {
        config.validate_sources()?;
    }

    Ok(config)
}
