//! rfleetlog library root.
//! Exposes the CLI parser, the high-level run() function and the log store /
//! remote sync components.

pub mod cli;
pub mod config;
pub mod core;
pub mod errors;
pub mod logging;
pub mod models;
pub mod store;
pub mod sync;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => cli::commands::init::handle(cli, cfg),
        Commands::Config { .. } => cli::commands::config::handle(cli, cfg),
        Commands::Submit { .. } => cli::commands::submit::handle(&cli.command, cfg),
        Commands::History { .. } => cli::commands::history::handle(&cli.command, cfg),
        Commands::Photo { .. } => cli::commands::photo::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    // `init` may target a config file that does not exist yet.
    let mut cfg = match (&cli.command, cli.config.as_deref()) {
        (Commands::Init, Some(path)) if !path.exists() => Config::default(),
        (_, explicit) => Config::load(explicit)?,
    };

    if let Some(file) = &cli.file {
        cfg.log_file = file.clone();
    }

    dispatch(&cli, &cfg)
}
