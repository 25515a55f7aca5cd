use crate::cli::parser::Cli;
use crate::config::Config;
use crate::errors::AppResult;
use crate::models::Table;
use crate::store::LogStore;
use crate::ui::messages::{info, success};

/// Write the configuration file (unless in test mode or already present) and
/// create an empty log file with the header row.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let config_path = cli.config.clone().unwrap_or_else(Config::config_file);

    if cli.test {
        info("Test mode: configuration file not written");
    } else if config_path.exists() {
        info(format!("Config file: {} (kept)", config_path.display()));
    } else {
        let written = cfg.save(&config_path)?;
        success(format!("Config file: {}", written.display()));
    }

    let store = LogStore::from_config(cfg);
    if store.path().exists() {
        info(format!("Log file:    {} (kept)", store.path().display()));
    } else {
        store.persist_local(&Table::empty(cfg.schema()))?;
        success(format!("Log file:    {}", store.path().display()));
    }

    Ok(())
}
