use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::history::history_table;
use crate::errors::AppResult;
use crate::store::LogStore;
use crate::ui::messages::{header, info};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::History { limit } = cmd {
        cfg.secrets()?;

        let table = LogStore::from_config(cfg).load();
        if table.is_empty() {
            info("No movement logs found yet.");
            return Ok(());
        }

        header("Recent Movement History");
        print!("{}", history_table(&table, limit.unwrap_or(cfg.history_limit)).render());
    }

    Ok(())
}
