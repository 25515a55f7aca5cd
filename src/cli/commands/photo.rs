use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::photo::{PhotoViewer, decode_photo};
use crate::errors::AppResult;
use crate::store::LogStore;
use crate::ui::messages::{header, info, success};
use std::fs;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Photo { list, select, out } = cmd {
        cfg.secrets()?;

        let table = LogStore::from_config(cfg).load();
        let viewer = PhotoViewer::new(&table);

        if viewer.is_empty() {
            info("No photos logged yet.");
            return Ok(());
        }

        if *list || select.is_none() {
            header(format!("Photos ({})", viewer.len()));
            for (i, label) in viewer.labels().iter().enumerate() {
                println!("{:>3}. {}", i + 1, label);
            }
        }

        if let (Some(selector), Some(path)) = (select, out) {
            let record = viewer.select(selector)?;
            let bytes = decode_photo(record)?;
            fs::write(path, &bytes)?;
            success(format!("Photo of {} written to {}", record.label(), path.display()));
        }
    }

    Ok(())
}
