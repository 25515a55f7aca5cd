//! Local log store: the table of records mirrored to one CSV file.

pub mod codec;

use crate::config::Config;
use crate::errors::{AppError, AppResult};
use crate::models::{Record, Schema, Table};
use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

pub struct LogStore {
    path: PathBuf,
    schema: Schema,
    cache_ttl: Duration,
    cache: RefCell<Option<(Instant, Table)>>,
}

impl LogStore {
    pub fn new(path: impl Into<PathBuf>, schema: Schema, cache_ttl: Duration) -> Self {
        Self {
            path: path.into(),
            schema,
            cache_ttl,
            cache: RefCell::new(None),
        }
    }

    pub fn from_config(cfg: &Config) -> Self {
        Self::new(
            &cfg.log_file,
            cfg.schema(),
            Duration::from_millis(cfg.cache_ttl_ms),
        )
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn schema(&self) -> &Schema {
        &self.schema
    }

    /// Current table. A missing, unreadable or malformed file yields an
    /// empty table with the schema's columns; this never fails.
    pub fn load(&self) -> Table {
        if let Some((at, table)) = self.cache.borrow().as_ref() {
            if at.elapsed() < self.cache_ttl {
                tracing::trace!("log table served from cache");
                return table.clone();
            }
        }

        let table = self.read_file();
        if !self.cache_ttl.is_zero() {
            *self.cache.borrow_mut() = Some((Instant::now(), table.clone()));
        }
        table
    }

    fn read_file(&self) -> Table {
        if !self.path.exists() {
            tracing::debug!(path = %self.path.display(), "log file absent, starting empty");
            return Table::empty(self.schema.clone());
        }

        match fs::File::open(&self.path)
            .map_err(AppError::from)
            .and_then(|f| codec::read_table(f, &self.schema))
        {
            Ok(table) => {
                tracing::debug!(path = %self.path.display(), rows = table.len(), "log file loaded");
                table
            }
            Err(e) => {
                tracing::warn!(path = %self.path.display(), error = %e, "log file unreadable, treating as empty");
                Table::empty(self.schema.clone())
            }
        }
    }

    /// New table with `record` appended; `table` itself is left untouched.
    pub fn append(table: &Table, record: Record) -> Table {
        table.appended(record)
    }

    /// Overwrite the local file with the full table.
    pub fn persist_local(&self, table: &Table) -> AppResult<()> {
        if let Some(dir) = self.path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }

        let bytes = codec::to_csv_bytes(table)?;
        fs::write(&self.path, bytes)?;
        self.invalidate();

        tracing::info!(path = %self.path.display(), rows = table.len(), "log file written");
        Ok(())
    }

    pub fn invalidate(&self) {
        self.cache.borrow_mut().take();
    }
}
