//! One form submission: load → validate → append → persist locally → push.

use crate::core::form::{Form, FormInput};
use crate::errors::AppResult;
use crate::models::Record;
use crate::store::LogStore;
use crate::sync::{RemoteHost, RemoteSync};

#[derive(Debug)]
pub struct SubmitOutcome {
    pub record: Record,
    /// Table length after the append.
    pub rows: usize,
    /// False when the remote mirror could not be updated; the local file
    /// already holds the record either way.
    pub synced: bool,
}

pub struct SubmitLogic;

impl SubmitLogic {
    pub fn apply<H: RemoteHost>(
        store: &LogStore,
        sync: &RemoteSync<H>,
        form: &Form,
        input: &FormInput,
        timestamp: String,
    ) -> AppResult<SubmitOutcome> {
        let table = store.load();
        let record = form.build(input, timestamp)?;

        let updated = LogStore::append(&table, record.clone());
        store.persist_local(&updated)?;

        let synced = sync.push(&updated);
        if !synced {
            tracing::warn!(
                path = %store.path().display(),
                "local log updated but remote mirror is behind"
            );
        }

        Ok(SubmitOutcome {
            record,
            rows: updated.len(),
            synced,
        })
    }
}
