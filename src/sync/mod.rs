//! Remote mirror of the log file.
//!
//! Every push uploads the whole table and replaces the remote file. The
//! write is keyed by the remote revision token read just before, so a
//! concurrent writer makes the push fail instead of being silently lost.

pub mod github;

pub use github::GitHubHost;

use crate::errors::AppResult;
use crate::models::Table;
use crate::store::codec;
use crate::ui::messages;
use crate::utils::time::{commit_stamp, now_at};
use chrono::FixedOffset;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SyncError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote file '{0}' not found")]
    NotFound(String),

    #[error("access denied by the remote host (HTTP {0})")]
    Unauthorized(u16),

    #[error("revision conflict: the remote file changed since it was read")]
    Conflict,

    #[error("unexpected response (HTTP {status}): {body}")]
    Status { status: u16, body: String },

    #[error("malformed response: {0}")]
    Malformed(String),
}

/// One full-content replacement of a remote file.
#[derive(Debug)]
pub struct RemoteUpdate<'a> {
    pub path: &'a str,
    pub message: String,
    pub content: &'a [u8],
    /// Revision the update is based on; the host refuses stale ones.
    pub revision: &'a str,
}

/// A version-controlled file host.
pub trait RemoteHost {
    /// Current revision token of the file at `path`.
    fn fetch_revision(&self, path: &str) -> Result<String, SyncError>;

    fn overwrite(&self, update: &RemoteUpdate<'_>) -> Result<(), SyncError>;
}

pub struct RemoteSync<H: RemoteHost> {
    host: H,
    remote_path: String,
    commit_prefix: String,
    offset: FixedOffset,
}

impl<H: RemoteHost> RemoteSync<H> {
    pub fn new(
        host: H,
        remote_path: impl Into<String>,
        commit_prefix: impl Into<String>,
        offset: FixedOffset,
    ) -> Self {
        Self {
            host,
            remote_path: remote_path.into(),
            commit_prefix: commit_prefix.into(),
            offset,
        }
    }

    /// The underlying host, for inspecting what was uploaded.
    pub fn host(&self) -> &H {
        &self.host
    }

    fn commit_message(&self) -> String {
        format!("{} {}", self.commit_prefix, commit_stamp(now_at(self.offset)))
    }

    /// Upload the full table, replacing the remote file.
    pub fn try_push(&self, table: &Table) -> AppResult<()> {
        let content = codec::to_csv_bytes(table)?;
        let revision = self.host.fetch_revision(&self.remote_path)?;
        tracing::debug!(path = %self.remote_path, %revision, "remote revision fetched");

        let update = RemoteUpdate {
            path: &self.remote_path,
            message: self.commit_message(),
            content: &content,
            revision: &revision,
        };
        self.host.overwrite(&update)?;

        tracing::info!(path = %self.remote_path, rows = table.len(), "remote log replaced");
        Ok(())
    }

    /// Like [`try_push`](Self::try_push) but reports the failure to the user
    /// and returns `false` instead of an error. No retry is attempted.
    pub fn push(&self, table: &Table) -> bool {
        match self.try_push(table) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!(path = %self.remote_path, error = %e, "remote push failed");
                messages::error(&e);
                false
            }
        }
    }
}
