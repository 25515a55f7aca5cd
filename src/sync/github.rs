//! GitHub contents API client (`GET`/`PUT /repos/{repo}/contents/{path}`).

use crate::config::{Config, Secrets};
use crate::errors::AppResult;
use crate::sync::{RemoteHost, RemoteSync, RemoteUpdate, SyncError};
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use reqwest::StatusCode;
use reqwest::blocking::{Client, RequestBuilder, Response};
use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

/// Error bodies are cut to this length before reaching the user.
pub const MAX_ERROR_BODY_LENGTH: usize = 200;

const API_VERSION: &str = "2022-11-28";

#[derive(Debug, Deserialize)]
struct ContentMeta {
    sha: String,
}

#[derive(Debug, Serialize)]
struct UpdateBody<'a> {
    message: &'a str,
    content: String,
    sha: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    branch: Option<&'a str>,
}

pub struct GitHubHost {
    client: Client,
    api_url: String,
    repo: String,
    token: SecretString,
    branch: Option<String>,
}

impl GitHubHost {
    pub fn new(
        api_url: &str,
        repo: &str,
        token: SecretString,
        branch: Option<String>,
    ) -> Result<Self, SyncError> {
        let client = Client::builder()
            .user_agent(concat!("rfleetlog/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            client,
            api_url: api_url.trim_end_matches('/').to_string(),
            repo: repo.to_string(),
            token,
            branch,
        })
    }

    pub fn contents_url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/contents/{}",
            self.api_url,
            self.repo,
            path.trim_start_matches('/')
        )
    }

    fn authorized(&self, req: RequestBuilder) -> RequestBuilder {
        req.bearer_auth(self.token.expose_secret())
            .header("Accept", "application/vnd.github+json")
            .header("X-GitHub-Api-Version", API_VERSION)
    }
}

impl RemoteHost for GitHubHost {
    fn fetch_revision(&self, path: &str) -> Result<String, SyncError> {
        let mut req = self.client.get(self.contents_url(path));
        if let Some(branch) = &self.branch {
            req = req.query(&[("ref", branch.as_str())]);
        }

        let resp = check(self.authorized(req).send()?, path)?;
        let meta: ContentMeta = resp
            .json()
            .map_err(|e| SyncError::Malformed(e.to_string()))?;
        Ok(meta.sha)
    }

    fn overwrite(&self, update: &RemoteUpdate<'_>) -> Result<(), SyncError> {
        let body = UpdateBody {
            message: &update.message,
            content: STANDARD.encode(update.content),
            sha: update.revision,
            branch: self.branch.as_deref(),
        };

        let req = self.client.put(self.contents_url(update.path)).json(&body);
        check(self.authorized(req).send()?, update.path)?;
        Ok(())
    }
}

/// Pass successful responses through, turn the rest into sync errors.
fn check(resp: Response, path: &str) -> Result<Response, SyncError> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    Err(classify(status, path, &body))
}

/// Sync error for a non-success `status` on `path`. Unknown statuses keep
/// the response body, cut to [`MAX_ERROR_BODY_LENGTH`] characters.
pub fn classify(status: StatusCode, path: &str, body: &str) -> SyncError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            SyncError::Unauthorized(status.as_u16())
        }
        StatusCode::NOT_FOUND => SyncError::NotFound(path.to_string()),
        // 422 is what GitHub answers to a stale sha.
        StatusCode::CONFLICT | StatusCode::UNPROCESSABLE_ENTITY => SyncError::Conflict,
        _ => SyncError::Status {
            status: status.as_u16(),
            body: truncate(body),
        },
    }
}

fn truncate(body: &str) -> String {
    if body.chars().count() > MAX_ERROR_BODY_LENGTH {
        let cut: String = body.chars().take(MAX_ERROR_BODY_LENGTH).collect();
        format!("{cut}... (truncated)")
    } else {
        body.to_string()
    }
}

impl RemoteSync<GitHubHost> {
    pub fn from_config(cfg: &Config, secrets: &Secrets) -> AppResult<Self> {
        let host = GitHubHost::new(
            &cfg.remote.api_url,
            &secrets.repo,
            secrets.token.clone(),
            cfg.remote.branch.clone(),
        )?;
        Ok(RemoteSync::new(
            host,
            cfg.remote.path.clone(),
            cfg.remote.commit_prefix.clone(),
            cfg.offset()?,
        ))
    }
}
