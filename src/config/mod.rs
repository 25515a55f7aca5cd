use crate::errors::{AppError, AppResult};
use crate::models::{Schema, Variant};
use crate::utils::time::parse_offset;
use chrono::FixedOffset;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Environment fallbacks for the two remote secrets.
pub const ENV_REPO: &str = "GITHUB_REPO";
pub const ENV_TOKEN: &str = "GITHUB_TOKEN";

const REDACTED: &str = "********";

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Local CSV log file.
    pub log_file: String,
    /// Column preset: `fleet` or `dispatch`.
    pub variant: Variant,
    /// Facility time zone as a fixed offset, e.g. `+05:30`.
    pub utc_offset: String,
    pub vehicles: Vec<String>,
    pub drivers: Vec<String>,
    pub purposes: Vec<String>,
    pub history_limit: usize,
    /// How long a loaded table is reused before the file is read again.
    pub cache_ttl_ms: u64,
    /// JPEG quality used when storing photos (1-100).
    pub photo_quality: u8,
    pub remote: RemoteConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteConfig {
    pub api_url: String,
    /// `owner/name`; falls back to `$GITHUB_REPO`.
    pub repo: Option<String>,
    /// Access token; falls back to `$GITHUB_TOKEN`.
    pub token: Option<String>,
    /// Path of the log file inside the repository.
    pub path: String,
    pub branch: Option<String>,
    pub commit_prefix: String,
}

impl Default for RemoteConfig {
    fn default() -> Self {
        Self {
            api_url: "https://api.github.com".to_string(),
            repo: None,
            token: None,
            path: "logistics_logs.csv".to_string(),
            branch: None,
            commit_prefix: "Logistics Sync".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_file: Self::log_file_default().to_string_lossy().to_string(),
            variant: Variant::Fleet,
            utc_offset: "+05:30".to_string(),
            vehicles: to_strings(&["Ashok Leyland", "Mahindra"]),
            drivers: to_strings(&["Brahmiah", "Driver", "Other"]),
            purposes: to_strings(&["Inter-Unit (500m)", "Pickup", "Site Delivery", "Fueling"]),
            history_limit: 15,
            cache_ttl_ms: 1000,
            photo_quality: 50,
            remote: RemoteConfig::default(),
        }
    }
}

/// The two opaque values needed to reach the remote file host.
#[derive(Debug, Clone)]
pub struct Secrets {
    pub repo: String,
    pub token: SecretString,
}

fn to_strings(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

impl Config {
    /// Return the standard configuration directory depending on the platform
    pub fn config_dir() -> PathBuf {
        if cfg!(target_os = "windows") {
            dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("rfleetlog")
        } else {
            dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".rfleetlog")
        }
    }

    pub fn config_file() -> PathBuf {
        Self::config_dir().join("rfleetlog.conf")
    }

    pub fn log_file_default() -> PathBuf {
        Self::config_dir().join("logistics_logs.csv")
    }

    /// Load the configuration.
    ///
    /// With an explicit path the file must exist. Without one, the standard
    /// config file is used when present and defaults otherwise.
    pub fn load(explicit: Option<&Path>) -> AppResult<Self> {
        let path = match explicit {
            Some(p) if !p.exists() => {
                return Err(AppError::Config(format!(
                    "config file not found: {}",
                    p.display()
                )));
            }
            Some(p) => p.to_path_buf(),
            None => Self::config_file(),
        };

        if !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Config::default());
        }

        let content = fs::read_to_string(&path)?;
        let cfg: Config = serde_yaml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "configuration loaded");
        Ok(cfg)
    }

    /// Write the configuration file and return its path.
    pub fn save(&self, path: &Path) -> AppResult<PathBuf> {
        if let Some(dir) = path.parent() {
            if !dir.as_os_str().is_empty() {
                fs::create_dir_all(dir)?;
            }
        }
        let yaml = serde_yaml::to_string(self)?;
        let mut file = fs::File::create(path)?;
        file.write_all(yaml.as_bytes())?;
        Ok(path.to_path_buf())
    }

    pub fn schema(&self) -> Schema {
        Schema::for_variant(self.variant)
    }

    pub fn offset(&self) -> AppResult<FixedOffset> {
        parse_offset(&self.utc_offset)
    }

    /// Resolve repo and token. Config values win over the environment.
    pub fn secrets(&self) -> AppResult<Secrets> {
        let repo = non_blank(self.remote.repo.clone())
            .or_else(|| non_blank(env::var(ENV_REPO).ok()))
            .ok_or(AppError::MissingSecret(ENV_REPO))?;
        let token = non_blank(self.remote.token.clone())
            .or_else(|| non_blank(env::var(ENV_TOKEN).ok()))
            .ok_or(AppError::MissingSecret(ENV_TOKEN))?;

        if !repo.contains('/') {
            return Err(AppError::Config(format!(
                "repository must be 'owner/name', got '{repo}'"
            )));
        }

        Ok(Secrets {
            repo,
            token: SecretString::from(token),
        })
    }

    /// Copy safe to print: the token is masked.
    pub fn redacted(&self) -> Config {
        let mut cfg = self.clone();
        if cfg.remote.token.is_some() {
            cfg.remote.token = Some(REDACTED.to_string());
        }
        cfg
    }
}
