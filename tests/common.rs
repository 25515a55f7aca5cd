#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use image::{ImageBuffer, ImageFormat, Rgb};
use rfleetlog::models::Record;
use rfleetlog::sync::{RemoteHost, RemoteUpdate, SyncError};
use std::cell::RefCell;
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Remote endpoint nothing listens on: pushes fail fast with a connect error.
pub const UNREACHABLE_API: &str = "http://127.0.0.1:9";

pub fn rfl() -> Command {
    cargo_bin_cmd!("rfleetlog")
}

/// Temporary workspace with a config file pointing into it.
pub struct TestEnv {
    pub dir: TempDir,
    pub config: PathBuf,
    pub log: PathBuf,
}

impl TestEnv {
    pub fn new(variant: &str) -> Self {
        Self::with_remote(variant, "  repo: acme/logistics\n  token: t0ken\n")
    }

    pub fn without_secrets(variant: &str) -> Self {
        Self::with_remote(variant, "")
    }

    fn with_remote(variant: &str, secrets: &str) -> Self {
        let dir = tempfile::tempdir().expect("tempdir");
        let log = dir.path().join("logistics_logs.csv");
        let config = dir.path().join("rfleetlog.conf");

        let yaml = format!(
            "log_file: {}\nvariant: {}\ncache_ttl_ms: 0\nremote:\n  api_url: {}\n{}",
            log.display(),
            variant,
            UNREACHABLE_API,
            secrets
        );
        fs::write(&config, yaml).expect("write config");

        Self { dir, config, log }
    }

    /// Command with `--config` already set.
    pub fn cmd(&self) -> Command {
        let mut cmd = rfl();
        cmd.env_remove("GITHUB_REPO")
            .env_remove("GITHUB_TOKEN")
            .env_remove("RUST_LOG")
            .arg("--config")
            .arg(&self.config);
        cmd
    }

    pub fn path(&self, name: &str) -> PathBuf {
        self.dir.path().join(name)
    }

    pub fn log_content(&self) -> String {
        fs::read_to_string(&self.log).unwrap_or_default()
    }
}

pub fn record(timestamp: &str, vehicle: &str, location: &str) -> Record {
    Record {
        timestamp: timestamp.to_string(),
        vehicle: vehicle.to_string(),
        driver: "Brahmiah".to_string(),
        authorized_by: "SUBODTH".to_string(),
        start_km: Some(100),
        end_km: Some(112),
        distance: Some(12),
        fuel_ltrs: Some(0.0),
        purpose: "Pickup".to_string(),
        location: location.to_string(),
        items: "CEMENT BAGS".to_string(),
        photo: String::new(),
    }
}

/// Small PNG image, 8x8, solid color.
pub fn png_bytes() -> Vec<u8> {
    let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::from_pixel(8, 8, Rgb([200, 40, 40]));
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png).expect("encode png");
    out.into_inner()
}

pub fn write_png(path: &Path) {
    fs::write(path, png_bytes()).expect("write png");
}

/// In-memory remote host recording every call.
#[derive(Default)]
pub struct FakeHost {
    pub revision: String,
    pub fail_fetch: bool,
    pub fail_overwrite: bool,
    pub fetches: RefCell<Vec<String>>,
    /// (path, message, content, revision)
    pub updates: RefCell<Vec<(String, String, Vec<u8>, String)>>,
}

impl FakeHost {
    pub fn new(revision: &str) -> Self {
        Self {
            revision: revision.to_string(),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail_fetch: true,
            ..Self::default()
        }
    }

    pub fn conflicting(revision: &str) -> Self {
        Self {
            revision: revision.to_string(),
            fail_overwrite: true,
            ..Self::default()
        }
    }
}

impl RemoteHost for FakeHost {
    fn fetch_revision(&self, path: &str) -> Result<String, SyncError> {
        self.fetches.borrow_mut().push(path.to_string());
        if self.fail_fetch {
            return Err(SyncError::Unauthorized(401));
        }
        Ok(self.revision.clone())
    }

    fn overwrite(&self, update: &RemoteUpdate<'_>) -> Result<(), SyncError> {
        if self.fail_overwrite {
            return Err(SyncError::Conflict);
        }
        self.updates.borrow_mut().push((
            update.path.to_string(),
            update.message.clone(),
            update.content.to_vec(),
            update.revision.to_string(),
        ));
        Ok(())
    }
}
