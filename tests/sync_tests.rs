mod common;
use chrono::FixedOffset;
use common::{FakeHost, UNREACHABLE_API, png_bytes, record};
use rfleetlog::config::Config;
use rfleetlog::core::form::{Form, FormInput};
use rfleetlog::core::submit::SubmitLogic;
use rfleetlog::errors::AppError;
use rfleetlog::models::{Schema, Table};
use rfleetlog::store::{LogStore, codec};
use rfleetlog::sync::github::{MAX_ERROR_BODY_LENGTH, classify};
use rfleetlog::sync::{GitHubHost, RemoteSync, SyncError};
use reqwest::StatusCode;
use secrecy::SecretString;
use std::fs;
use std::time::Duration;

fn ist() -> FixedOffset {
    FixedOffset::east_opt(5 * 3600 + 30 * 60).unwrap()
}

fn sync_with(host: FakeHost) -> RemoteSync<FakeHost> {
    RemoteSync::new(host, "logistics_logs.csv", "Logistics Sync", ist())
}

fn input() -> FormInput {
    FormInput {
        vehicle: "Mahindra".to_string(),
        driver: Some("Other".to_string()),
        purpose: "Fueling".to_string(),
        start_km: 10,
        end_km: 25,
        fuel_ltrs: 20.0,
        authorized_by: "subodth".to_string(),
        location: "unit 2".to_string(),
        items: String::new(),
        photo: None,
    }
}

fn seeded_store(dir: &tempfile::TempDir) -> LogStore {
    let store = LogStore::new(dir.path().join("logs.csv"), Schema::fleet(), Duration::ZERO);
    store
        .persist_local(&Table::with_records(
            Schema::fleet(),
            vec![record("2025-01-01 09:00", "Ashok Leyland", "UNIT 1")],
        ))
        .unwrap();
    store
}

#[test]
fn test_push_uploads_full_table_with_revision() {
    let table = Table::with_records(
        Schema::fleet(),
        vec![
            record("2025-01-01 09:00", "Ashok Leyland", "UNIT 1"),
            record("2025-01-01 10:00", "Mahindra", "UNIT 2"),
        ],
    );
    let sync = sync_with(FakeHost::new("abc123"));

    assert!(sync.push(&table));

    let updates = sync.host().updates.borrow();
    assert_eq!(updates.len(), 1);
    let (path, message, content, revision) = &updates[0];
    assert_eq!(path, "logistics_logs.csv");
    assert_eq!(revision, "abc123");
    assert!(message.starts_with("Logistics Sync "));
    assert!(message.ends_with("+05:30"));
    assert_eq!(content, &codec::to_csv_bytes(&table).unwrap());
    assert_eq!(*sync.host().fetches.borrow(), vec!["logistics_logs.csv"]);
}

#[test]
fn test_push_failure_returns_false() {
    let table = Table::empty(Schema::fleet());

    assert!(!sync_with(FakeHost::failing()).push(&table));

    let conflicting = sync_with(FakeHost::conflicting("old"));
    let err = conflicting.try_push(&table).unwrap_err();
    assert!(matches!(err, AppError::Sync(_)));
    assert!(err.to_string().contains("revision conflict"));
}

#[test]
fn test_submit_appends_persists_and_syncs() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);
    let sync = sync_with(FakeHost::new("rev1"));
    let form = Form::from_config(&Config::default());

    let outcome = SubmitLogic::apply(
        &store,
        &sync,
        &form,
        &input(),
        "2025-01-02 08:30".to_string(),
    )
    .unwrap();

    assert!(outcome.synced);
    assert_eq!(outcome.rows, 2);

    let table = store.load();
    assert_eq!(table.len(), 2);
    let last = table.last().unwrap();
    assert_eq!(last, &outcome.record);
    assert_eq!(last.location, "UNIT 2");
    assert_eq!(last.distance, Some(15));

    let updates = sync.host().updates.borrow();
    assert_eq!(updates[0].2, fs::read(store.path()).unwrap());
}

#[test]
fn test_rejected_submit_changes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);
    let before = fs::read(store.path()).unwrap();
    let sync = sync_with(FakeHost::new("rev1"));
    let form = Form::from_config(&Config::default());

    let bad = FormInput {
        start_km: 10,
        end_km: 5,
        ..input()
    };
    let err = SubmitLogic::apply(&store, &sync, &form, &bad, "2025-01-02 08:30".to_string())
        .unwrap_err();

    assert!(err.is_validation());
    assert_eq!(fs::read(store.path()).unwrap(), before);
    assert!(sync.host().fetches.borrow().is_empty());
}

#[test]
fn test_failed_push_keeps_local_file() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);
    let sync = sync_with(FakeHost::failing());
    let form = Form::from_config(&Config::default());

    let with_photo = FormInput {
        photo: Some(png_bytes()),
        ..input()
    };
    let outcome = SubmitLogic::apply(
        &store,
        &sync,
        &form,
        &with_photo,
        "2025-01-02 08:30".to_string(),
    )
    .unwrap();

    assert!(!outcome.synced);
    let table = store.load();
    assert_eq!(table.len(), 2);
    assert!(table.last().unwrap().has_photo());
}

#[test]
fn test_github_contents_url() {
    let host = GitHubHost::new(
        "https://api.github.com/",
        "acme/logistics",
        SecretString::from("t0ken".to_string()),
        None,
    )
    .unwrap();

    assert_eq!(
        host.contents_url("/data/logistics_logs.csv"),
        "https://api.github.com/repos/acme/logistics/contents/data/logistics_logs.csv"
    );
}

#[test]
fn test_unreachable_github_push_fails_cleanly() {
    let host = GitHubHost::new(
        UNREACHABLE_API,
        "acme/logistics",
        SecretString::from("t0ken".to_string()),
        Some("main".to_string()),
    )
    .unwrap();
    let sync = RemoteSync::new(host, "logistics_logs.csv", "Logistics Sync", ist());

    let err = sync.try_push(&Table::empty(Schema::fleet())).unwrap_err();
    assert!(err.to_string().starts_with("Remote sync error: HTTP error"));
    assert!(!sync.push(&Table::empty(Schema::fleet())));
}

#[test]
fn test_github_status_mapping() {
    let path = "logistics_logs.csv";

    assert!(matches!(
        classify(StatusCode::UNPROCESSABLE_ENTITY, path, ""),
        SyncError::Conflict
    ));
    assert!(matches!(
        classify(StatusCode::CONFLICT, path, ""),
        SyncError::Conflict
    ));
    assert!(matches!(
        classify(StatusCode::NOT_FOUND, path, ""),
        SyncError::NotFound(p) if p == path
    ));
    assert!(matches!(
        classify(StatusCode::UNAUTHORIZED, path, ""),
        SyncError::Unauthorized(401)
    ));
    assert!(matches!(
        classify(StatusCode::FORBIDDEN, path, ""),
        SyncError::Unauthorized(403)
    ));
    match classify(StatusCode::BAD_GATEWAY, path, "upstream down") {
        SyncError::Status { status, body } => {
            assert_eq!(status, 502);
            assert_eq!(body, "upstream down");
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_github_error_body_truncated_on_char_boundary() {
    let body = "é".repeat(MAX_ERROR_BODY_LENGTH + 50);

    match classify(StatusCode::INTERNAL_SERVER_ERROR, "x.csv", &body) {
        SyncError::Status { body, .. } => {
            assert!(body.ends_with("... (truncated)"));
            let kept = body.trim_end_matches("... (truncated)");
            assert_eq!(kept.chars().count(), MAX_ERROR_BODY_LENGTH);
            assert!(kept.chars().all(|c| c == 'é'));
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[test]
fn test_submit_after_non_utf8_edit_keeps_history() {
    let dir = tempfile::tempdir().unwrap();
    let store = seeded_store(&dir);
    let mut bytes = fs::read(store.path()).unwrap();
    let at = bytes.windows(6).position(|w| w == b"UNIT 1").unwrap();
    bytes[at] = 0xC9;
    fs::write(store.path(), bytes).unwrap();

    let sync = sync_with(FakeHost::new("rev1"));
    let form = Form::from_config(&Config::default());
    let outcome = SubmitLogic::apply(
        &store,
        &sync,
        &form,
        &input(),
        "2025-01-02 08:30".to_string(),
    )
    .unwrap();

    assert_eq!(outcome.rows, 2);
    assert_eq!(store.load().len(), 2);
}
