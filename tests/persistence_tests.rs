mod common;

use std::fs;

use common::{day, reopen_at, store_at};
use session_ledger::{
    errors::LedgerError,
    ledger::{Document, PaymentStatus},
    storage::{JsonStorage, StorageBackend},
};
use tempfile::TempDir;

#[test]
fn document_round_trips_through_the_file() {
    let (store, data_file) = store_at(day(2024, 3, 4));
    store.add_week(day(2024, 3, 4)).unwrap();
    store
        .add_session("week1", day(2024, 3, 5), 1, PaymentStatus::Paid, "algebra")
        .unwrap();

    let reopened = reopen_at(&data_file, day(2024, 3, 4));
    let weeks = reopened.weeks().unwrap();
    assert_eq!(weeks.len(), 1);
    assert_eq!(weeks[0].sessions[0].notes, "algebra");
    assert_eq!(weeks[0].total_paid_amount, 120.0);
}

#[test]
fn wire_format_uses_the_documented_field_names() {
    let (store, data_file) = store_at(day(2024, 3, 4));
    store.add_week(day(2024, 3, 4)).unwrap();
    store
        .add_session("week1", day(2024, 3, 5), 1, PaymentStatus::NotPaid, "")
        .unwrap();

    let raw = fs::read_to_string(&data_file).unwrap();
    let value: serde_json::Value = serde_json::from_str(&raw).unwrap();
    let week = &value["weeks"][0];
    assert_eq!(week["week_name"], "week1");
    assert_eq!(week["week_start_date"], "2024-03-04");
    assert_eq!(week["week_end_date"], "2024-03-09");
    assert_eq!(week["amount_per_week"], 600.0);
    assert_eq!(week["normal_number_of_sessions_per_week"], 5);
    assert_eq!(week["status"], "Not Closed");
    let session = &week["sessions"][0];
    assert_eq!(session["session_date"], "2024-03-05");
    assert_eq!(session["payment_status"], "Not Paid");
    assert_eq!(session["session_paid_amount"], 0.0);
    assert_eq!(session["session_outstanding_amount"], 120.0);
}

#[test]
fn missing_file_loads_as_empty_document() {
    let dir = TempDir::new().unwrap();
    let storage = JsonStorage::new(dir.path().join("ledger.json")).unwrap();
    let document = storage.load().unwrap();
    assert!(document.weeks.is_empty());
}

#[test]
fn malformed_file_is_reported_as_such() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");
    fs::write(&path, "{\"weeks\": [{\"week_name\": 42}]}").unwrap();
    let storage = JsonStorage::new(path).unwrap();
    assert!(matches!(storage.load(), Err(LedgerError::Malformed(_))));
}

#[test]
fn save_does_not_leave_a_temp_file_behind() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");
    let storage = JsonStorage::new(path.clone()).unwrap();
    storage.save(&Document::default()).unwrap();
    assert!(path.exists());
    assert!(!path.with_extension("json.tmp").exists());
}

#[test]
fn failed_mutation_leaves_the_file_unchanged() {
    let (store, data_file) = store_at(day(2024, 3, 4));
    store.add_week(day(2024, 3, 4)).unwrap();
    let before = fs::read_to_string(&data_file).unwrap();

    assert!(store
        .add_session("week9", day(2024, 3, 4), 1, PaymentStatus::Paid, "")
        .is_err());

    assert_eq!(fs::read_to_string(&data_file).unwrap(), before);
}

#[test]
fn week_counter_survives_reload() {
    let (store, data_file) = store_at(day(2024, 3, 4));
    store.add_week(day(2024, 3, 4)).unwrap();
    store.add_week(day(2024, 3, 11)).unwrap();

    let reopened = reopen_at(&data_file, day(2024, 3, 18));
    let week = reopened.add_week(day(2024, 3, 18)).unwrap();
    assert_eq!(week.name, "week3");
}

#[test]
fn legacy_document_without_counter_still_loads() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("ledger.json");
    let legacy = serde_json::json!({
        "weeks": [{
            "week_name": "week1",
            "week_start_date": "2024-03-04",
            "week_end_date": "2024-03-09",
            "amount_per_week": 600,
            "amount_per_session": 120,
            "normal_number_of_sessions_per_week": 5,
            "sessions": [],
            "total_paid_amount": 0,
            "total_outstanding_amount": 600,
            "status": "Not Closed"
        }]
    });
    fs::write(&path, serde_json::to_string_pretty(&legacy).unwrap()).unwrap();

    let reopened = reopen_at(&path, day(2024, 3, 11));
    let week = reopened.add_week(day(2024, 3, 11)).unwrap();
    assert_eq!(week.name, "week2");
}
