use std::path::PathBuf;
use std::sync::Mutex;

use chrono::NaiveDate;
use once_cell::sync::Lazy;
use session_ledger::{
    clock::FixedClock,
    ledger::WeekDefaults,
    storage::JsonStorage,
    store::LedgerStore,
};
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

/// Creates a store over a fresh temp-backed ledger file, with "today" pinned
/// to `today` so the week status rule is deterministic.
pub fn store_at(today: NaiveDate) -> (LedgerStore, PathBuf) {
    let temp = TempDir::new().expect("create temp dir");
    let data_file = temp.path().join("ledger.json");
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);

    let storage = JsonStorage::new(data_file.clone()).expect("create json storage backend");
    let store = LedgerStore::with_clock(
        Box::new(storage),
        WeekDefaults::default(),
        Box::new(FixedClock(today)),
    );
    (store, data_file)
}

/// A second store over the same ledger file, pinned to a different date.
pub fn reopen_at(data_file: &PathBuf, today: NaiveDate) -> LedgerStore {
    let storage = JsonStorage::new(data_file.clone()).expect("create json storage backend");
    LedgerStore::with_clock(
        Box::new(storage),
        WeekDefaults::default(),
        Box::new(FixedClock(today)),
    )
}

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}
