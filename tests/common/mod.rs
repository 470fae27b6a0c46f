#![allow(dead_code)]

use std::{path::PathBuf, sync::Mutex};

use chrono::{DateTime, TimeZone, Utc};
use once_cell::sync::Lazy;
use tempfile::TempDir;
use wallet_core::{
    core::{Clock, LedgerManager, ManagerOptions, RecordingSink},
    storage::{JsonFileStore, KeyValueStore, MemoryStore, STATE_KEY},
};

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub struct FrozenClock(pub DateTime<Utc>);

impl Clock for FrozenClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

pub fn frozen_options() -> ManagerOptions {
    ManagerOptions::default().with_clock(Box::new(FrozenClock(
        Utc.with_ymd_and_hms(2024, 1, 1, 9, 30, 0).unwrap(),
    )))
}

/// Creates a unique directory that outlives the calling test.
pub fn temp_base() -> PathBuf {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    base
}

/// Manager backed by a JSON directory store under `base`.
pub fn file_manager(base: &std::path::Path) -> (LedgerManager, RecordingSink) {
    let sink = RecordingSink::new();
    let store = JsonFileStore::new(base.join("state")).expect("create json store");
    let manager =
        LedgerManager::with_options(Box::new(store), Box::new(sink.clone()), frozen_options());
    (manager, sink)
}

/// Manager restored from an in-memory snapshot.
pub fn manager_from_snapshot(snapshot: &str) -> (LedgerManager, RecordingSink) {
    let store = MemoryStore::new();
    store
        .put(STATE_KEY, snapshot.as_bytes())
        .expect("seed snapshot");
    let sink = RecordingSink::new();
    let manager =
        LedgerManager::with_options(Box::new(store), Box::new(sink.clone()), frozen_options());
    (manager, sink)
}

/// Fresh manager over an empty in-memory store.
pub fn memory_manager() -> (LedgerManager, RecordingSink) {
    let sink = RecordingSink::new();
    let manager = LedgerManager::with_options(
        Box::new(MemoryStore::new()),
        Box::new(sink.clone()),
        frozen_options(),
    );
    (manager, sink)
}
