use anyhow::{Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use lessonpad::application::App;
use lessonpad::infrastructure::JsonFileStore;
use lessonpad::util::testing::{FixedClock, ScriptedConfirm};
use std::path::PathBuf;
use tempfile::TempDir;

/// Temporary JSON store backing an application under test
#[allow(dead_code)]
pub struct TestStore {
    _temp_dir: TempDir,
    pub store_path: PathBuf,
}

#[allow(dead_code)]
impl TestStore {
    pub fn new() -> Result<Self> {
        let temp_dir = tempfile::tempdir().context("Failed to create temporary directory")?;
        let store_path = temp_dir.path().join("lessonpad/store.json");
        Ok(Self {
            _temp_dir: temp_dir,
            store_path,
        })
    }

    /// Create a store pre-filled with raw JSON values
    pub fn with_entries(entries: &[(&str, &str)]) -> Result<Self> {
        let test_store = Self::new()?;
        let map: std::collections::BTreeMap<_, _> = entries.iter().copied().collect();
        if let Some(parent) = test_store.store_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&test_store.store_path, serde_json::to_string(&map)?)?;
        Ok(test_store)
    }

    pub fn open(&self) -> Result<JsonFileStore> {
        JsonFileStore::open(&self.store_path)
    }

    /// Application over this store, at `now`, answering confirmations with `answer`
    pub fn app(&self, now: NaiveDateTime, answer: bool) -> Result<App> {
        Ok(App::new(
            Box::new(self.open()?),
            Box::new(ScriptedConfirm::always(answer)),
            Box::new(FixedClock::new(now)),
            "Peggy",
        ))
    }
}

#[allow(dead_code)]
pub fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(h, min, 0))
        .expect("valid test date")
}
