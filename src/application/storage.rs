// src/application/storage.rs
use crate::constants::{LESSONS_KEY, NOTES_KEY};
use crate::domain::{LessonRecord, Note};
use serde::de::DeserializeOwned;
use serde::Serialize;
use thiserror::Error;
use tracing::{debug, error, instrument};

#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Failed to read key {key}: {reason}")]
    Read { key: String, reason: String },
    #[error("Failed to write key {key}: {reason}")]
    Write { key: String, reason: String },
    #[error("Failed to serialize {key}: {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// String-keyed persistent store, the shape of browser local storage.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// Read a list under `key`. Absent, unreadable and corrupt entries all yield
/// an empty list; failures are logged, never surfaced.
fn load_list<T: DeserializeOwned>(store: &dyn KeyValueStore, key: &str) -> Vec<T> {
    let raw = match store.get(key) {
        Ok(Some(raw)) => raw,
        Ok(None) => {
            debug!(key, "No stored entry, starting empty");
            return Vec::new();
        }
        Err(e) => {
            error!(key, error = %e, "Failed to read from store");
            return Vec::new();
        }
    };

    match serde_json::from_str::<Option<Vec<T>>>(&raw) {
        Ok(list) => list.unwrap_or_default(),
        Err(e) => {
            error!(key, error = %e, "Stored entry is corrupt, starting empty");
            Vec::new()
        }
    }
}

/// Persist a whole list under `key`. A failed write is logged and otherwise
/// ignored; the caller carries on as if it succeeded.
fn save_list<T: Serialize>(store: &mut dyn KeyValueStore, key: &str, items: &[T]) {
    let result = serde_json::to_string(items)
        .map_err(|source| StorageError::Serialize {
            key: key.to_string(),
            source,
        })
        .and_then(|json| store.set(key, &json));

    match result {
        Ok(()) => debug!(key, count = items.len(), "Persisted list"),
        Err(e) => error!(key, error = %e, "Failed to write to store"),
    }
}

#[instrument(level = "debug", skip(store))]
pub fn load_notes(store: &dyn KeyValueStore) -> Vec<Note> {
    load_list(store, NOTES_KEY)
}

#[instrument(level = "debug", skip_all, fields(count = notes.len()))]
pub fn save_notes(store: &mut dyn KeyValueStore, notes: &[Note]) {
    save_list(store, NOTES_KEY, notes)
}

#[instrument(level = "debug", skip(store))]
pub fn load_lessons(store: &dyn KeyValueStore) -> Vec<LessonRecord> {
    load_list(store, LESSONS_KEY)
}

#[instrument(level = "debug", skip_all, fields(count = lessons.len()))]
pub fn save_lessons(store: &mut dyn KeyValueStore, lessons: &[LessonRecord]) {
    save_list(store, LESSONS_KEY, lessons)
}
