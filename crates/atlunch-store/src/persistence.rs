//! Best-effort durable key/value storage.
//!
//! [`KeyValueStore`] is the raw backend contract. [`Persistence`] wraps a
//! backend so that failures never reach the caller: a failed write logs once
//! and degrades the session to in-memory storage, and a failed or malformed
//! read is treated as absent.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use atlunch_core::{Coordinate, LocationState, PersistedLocation, Place};
use serde::Serialize;
use serde_json::Value;
use thiserror::Error;

pub const PLACES_KEY: &str = "places";
pub const LOCATION_KEY: &str = "location";
pub const COORDINATE_KEY: &str = "coordinate";

#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O error at {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("could not encode value for key '{key}': {source}")]
    Serialize {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("storage backend unavailable: {0}")]
    Unavailable(String),
}

/// Raw durable store. No validation of contents happens at this layer.
pub trait KeyValueStore {
    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<Value>, PersistenceError>;

    /// # Errors
    ///
    /// Returns [`PersistenceError`] when the backend cannot be written.
    fn set(&mut self, key: &str, value: Value) -> Result<(), PersistenceError>;
}

/// Process-local store. Also what the session falls back to when the real
/// backend fails.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Value>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Value>, PersistenceError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), PersistenceError> {
        self.entries.insert(key.to_string(), value);
        Ok(())
    }
}

/// One JSON file per key under a data directory.
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    dir: PathBuf,
}

impl JsonFileStore {
    #[must_use]
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl KeyValueStore for JsonFileStore {
    fn get(&self, key: &str) -> Result<Option<Value>, PersistenceError> {
        let path = self.path_for(key);
        let raw = match std::fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(PersistenceError::Io {
                    path: path.display().to_string(),
                    source,
                })
            }
        };
        // Unparseable content reads as absent.
        Ok(serde_json::from_str(&raw).ok())
    }

    fn set(&mut self, key: &str, value: Value) -> Result<(), PersistenceError> {
        let io_err = |path: &Path, source| PersistenceError::Io {
            path: path.display().to_string(),
            source,
        };
        std::fs::create_dir_all(&self.dir).map_err(|e| io_err(&self.dir, e))?;

        let path = self.path_for(key);
        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        let encoded = serde_json::to_vec(&value).map_err(|source| PersistenceError::Serialize {
            key: key.to_string(),
            source,
        })?;
        std::fs::write(&tmp, encoded).map_err(|e| io_err(&tmp, e))?;
        std::fs::rename(&tmp, &path).map_err(|e| io_err(&path, e))
    }
}

/// The durable subset of session state, as read back at startup.
///
/// `places` is `None` when nothing usable was stored, which is distinct from
/// a list that was fetched and then emptied (never written, see
/// [`Persistence::save_places`]).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PersistedSnapshot {
    pub places: Option<Vec<Place>>,
    pub location: Option<PersistedLocation>,
    pub coordinate: Option<Coordinate>,
}

impl PersistedSnapshot {
    /// Most recent coordinate known from storage, preferring the dedicated
    /// `coordinate` key over a resolved `location`.
    #[must_use]
    pub fn last_known_coordinate(&self) -> Option<Coordinate> {
        self.coordinate.or(match self.location {
            Some(PersistedLocation::Resolved(c)) => Some(c),
            _ => None,
        })
    }
}

/// Best-effort wrapper around a [`KeyValueStore`].
pub struct Persistence<S> {
    store: S,
    fallback: Option<MemoryStore>,
}

impl<S: KeyValueStore> Persistence<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            fallback: None,
        }
    }

    /// `true` once a write failed and the session switched to memory-only.
    #[must_use]
    pub fn is_degraded(&self) -> bool {
        self.fallback.is_some()
    }

    #[must_use]
    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn into_store(self) -> S {
        self.store
    }

    /// Read a raw value. Backend errors are logged and read as absent.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<Value> {
        if let Some(memory) = &self.fallback {
            if let Ok(Some(value)) = memory.get(key) {
                return Some(value);
            }
        }
        match self.store.get(key) {
            Ok(value) => value,
            Err(e) => {
                tracing::warn!(key, error = %e, "durable read failed; treating as absent");
                None
            }
        }
    }

    /// Write a value. Never fails from the caller's point of view.
    pub fn set<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        let value = match serde_json::to_value(value) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(key, error = %e, "could not encode value; skipping write");
                return;
            }
        };

        if let Some(memory) = &mut self.fallback {
            // Infallible for the memory store.
            let _ = memory.set(key, value);
            return;
        }

        if let Err(e) = self.store.set(key, value.clone()) {
            tracing::warn!(
                key,
                error = %e,
                "durable storage unavailable; continuing in memory for this session"
            );
            let mut memory = MemoryStore::new();
            let _ = memory.set(key, value);
            self.fallback = Some(memory);
        }
    }

    /// Persist the place list. Empty lists are never written so that a stored
    /// value always means "a non-empty result was fetched".
    pub fn save_places(&mut self, places: &[Place]) {
        if places.is_empty() {
            return;
        }
        self.set(PLACES_KEY, places);
    }

    pub fn save_location(&mut self, location: &LocationState) {
        if let Some(persisted) = location.to_persisted() {
            self.set(LOCATION_KEY, &persisted);
        }
    }

    pub fn save_coordinate(&mut self, coordinate: Coordinate) {
        self.set(COORDINATE_KEY, &coordinate);
    }

    /// Read and validate the durable snapshot.
    #[must_use]
    pub fn load_snapshot(&self) -> PersistedSnapshot {
        PersistedSnapshot {
            places: self.get(PLACES_KEY).and_then(decode_places),
            location: self
                .get(LOCATION_KEY)
                .and_then(|v| serde_json::from_value(v).ok()),
            coordinate: self
                .get(COORDINATE_KEY)
                .and_then(|v| serde_json::from_value(v).ok()),
        }
    }
}

/// Decode a stored place list. Anything that is not a non-empty array of at
/// least one valid place reads as absent; invalid entries are dropped.
fn decode_places(value: Value) -> Option<Vec<Place>> {
    let Value::Array(items) = value else {
        return None;
    };
    let total = items.len();
    let places: Vec<Place> = items
        .into_iter()
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();
    if places.len() < total {
        tracing::warn!(
            dropped = total - places.len(),
            "ignored malformed persisted places"
        );
    }
    if places.is_empty() {
        None
    } else {
        Some(places)
    }
}

#[cfg(test)]
#[path = "persistence_test.rs"]
mod tests;
