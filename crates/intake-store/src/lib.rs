//! Storage layer for the daily intake tracker.
//!
//! The whole [`Store`] lives in a single JSON file. A sibling lock file
//! (`<store>.lock`) serializes access between processes sharing the file.
//!
//! # Locking
//!
//! The lock is taken for one [`RecordStore::load`] or one
//! [`RecordStore::save`] and released before the call returns. It is not held
//! across a session, so two sessions that load, mutate and save concurrently
//! resolve as last-writer-wins at whole-store granularity.
//!
//! # File format
//!
//! A JSON object keyed by ISO 8601 date (`2024-03-01`). Each value holds the
//! optional `sleep_hours` and `water_ml` numbers and an optional `food` array
//! of `{"label", "calories"}` objects in insertion order. There is no schema
//! version.
//!
//! # Atomicity
//!
//! `save` writes a sibling `<store>.tmp`, syncs it, and renames it over the
//! store file, so a reader never observes a partially written store.

mod lock;
mod tracker;

use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;

use intake_core::{InvalidValue, Store};
use thiserror::Error;

pub use tracker::Tracker;

/// Storage errors.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The store file exists but does not contain a readable store.
    #[error("store file {} is corrupt", .path.display())]
    Corrupt {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    /// Another process held the lock for longer than the configured timeout.
    ///
    /// Callers should discard any in-memory store and start over from a
    /// fresh load.
    #[error("could not lock {} within {waited:?}", .path.display())]
    LockUnavailable { path: PathBuf, waited: Duration },
    /// An I/O error on one of the store's files.
    #[error("i/o error on {}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    /// The store could not be encoded.
    #[error("failed to encode store")]
    Encode(#[source] serde_json::Error),
    /// A submitted value was rejected; nothing was changed.
    #[error(transparent)]
    InvalidValue(#[from] InvalidValue),
}

impl StoreError {
    fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: PathBuf::from(path),
            source,
        }
    }
}

/// Handle to the store file and its lock file.
#[derive(Debug, Clone)]
pub struct RecordStore {
    path: PathBuf,
    lock_path: PathBuf,
    lock_timeout: Duration,
}

impl RecordStore {
    /// How long `load` and `save` wait for the lock by default.
    pub const DEFAULT_LOCK_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a handle for the store at `path`. Nothing is touched on disk.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let lock_path = sibling(&path, ".lock");
        Self {
            path,
            lock_path,
            lock_timeout: Self::DEFAULT_LOCK_TIMEOUT,
        }
    }

    #[must_use]
    pub const fn with_lock_timeout(mut self, timeout: Duration) -> Self {
        self.lock_timeout = timeout;
        self
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn lock_path(&self) -> &Path {
        &self.lock_path
    }

    /// Reads the store under the lock.
    ///
    /// A missing store file is the initial state and yields an empty store.
    pub fn load(&self) -> Result<Store, StoreError> {
        let _guard = self.lock()?;

        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::debug!(path = %self.path.display(), "no store file, starting empty");
                return Ok(Store::new());
            }
            Err(e) => return Err(StoreError::io(&self.path, e)),
        };

        let store: Store = serde_json::from_slice(&bytes).map_err(|source| StoreError::Corrupt {
            path: self.path.clone(),
            source,
        })?;
        tracing::debug!(path = %self.path.display(), days = store.len(), "loaded store");
        Ok(store)
    }

    /// Replaces the store file with `store` under the lock.
    pub fn save(&self, store: &Store) -> Result<(), StoreError> {
        let json = serde_json::to_vec_pretty(store).map_err(StoreError::Encode)?;
        let _guard = self.lock()?;

        let tmp_path = sibling(&self.path, ".tmp");
        if let Err(err) = write_and_replace(&tmp_path, &self.path, &json) {
            if let Err(cleanup) = fs::remove_file(&tmp_path)
                && cleanup.kind() != io::ErrorKind::NotFound
            {
                tracing::warn!(path = %tmp_path.display(), error = %cleanup, "failed to remove temp file");
            }
            return Err(err);
        }
        tracing::debug!(path = %self.path.display(), days = store.len(), bytes = json.len(), "saved store");
        Ok(())
    }

    fn lock(&self) -> Result<lock::LockGuard, StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| StoreError::io(parent, e))?;
        }
        lock::acquire(&self.lock_path, self.lock_timeout)
    }
}

/// Writes `bytes` to `tmp_path`, syncs it, and renames it over `path`.
fn write_and_replace(tmp_path: &Path, path: &Path, bytes: &[u8]) -> Result<(), StoreError> {
    let mut file = File::create(tmp_path).map_err(|e| StoreError::io(tmp_path, e))?;
    file.write_all(bytes)
        .map_err(|e| StoreError::io(tmp_path, e))?;
    file.sync_all().map_err(|e| StoreError::io(tmp_path, e))?;
    drop(file);

    fs::rename(tmp_path, path).map_err(|e| StoreError::io(path, e))
}

/// `path` with `suffix` appended to its file name.
fn sibling(path: &Path, suffix: &str) -> PathBuf {
    let mut name = path.file_name().map(OsString::from).unwrap_or_default();
    name.push(suffix);
    path.with_file_name(name)
}
