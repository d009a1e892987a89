//! # Store - Single-File Versioned Key-Value Store
//!
//! An embedded map from string keys to arbitrary serializable values, backed
//! by one JSON file on disk. The whole data set lives in memory; persistence
//! rewrites the complete file. Built for config-file-scale data, not bulk
//! storage.
//!
//! ## Architecture
//!
//! ```text
//! Caller
//!   |
//!   v
//! ┌───────────────────────────────────────────────┐
//! │                    STORE                      │
//! │                                               │
//! │ write.rs → serialize → entries[key] = json    │
//! │              |                                │
//! │              |  (auto_persist?)               │
//! │              |        yes                     │
//! │              v                                │
//! │           flush() → encode envelope           │
//! │              |                                │
//! │              v                                │
//! │   {"Version": 1, "Data": {...}}  (one file)   │
//! │                                               │
//! │ read.rs → entries[key] → deserialize          │
//! └───────────────────────────────────────────────┘
//! ```
//!
//! ## Module Responsibilities
//!
//! | Module        | Purpose                                                |
//! |---------------|--------------------------------------------------------|
//! | [`lib.rs`]    | `Store` struct, `open()`, accessors, version gate, `Debug` |
//! | [`container`] | On-disk envelope codec, versioned payload types        |
//! | [`error`]     | `StoreError` taxonomy, `StoreResult` alias             |
//! | [`write`]     | `save()`, `flush()`, backing-file rewrite              |
//! | [`read`]      | `read()`                                               |
//!
//! ## Concurrency
//!
//! A `Store` is shared by reference across threads; every method takes
//! `&self`. One `Mutex` guards the version tag and the entry map, and every
//! access to either goes through it. `save` serializes the value **before**
//! taking the lock, so concurrent writers contend only for the map insert
//! (plus the file rewrite when auto-persist is on).
//!
//! ## Persistence Modes
//!
//! With `auto_persist` every successful `save` rewrites the backing file.
//! Without it nothing touches disk until an explicit [`Store::flush`]; data
//! saved but never flushed is lost when the process exits. The rewrite is a
//! plain in-place overwrite (no temp-file rename, no fsync), so a crash
//! mid-flush can leave a truncated file. On Unix the file is created with
//! mode `0600`.
mod container;
mod error;
mod read;
mod write;

pub use container::FORMAT_VERSION_V1;
pub use error::{StoreError, StoreResult};

use container::{Entries, Payload};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// An open key-value store bound to one backing file.
///
/// # Write Path
///
/// 1. Version gate: refuse when the current tag is unsupported.
/// 2. Serialize the value to raw JSON (outside the lock).
/// 3. Insert/overwrite the entry under the lock.
/// 4. If auto-persist is on, rewrite the backing file.
///
/// # Read Path
///
/// 1. Version gate.
/// 2. Look up the raw JSON under the lock; absent key fails with
///    [`StoreError::NoSuchKey`].
/// 3. Deserialize into the caller's output reference. The reference is
///    written only on full success.
///
/// # Opening
///
/// [`Store::open`] reads and decodes the backing file, or starts fresh
/// (version 1, empty) when the file does not exist yet.
pub struct Store {
    /// Backing file location, fixed for the lifetime of the handle.
    pub(crate) path: PathBuf,

    /// If `true`, every successful `save` rewrites the backing file.
    pub(crate) auto_persist: bool,

    /// The single lock guarding all mutable state: the format version tag
    /// and the versioned entry payload.
    pub(crate) state: Mutex<State>,
}

/// Everything behind the store's mutex.
pub(crate) struct State {
    pub(crate) version: u32,
    pub(crate) payload: Payload,
}

impl std::fmt::Debug for Store {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock().expect("lock poisoned");
        f.debug_struct("Store")
            .field("path", &self.path)
            .field("format_version", &state.version)
            .field("auto_persist", &self.auto_persist)
            .field("entries", &state.payload.entries().len())
            .finish()
    }
}

impl Store {
    /// Opens the store backed by `path`.
    ///
    /// # Arguments
    ///
    /// * `path` — location of the backing file.
    /// * `auto_persist` — if `true`, every successful `save` (and this call,
    ///   for a fresh store) rewrites the file.
    ///
    /// # Steps
    ///
    /// 1. Read the backing file.
    /// 2. Missing file: start fresh with version 1 and no entries. With
    ///    `auto_persist` set, flush immediately so the empty envelope exists
    ///    on disk.
    /// 3. Existing file: decode the envelope, then the payload according to
    ///    its version tag. An unrecognized tag fails with
    ///    [`StoreError::UnknownVersion`]; a malformed document with
    ///    [`StoreError::Deserialization`].
    /// 4. Any other read failure maps to [`StoreError::Io`] with the path.
    pub fn open<P: AsRef<Path>>(path: P, auto_persist: bool) -> StoreResult<Store> {
        let path = path.as_ref().to_path_buf();

        match fs::read(&path) {
            Ok(bytes) => {
                let (version, payload) = container::decode_store(&bytes)?;
                Ok(Store {
                    path,
                    auto_persist,
                    state: Mutex::new(State { version, payload }),
                })
            }
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                let store = Store {
                    path,
                    auto_persist,
                    state: Mutex::new(State {
                        version: FORMAT_VERSION_V1,
                        payload: Payload::V1(Entries::new()),
                    }),
                };
                if auto_persist {
                    store.flush()?;
                }
                Ok(store)
            }
            Err(e) => Err(StoreError::io(&path, e)),
        }
    }

    /// Fails with [`StoreError::UnknownVersion`] unless the current tag is
    /// one this build understands. `save` and `read` call this first; `flush`
    /// deliberately does not.
    pub(crate) fn version_gate(&self) -> StoreResult<()> {
        let version = self.state.lock().expect("lock poisoned").version;
        if container::is_supported(version) {
            Ok(())
        } else {
            Err(StoreError::UnknownVersion(version))
        }
    }

    /// Returns the backing file path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Returns `true` when every successful `save` rewrites the backing file.
    #[must_use]
    pub fn auto_persist(&self) -> bool {
        self.auto_persist
    }

    /// Returns the format version tag the next flush will write.
    #[must_use]
    pub fn format_version(&self) -> u32 {
        self.state.lock().expect("lock poisoned").version
    }

    /// Overrides the format version tag.
    ///
    /// The in-memory payload keeps its current shape; only the tag changes.
    /// Setting an unsupported tag makes subsequent `save` and `read` calls
    /// fail with [`StoreError::UnknownVersion`], while `flush` still writes
    /// the file; that is how forward-compatibility fixtures are produced.
    pub fn set_format_version(&self, version: u32) {
        self.state.lock().expect("lock poisoned").version = version;
    }

    /// Returns the number of entries currently held.
    #[must_use]
    pub fn len(&self) -> usize {
        self.state.lock().expect("lock poisoned").payload.entries().len()
    }

    /// Returns `true` when the store holds no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Returns `true` when `key` has a saved value.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.state
            .lock()
            .expect("lock poisoned")
            .payload
            .entries()
            .contains_key(key)
    }

    /// Returns all keys, sorted.
    #[must_use]
    pub fn keys(&self) -> Vec<String> {
        let state = self.state.lock().expect("lock poisoned");
        let mut keys: Vec<String> = state.payload.entries().keys().cloned().collect();
        keys.sort();
        keys
    }
}

#[cfg(test)]
mod tests;
