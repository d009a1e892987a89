/// Write path: `save()`, `flush()`, and the backing-file rewrite.
///
/// All mutations flow through this module. A save serializes the value
/// before taking the lock, applies it to the entry map under the lock, and
/// (in auto-persist mode) rewrites the backing file. A flush always writes
/// the complete document, whatever version tag the state carries.
use serde::Serialize;
use std::fs::OpenOptions;
use std::io::Write;

use crate::container;
use crate::error::{StoreError, StoreResult};
use crate::Store;

impl Store {
    /// Saves `value` under `key` (insert or overwrite).
    ///
    /// The value is serialized to raw JSON outside the lock; the store is
    /// only mutated once serialization has succeeded. In auto-persist mode a
    /// successful save also rewrites the backing file; if that rewrite
    /// fails the error surfaces here, but the in-memory update stands.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownVersion`] when the current tag is unsupported,
    /// [`StoreError::Serialization`] when the value cannot be serialized,
    /// [`StoreError::Io`] when the auto-persist rewrite fails.
    pub fn save<T>(&self, key: &str, value: &T) -> StoreResult<()>
    where
        T: ?Sized + Serialize,
    {
        self.version_gate()?;

        // Serialize before locking; only the map insert needs the lock.
        let raw = container::encode_value(value)?;

        {
            let mut state = self.state.lock().expect("lock poisoned");
            state.payload.entries_mut().insert(key.to_string(), raw);
        }

        if self.auto_persist {
            self.flush()?;
        }

        Ok(())
    }

    /// Rewrites the backing file with the complete current document.
    ///
    /// No version gate: the tag is written out as-is, supported or not. The
    /// rewrite happens in place (create, truncate, write) with no temp file
    /// and no fsync; on Unix a newly created file gets mode `0600`.
    ///
    /// # Errors
    ///
    /// [`StoreError::Serialization`] when encoding fails,
    /// [`StoreError::Io`] (carrying the path) when the write fails.
    pub fn flush(&self) -> StoreResult<()> {
        let state = self.state.lock().expect("lock poisoned");
        let bytes = container::encode(state.version, &state.payload)?;
        self.overwrite_backing_file(&bytes)
    }

    fn overwrite_backing_file(&self, bytes: &[u8]) -> StoreResult<()> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).truncate(true);
        #[cfg(unix)]
        {
            use std::os::unix::fs::OpenOptionsExt;
            options.mode(0o600);
        }

        let mut file = options
            .open(&self.path)
            .map_err(|e| StoreError::io(&self.path, e))?;
        file.write_all(bytes)
            .map_err(|e| StoreError::io(&self.path, e))
    }
}
