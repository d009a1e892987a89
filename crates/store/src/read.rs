/// Read path: `read()`.
///
/// A read resolves the key under the lock and deserializes the stored raw
/// JSON into the caller's output reference. An absent key and an undecodable
/// value are strictly distinct failures: the former is `NoSuchKey` carrying
/// the requested key, the latter `Deserialization`.

use serde::de::DeserializeOwned;

use crate::container;
use crate::error::{StoreError, StoreResult};
use crate::Store;

impl Store {
    /// Reads the value saved under `key` into `out`.
    ///
    /// `out` is written only when the lookup and the deserialization both
    /// succeed; on any failure it is left exactly as the caller passed it.
    ///
    /// # Errors
    ///
    /// [`StoreError::UnknownVersion`] when the current tag is unsupported,
    /// [`StoreError::NoSuchKey`] (carrying `key`) when the store holds no
    /// such entry, [`StoreError::Deserialization`] when the stored JSON does
    /// not decode into `T`.
    pub fn read<T>(&self, key: &str, out: &mut T) -> StoreResult<()>
    where
        T: DeserializeOwned,
    {
        self.version_gate()?;

        let state = self.state.lock().expect("lock poisoned");
        let raw = state
            .payload
            .entries()
            .get(key)
            .ok_or_else(|| StoreError::NoSuchKey(key.to_string()))?;

        *out = container::decode_value(raw)?;
        Ok(())
    }
}
