//! Error taxonomy for store operations.
//!
//! Every fallible operation in this crate returns [`StoreResult`]. The
//! variants carry the detail a caller needs to act on the failure: the
//! offending version tag, the missing key, or the backing file path.

use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    /// The version tag (in memory, or declared by a file's envelope) is not
    /// one this build understands.
    #[error("unsupported version number {0}")]
    UnknownVersion(u32),

    /// A read asked for a key the store does not hold. Carries the key that
    /// was actually requested.
    #[error("no such key: {0}")]
    NoSuchKey(String),

    /// A value, or the full document during a flush, failed to serialize.
    #[error("failed to serialize value: {0}")]
    Serialization(#[source] serde_json::Error),

    /// The backing file, or a stored value, could not be decoded.
    #[error("failed to deserialize stored data: {0}")]
    Deserialization(#[source] serde_json::Error),

    /// Reading or writing the backing file failed.
    #[error("io failure on '{}': {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type StoreResult<T> = Result<T, StoreError>;

impl StoreError {
    pub(crate) fn io(path: &Path, source: io::Error) -> Self {
        StoreError::Io {
            path: path.to_path_buf(),
            source,
        }
    }
}
