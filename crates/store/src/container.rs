//! On-disk container format.
//!
//! A store round-trips through a single JSON document with two fields:
//!
//! ```text
//! {"Version": 1, "Data": {"some-key": <value JSON>, ...}}
//! ```
//!
//! `Version` is the integer format tag. `Data` is opaque at the envelope
//! layer: [`decode`] never looks inside it, and a second, version-dispatched
//! step interprets the raw text. Values inside a version-1 payload are
//! themselves raw JSON; the store carries them as pre-serialized text and
//! never re-encodes them.
//!
//! ## Version history
//!
//! | tag | payload                                         |
//! |-----|-------------------------------------------------|
//! | 1   | JSON object: string key -> arbitrary JSON value |
//!
//! Adding a format version means a new [`Payload`] variant, a new
//! `decode_payload_vN` and a new arm in [`decode_store`]; nothing outside
//! this module changes.

use std::collections::HashMap;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;

use crate::error::{StoreError, StoreResult};

/// Format tag carried by every store this build creates.
pub const FORMAT_VERSION_V1: u32 = 1;

/// True when this build can interpret payloads tagged `version`.
pub(crate) fn is_supported(version: u32) -> bool {
    version == FORMAT_VERSION_V1
}

/// Entry map of a version-1 payload: key -> raw, pre-serialized JSON text.
pub(crate) type Entries = HashMap<String, Box<RawValue>>;

/// The envelope exactly as it appears on disk.
#[derive(Serialize, Deserialize)]
pub(crate) struct Container {
    #[serde(rename = "Version")]
    pub(crate) version: u32,
    #[serde(rename = "Data")]
    pub(crate) data: Box<RawValue>,
}

/// A decoded payload, one variant per understood format version.
#[derive(Debug)]
pub(crate) enum Payload {
    V1(Entries),
}

impl Payload {
    pub(crate) fn entries(&self) -> &Entries {
        match self {
            Payload::V1(entries) => entries,
        }
    }

    pub(crate) fn entries_mut(&mut self) -> &mut Entries {
        match self {
            Payload::V1(entries) => entries,
        }
    }
}

/// Serializes a payload under `version` into envelope bytes.
///
/// Does not check that `version` is supported: flushing a store whose tag
/// was forced to an unknown value must still write that tag out, so that
/// forward-compatibility fixtures can be produced.
pub(crate) fn encode(version: u32, payload: &Payload) -> StoreResult<Vec<u8>> {
    let data = match payload {
        Payload::V1(entries) => {
            serde_json::value::to_raw_value(entries).map_err(StoreError::Serialization)?
        }
    };
    let container = Container { version, data };
    serde_json::to_vec(&container).map_err(StoreError::Serialization)
}

/// Decodes just the envelope; the payload stays raw.
pub(crate) fn decode(bytes: &[u8]) -> StoreResult<Container> {
    serde_json::from_slice(bytes).map_err(StoreError::Deserialization)
}

/// Decodes envelope bytes and interprets the payload according to its tag.
pub(crate) fn decode_store(bytes: &[u8]) -> StoreResult<(u32, Payload)> {
    let container = decode(bytes)?;
    let payload = match container.version {
        FORMAT_VERSION_V1 => Payload::V1(decode_payload_v1(&container.data)?),
        other => return Err(StoreError::UnknownVersion(other)),
    };
    Ok((container.version, payload))
}

/// Parses a version-1 payload: a JSON object of raw values.
fn decode_payload_v1(data: &RawValue) -> StoreResult<Entries> {
    serde_json::from_str(data.get()).map_err(StoreError::Deserialization)
}

/// Serializes one value to the raw JSON text an entry stores.
pub(crate) fn encode_value<T>(value: &T) -> StoreResult<Box<RawValue>>
where
    T: ?Sized + Serialize,
{
    serde_json::value::to_raw_value(value).map_err(StoreError::Serialization)
}

/// Deserializes one stored raw JSON text into the caller's target shape.
pub(crate) fn decode_value<T>(raw: &RawValue) -> StoreResult<T>
where
    T: DeserializeOwned,
{
    serde_json::from_str(raw.get()).map_err(StoreError::Deserialization)
}
