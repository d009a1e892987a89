use serde::{Deserialize, Serialize};

/// A value shaped like real application state: mixed scalars plus bytes.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    pub label: String,
    pub active: bool,
    pub payload: Vec<u8>,
}

/// Nests a [`Fixture`] to exercise non-trivial JSON shapes.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nested {
    pub inner: Fixture,
    pub count: i64,
}

pub fn sample_fixture() -> Fixture {
    Fixture {
        label: "fixture".to_string(),
        active: true,
        payload: vec![0xDE, 0xAD, 0xBE, 0xEF],
    }
}

pub fn sample_nested() -> Nested {
    Nested {
        inner: sample_fixture(),
        count: 42,
    }
}

/// A value whose serialization always fails.
pub struct Unserializable;

impl Serialize for Unserializable {
    fn serialize<S>(&self, _serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        Err(serde::ser::Error::custom("refuses to serialize"))
    }
}
