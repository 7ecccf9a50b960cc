//! Person records and the upstream envelope they arrive in.

use crate::{error::Result, Error};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque record identifier.
///
/// Upstream sources hand out plain strings, plain integers, or a keyed pair
/// whose `value` may be null. Identifiers compare structurally, so two keyed
/// ids with the same name and a null value are the same id.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
    Keyed { name: String, value: Option<String> },
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(n) => write!(f, "{n}"),
            RecordId::Text(s) => f.write_str(s),
            RecordId::Keyed { name, value } => {
                write!(f, "{}:{}", name, value.as_deref().unwrap_or("null"))
            }
        }
    }
}

impl From<i64> for RecordId {
    fn from(n: i64) -> Self {
        RecordId::Number(n)
    }
}

impl From<i32> for RecordId {
    fn from(n: i32) -> Self {
        RecordId::Number(n.into())
    }
}

impl From<&str> for RecordId {
    fn from(s: &str) -> Self {
        RecordId::Text(s.to_string())
    }
}

impl From<String> for RecordId {
    fn from(s: String) -> Self {
        RecordId::Text(s)
    }
}

/// Person name.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Name {
    /// Honorific, display only
    #[serde(default)]
    pub title: String,
    pub first: String,
    pub last: String,
}

/// Where the person lives. Only the country is used by the engine.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub country: String,
}

/// Profile pictures. Opaque URIs, display only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Picture {
    #[serde(default)]
    pub thumbnail: String,
}

/// A person entry as shown in one table row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub name: Name,
    pub location: Location,
    #[serde(default)]
    pub picture: Picture,
}

impl Record {
    /// Create a record without a picture.
    pub fn new(
        id: impl Into<RecordId>,
        first: impl Into<String>,
        last: impl Into<String>,
        country: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: Name {
                title: String::new(),
                first: first.into(),
                last: last.into(),
            },
            location: Location {
                country: country.into(),
            },
            picture: Picture::default(),
        }
    }

    /// Attach a thumbnail URI.
    pub fn with_thumbnail(mut self, uri: impl Into<String>) -> Self {
        self.picture.thumbnail = uri.into();
        self
    }

    /// Case-insensitive substring match against the country.
    ///
    /// `needle` must already be lowercased.
    pub fn country_contains(&self, needle: &str) -> bool {
        self.location.country.to_lowercase().contains(needle)
    }
}

/// Upstream response shape: `{ "results": [...] }`.
///
/// Any other top-level keys (paging info and the like) are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Envelope {
    pub results: Vec<Record>,
}

impl Envelope {
    /// Parse an envelope from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(|e| Error::InvalidPayload(e.to_string()))
    }

    /// Unwrap the record collection.
    pub fn into_records(self) -> Vec<Record> {
        self.results
    }
}
