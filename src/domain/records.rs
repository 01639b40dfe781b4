//! Server-owned records as the admin screens see them.

use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};
use thiserror::Error;

use crate::domain::pagination::total_pages;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RecordError {
    #[error("record is not a JSON object")]
    NotAnObject,
    #[error("record has no usable `id`")]
    MissingId,
}

/// Identifier of a remote record.
///
/// Backends send ids as numbers or strings; both normalize to the same text
/// form so they compare equal and render identically in URLs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct RecordId(String);

impl RecordId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) if !text.trim().is_empty() => Some(Self(text.trim().to_string())),
            Value::Number(number) => Some(Self(number.to_string())),
            _ => None,
        }
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl Serialize for RecordId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for RecordId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = Value::deserialize(deserializer)?;
        Self::from_json(&value).ok_or_else(|| serde::de::Error::custom("expected string or number id"))
    }
}

/// Opaque record with an id and arbitrary fields.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResourceRecord {
    id: RecordId,
    fields: Map<String, Value>,
}

impl ResourceRecord {
    pub fn from_value(value: Value) -> Result<Self, RecordError> {
        let Value::Object(fields) = value else {
            return Err(RecordError::NotAnObject);
        };
        let id = fields
            .get("id")
            .and_then(RecordId::from_json)
            .ok_or(RecordError::MissingId)?;
        Ok(Self { id, fields })
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key).filter(|value| !value.is_null())
    }

    /// Scalar field rendered as text; strings, numbers and booleans qualify.
    pub fn text(&self, key: &str) -> Option<String> {
        match self.field(key)? {
            Value::String(text) => Some(text.clone()),
            Value::Number(number) => Some(number.to_string()),
            Value::Bool(flag) => Some(flag.to_string()),
            _ => None,
        }
    }
}

/// One page of a remote collection.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub records: Vec<T>,
    pub total: u64,
    pub per_page: u32,
    pub total_pages: u32,
}

impl<T> Page<T> {
    /// Build a page; a zero `per_page` falls back to `default_page_size`.
    pub fn new(records: Vec<T>, total: u64, per_page: u32, default_page_size: u32) -> Self {
        let per_page = if per_page == 0 {
            default_page_size.max(1)
        } else {
            per_page
        };
        Self {
            records,
            total,
            per_page,
            total_pages: total_pages(total, per_page),
        }
    }

    pub fn empty() -> Self {
        Self {
            records: Vec::new(),
            total: 0,
            per_page: 1,
            total_pages: 1,
        }
    }
}
