//! Program records loaded from site data.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Field holding a program's unique identifier.
pub const UID_FIELD: &str = "uid";

/// Field holding a program's display name.
pub const NAME_FIELD: &str = "name";

/// One entry of the site's library data.
///
/// Records are string-keyed mappings. Only `uid` and `name` carry meaning for
/// page generation; every other field is passed through to templates as-is.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProgramRecord {
    fields: Map<String, Value>,
}

impl ProgramRecord {
    /// Create a record from its fields.
    #[must_use]
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    /// Build a record from a JSON value, if it is an object.
    #[must_use]
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(fields) => Some(Self { fields }),
            _ => None,
        }
    }

    /// Get a raw field value.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Get a field as text.
    ///
    /// Strings are returned as-is and numbers in their decimal form. Any other
    /// value, including `null`, counts as absent.
    #[must_use]
    pub fn text(&self, key: &str) -> Option<String> {
        match self.fields.get(key)? {
            Value::String(s) => Some(s.clone()),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        }
    }

    /// The program's unique identifier.
    #[must_use]
    pub fn uid(&self) -> Option<String> {
        self.text(UID_FIELD)
    }

    /// The program's display name.
    #[must_use]
    pub fn name(&self) -> Option<String> {
        self.text(NAME_FIELD)
    }

    /// All fields of the record.
    #[must_use]
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }

    /// The record as a JSON value, for use in page contexts.
    #[must_use]
    pub fn to_value(&self) -> Value {
        Value::Object(self.fields.clone())
    }
}

impl From<Map<String, Value>> for ProgramRecord {
    fn from(fields: Map<String, Value>) -> Self {
        Self::new(fields)
    }
}
