//! Tagged field values carried by search documents.

use chrono::{DateTime, Utc};
use serde_json::{json, Value};

/// Chrono format used to render date values into documents.
pub const DATE_VALUE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Engine-side format string applied to every date-typed field mapping.
pub const ENGINE_DATE_FORMAT: &str = "yyyy-MM-dd HH:mm:ss";

/// A loosely-typed document field value.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    String(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
    Date(DateTime<Utc>),
    List(Vec<FieldValue>),
}

impl FieldValue {
    /// Render the value into the JSON shape sent to the search engine.
    /// Dates are rendered with [`DATE_VALUE_FORMAT`] to match the format
    /// declared on date field mappings.
    pub fn to_json(&self) -> Value {
        match self {
            FieldValue::String(s) => json!(s),
            FieldValue::Integer(i) => json!(i),
            FieldValue::Float(f) => json!(f),
            FieldValue::Bool(b) => json!(b),
            FieldValue::Date(d) => json!(d.format(DATE_VALUE_FORMAT).to_string()),
            FieldValue::List(items) => {
                Value::Array(items.iter().map(FieldValue::to_json).collect())
            }
        }
    }

    /// The value as an integer, if it is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            FieldValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    /// The value as a string slice, if it is one.
    pub fn as_str(&self) -> Option<&str> {
        match self {
            FieldValue::String(s) => Some(s),
            _ => None,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::String(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::String(value)
    }
}

impl From<i64> for FieldValue {
    fn from(value: i64) -> Self {
        FieldValue::Integer(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Float(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<DateTime<Utc>> for FieldValue {
    fn from(value: DateTime<Utc>) -> Self {
        FieldValue::Date(value)
    }
}

impl From<Vec<FieldValue>> for FieldValue {
    fn from(value: Vec<FieldValue>) -> Self {
        FieldValue::List(value)
    }
}
