//! Search documents and their addressing convention.
//!
//! A document is the flattened, index-ready representation of one record
//! at one stage. Its id is `{index_type_name}_{record_id}_{stage}`, which
//! makes the draft and live representations of a record two distinct,
//! independently addressable documents.

use serde_json::{Map, Value};

use crate::stage::Stage;
use crate::value::FieldValue;

/// Normalize a record class name into an engine-safe index type name.
///
/// Namespace separators are replaced with underscores so the result can
/// be embedded in document ids and used as a category key.
pub fn index_type_name(class_name: &str) -> String {
    class_name.replace("::", "_").replace('\\', "_")
}

/// Assemble the document id for a (type, record, stage) triple.
///
/// Deterministic and injective over the triple: two distinct triples
/// never collide and the same triple always yields the same id.
pub fn document_id(type_name: &str, record_id: i64, stage: Stage) -> String {
    format!("{}_{}_{}", type_name, record_id, stage.as_str())
}

/// Insertion-ordered map from field name to [`FieldValue`].
///
/// Order is kept for deterministic construction; the JSON body sent to
/// the engine does not rely on field order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldSet {
    entries: Vec<(String, FieldValue)>,
}

impl FieldSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field value, preserving insertion order.
    pub fn insert(&mut self, name: impl Into<String>, value: FieldValue) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = value,
            None => self.entries.push((name, value)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    /// Render the document source body.
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        for (name, value) in &self.entries {
            body.insert(name.clone(), value.to_json());
        }
        Value::Object(body)
    }
}

/// The index-ready representation of one record at one stage.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchDocument {
    /// Document id per [`document_id`].
    pub id: String,
    /// The document's field values.
    pub fields: FieldSet,
}

impl SearchDocument {
    pub fn new(id: impl Into<String>, fields: FieldSet) -> Self {
        Self {
            id: id.into(),
            fields,
        }
    }

    /// Render the source body sent to the engine.
    pub fn to_json(&self) -> Value {
        self.fields.to_json()
    }
}
