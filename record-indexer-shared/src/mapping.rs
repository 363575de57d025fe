//! Field mappings for the search index schema.
//!
//! A [`MappingSet`] is the derived schema for one record type: an ordered
//! map from field name to the declared value type and storage hints sent
//! to the search engine. An entry with no declared kind is valid — the
//! field is passed through and the engine's auto-detection applies.

use serde_json::{json, Map, Value};

/// Value types a field can be mapped to in the search index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    String,
    Integer,
    Long,
    Float,
    Double,
    Boolean,
    Date,
    Keyword,
}

impl FieldKind {
    /// The engine type token for this kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldKind::String => "string",
            FieldKind::Integer => "integer",
            FieldKind::Long => "long",
            FieldKind::Float => "float",
            FieldKind::Double => "double",
            FieldKind::Boolean => "boolean",
            FieldKind::Date => "date",
            FieldKind::Keyword => "keyword",
        }
    }
}

/// Declared value type and storage hints for one indexed field.
///
/// The default mapping is empty: no type hint, no store flag, no date
/// format. An unmappable storage type is not an error — the field keeps
/// an empty mapping and the engine decides.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FieldMapping {
    /// Declared value type, if a mapping rule matched.
    pub kind: Option<FieldKind>,
    /// Whether the engine should store the raw value separately.
    pub store: Option<bool>,
    /// Date format string, set for every date-typed field.
    pub format: Option<String>,
}

impl FieldMapping {
    /// A mapping declaring just a value type.
    pub fn of(kind: FieldKind) -> Self {
        Self {
            kind: Some(kind),
            store: None,
            format: None,
        }
    }

    /// True if no hints are declared at all.
    pub fn is_empty(&self) -> bool {
        self.kind.is_none() && self.store.is_none() && self.format.is_none()
    }

    /// Render the engine property body for this mapping.
    pub fn to_json(&self) -> Value {
        let mut body = Map::new();
        if let Some(kind) = self.kind {
            body.insert("type".to_string(), json!(kind.as_str()));
        }
        if let Some(format) = &self.format {
            body.insert("format".to_string(), json!(format));
        }
        if let Some(store) = self.store {
            body.insert("store".to_string(), json!(store));
        }
        Value::Object(body)
    }
}

/// Insertion-ordered map from field name to [`FieldMapping`].
///
/// Inserting an existing name replaces the mapping in place, keeping its
/// original position. Order is preserved for deterministic output; the
/// engine's mapping application is assumed to be order-insensitive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MappingSet {
    entries: Vec<(String, FieldMapping)>,
}

impl MappingSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace a field mapping, preserving insertion order.
    pub fn insert(&mut self, name: impl Into<String>, mapping: FieldMapping) {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, existing)) => *existing = mapping,
            None => self.entries.push((name, mapping)),
        }
    }

    pub fn get(&self, name: &str) -> Option<&FieldMapping> {
        self.entries
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, m)| m)
    }

    pub fn get_mut(&mut self, name: &str) -> Option<&mut FieldMapping> {
        self.entries
            .iter_mut()
            .find(|(n, _)| n == name)
            .map(|(_, m)| m)
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

    /// Iterate entries in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldMapping)> {
        self.entries.iter().map(|(n, m)| (n.as_str(), m))
    }

    /// Iterate entries mutably, in insertion order.
    pub fn iter_mut(&mut self) -> impl Iterator<Item = (&str, &mut FieldMapping)> {
        self.entries.iter_mut().map(|(n, m)| (n.as_str(), m))
    }

    /// Field names in insertion order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(n, _)| n.as_str())
    }

    /// Render the engine `properties` body for this mapping set.
    pub fn to_properties(&self) -> Value {
        let mut properties = Map::new();
        for (name, mapping) in &self.entries {
            properties.insert(name.clone(), mapping.to_json());
        }
        Value::Object(properties)
    }
}
