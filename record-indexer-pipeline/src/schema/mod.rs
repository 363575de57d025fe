//! Schema-driven mapping derivation.
//!
//! Derives the search index field mapping for a record type from its
//! storage schema plus a fixed set of synthetic fields, then caches the
//! result for the process lifetime.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

use crate::store::RecordType;
use record_indexer_shared::{FieldKind, FieldMapping, MappingSet, ENGINE_DATE_FORMAT};

/// Storage type to index type rules. Parameter suffixes are stripped
/// before lookup; a storage type with no rule is passed through with an
/// empty mapping and the engine auto-detects.
const STORAGE_TYPE_RULES: &[(&str, FieldKind)] = &[
    ("Boolean", FieldKind::Integer),
    ("Decimal", FieldKind::Double),
    ("Double", FieldKind::Double),
    ("Enum", FieldKind::String),
    ("Float", FieldKind::Float),
    ("HTMLText", FieldKind::String),
    ("HTMLVarchar", FieldKind::String),
    ("Int", FieldKind::Integer),
    ("Datetime", FieldKind::Date),
    ("SS_Datetime", FieldKind::Date),
    ("Text", FieldKind::String),
    ("Varchar", FieldKind::String),
    ("Year", FieldKind::Integer),
    ("MultiValueField", FieldKind::String),
];

/// A registered mapping mutator, run before a type's mapping is
/// finalized. Used by record types that inject custom fields.
pub type MappingMutator = Box<dyn Fn(&dyn RecordType, &mut MappingSet) + Send + Sync>;

/// Derives and caches per-type field mappings.
pub struct SchemaMapper {
    mutators: Vec<MappingMutator>,
    cache: RwLock<HashMap<String, Arc<MappingSet>>>,
}

impl SchemaMapper {
    pub fn new() -> Self {
        Self {
            mutators: Vec::new(),
            cache: RwLock::new(HashMap::new()),
        }
    }

    /// Register a mutator invoked on every derived mapping before it is
    /// finalized. Mutators run in registration order.
    pub fn register_mutator(&mut self, mutator: MappingMutator) {
        self.mutators.push(mutator);
    }

    /// Derive the field mapping for a record type.
    ///
    /// Computed once per class name and cached; the mapping is effectively
    /// immutable for the process lifetime.
    pub fn derive_mapping(&self, record_type: &dyn RecordType) -> Arc<MappingSet> {
        if let Ok(cache) = self.cache.read() {
            if let Some(cached) = cache.get(record_type.class_name()) {
                return cached.clone();
            }
        }

        let mapping = Arc::new(self.compute_mapping(record_type));
        debug!(
            class_name = %record_type.class_name(),
            field_count = mapping.len(),
            "Derived field mapping"
        );

        if let Ok(mut cache) = self.cache.write() {
            return cache
                .entry(record_type.class_name().to_string())
                .or_insert(mapping)
                .clone();
        }
        mapping
    }

    fn compute_mapping(&self, record_type: &dyn RecordType) -> MappingSet {
        let schema = record_type.storage_schema();
        let mut result = MappingSet::new();

        for name in record_type.searchable_fields() {
            let mut spec = FieldMapping::default();
            if let Some(storage_type) = schema.get(&name) {
                let base = strip_parameters(storage_type);
                if let Some(kind) = lookup_storage_type(base) {
                    spec.kind = Some(kind);
                }
            }
            result.insert(name, spec);
        }

        result.insert("LastEdited", FieldMapping::of(FieldKind::Date));
        result.insert("Created", FieldMapping::of(FieldKind::Date));
        result.insert("ID", FieldMapping::of(FieldKind::Integer));

        result.insert("ParentID", FieldMapping::of(FieldKind::Integer));
        result.insert("Sort", FieldMapping::of(FieldKind::Integer));

        result.insert("Name", FieldMapping::of(FieldKind::String));
        result.insert("MenuTitle", FieldMapping::of(FieldKind::String));
        result.insert("ShowInSearch", FieldMapping::of(FieldKind::Integer));

        result.insert("ClassName", FieldMapping::of(FieldKind::String));
        result.insert("ClassNameHierarchy", FieldMapping::of(FieldKind::String));

        result.insert("StageTag", FieldMapping::of(FieldKind::Keyword));

        result.insert("PublicView", FieldMapping::of(FieldKind::Boolean));

        if record_type.supports_hierarchy() || schema.contains_key("ParentID") {
            result.insert("ParentsHierarchy", FieldMapping::of(FieldKind::Long));
        }

        // fix up dates
        for (_, spec) in result.iter_mut() {
            if spec.kind == Some(FieldKind::Date) {
                spec.format = Some(ENGINE_DATE_FORMAT.to_string());
            }
        }

        // large text, retrievable from the source of truth
        if let Some(content) = result.get_mut("Content") {
            if !content.is_empty() {
                content.store = Some(false);
            }
        }

        for mutator in &self.mutators {
            mutator(record_type, &mut result);
        }

        result
    }
}

impl Default for SchemaMapper {
    fn default() -> Self {
        Self::new()
    }
}

/// Strip a parameter suffix such as the length qualifier in
/// `Varchar(255)`.
fn strip_parameters(storage_type: &str) -> &str {
    match storage_type.find('(') {
        Some(pos) => &storage_type[..pos],
        None => storage_type,
    }
}

fn lookup_storage_type(base: &str) -> Option<FieldKind> {
    STORAGE_TYPE_RULES
        .iter()
        .find(|(name, _)| *name == base)
        .map(|(_, kind)| *kind)
}
