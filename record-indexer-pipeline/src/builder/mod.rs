//! Point-in-time document construction.
//!
//! Builds the index-ready document for one record at one stage, from the
//! type's derived field mapping. Building is a pure function of the
//! record snapshot, the stage, and the mapping — the record is never
//! mutated.

use tracing::warn;

use crate::store::Record;
use record_indexer_shared::{
    document_id, index_type_name, FieldSet, FieldValue, MappingSet, SearchDocument, Stage,
};

/// A registered document mutator, run on the assembled field set before
/// the document is finalized (e.g. injecting computed full-text fields).
pub type DocumentMutator = Box<dyn Fn(&dyn Record, &mut FieldSet) + Send + Sync>;

/// Builds search documents from record snapshots.
pub struct DocumentBuilder {
    mutators: Vec<DocumentMutator>,
}

impl DocumentBuilder {
    pub fn new() -> Self {
        Self {
            mutators: Vec::new(),
        }
    }

    /// Register a mutator invoked on every built document before it is
    /// finalized. Mutators run in registration order.
    pub fn register_mutator(&mut self, mutator: DocumentMutator) {
        self.mutators.push(mutator);
    }

    /// Build the document for `record` at `stage`.
    pub fn build(&self, record: &dyn Record, stage: Stage, mapping: &MappingSet) -> SearchDocument {
        let mut fields = FieldSet::new();

        for name in mapping.names() {
            if record.has_field(name) {
                if let Some(value) = record.field(name) {
                    fields.insert(name, value);
                }
            }
        }

        let stage_tag = if record.supports_staging() {
            vec![FieldValue::from(stage.as_str())]
        } else {
            // stage-agnostic records are visible identically in both
            Stage::BOTH
                .iter()
                .map(|s| FieldValue::from(s.as_str()))
                .collect()
        };
        fields.insert("StageTag", FieldValue::List(stage_tag));

        fields.insert("PublicView", FieldValue::Bool(record.can_view_public()));

        let record_type = record.record_type();

        if record_type.supports_hierarchy() || record.has_field("ParentID") {
            let parents = parents_hierarchy(record)
                .into_iter()
                .map(FieldValue::Integer)
                .collect();
            fields.insert("ParentsHierarchy", FieldValue::List(parents));
        }

        if !fields.contains("ClassNameHierarchy") {
            let mut classes = record.ancestry_class_names();
            if classes.is_empty() {
                classes.push(record_type.class_name().to_string());
            }
            let classes = classes
                .iter()
                .map(|class| FieldValue::String(index_type_name(class)))
                .collect();
            fields.insert("ClassNameHierarchy", FieldValue::List(classes));
        }

        if !fields.contains("ClassName") {
            fields.insert(
                "ClassName",
                FieldValue::String(record_type.class_name().to_string()),
            );
        }

        let id = document_id(&index_type_name(record_type.class_name()), record.id(), stage);

        for mutator in &self.mutators {
            mutator(record, &mut fields);
        }

        SearchDocument::new(id, fields)
    }
}

impl Default for DocumentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn parent_id_of(record: &dyn Record) -> i64 {
    record
        .field("ParentID")
        .and_then(|value| value.as_integer())
        .unwrap_or(0)
}

/// Collect the IDs of the record's ancestors by walking the parent chain
/// upward. Stops at a missing parent or at a parent that is its own
/// parent — a record must never be its own ancestor.
pub(crate) fn parents_hierarchy(record: &dyn Record) -> Vec<i64> {
    let mut ids = Vec::new();
    let mut parent_id = parent_id_of(record);
    let mut next = record.parent();

    while parent_id != 0 {
        ids.push(parent_id);
        match next {
            Some(parent) => {
                if parent_id_of(parent.as_ref()) == parent.id() {
                    warn!(
                        record_id = record.id(),
                        parent_id = parent.id(),
                        "Truncated self-referential parent chain"
                    );
                    break;
                }
                parent_id = parent_id_of(parent.as_ref());
                next = parent.parent();
            }
            None => break,
        }
    }

    ids
}
