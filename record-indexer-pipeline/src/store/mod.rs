//! Storage collaborator traits.
//!
//! The pipeline never talks to a database directly: the host supplies
//! implementations of these traits for its ORM. Capability queries that
//! dynamic frameworks answer with runtime reflection ("is this type
//! searchable", "does it version", "does it nest") are explicit methods
//! here.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::errors::PipelineError;
use record_indexer_shared::{FieldValue, Stage};

/// Describes one class of indexable records.
pub trait RecordType: Send + Sync {
    /// The concrete class identifier, possibly namespaced.
    fn class_name(&self) -> &str;

    /// The fields declared searchable on this type, in declaration order.
    fn searchable_fields(&self) -> Vec<String>;

    /// The storage schema: field name to storage type string, where the
    /// storage type may carry a parameter suffix (e.g. `Varchar(255)`).
    fn storage_schema(&self) -> HashMap<String, String>;

    /// Whether records of this type participate in parent/child nesting.
    fn supports_hierarchy(&self) -> bool {
        false
    }
}

/// A point-in-time snapshot of one record, as supplied by storage.
pub trait Record: Send + Sync {
    /// The record's identity.
    fn id(&self) -> i64;

    /// The record's type descriptor.
    fn record_type(&self) -> Arc<dyn RecordType>;

    /// The current value of a field, if the record carries it.
    fn field(&self, name: &str) -> Option<FieldValue>;

    /// Whether the record carries the named field.
    fn has_field(&self, name: &str) -> bool;

    /// The parent record, when this type nests.
    fn parent(&self) -> Option<Arc<dyn Record>> {
        None
    }

    /// The record's view permission evaluated against an anonymous,
    /// public viewer — never the acting user. Index entries must reflect
    /// what an anonymous searcher could see.
    fn can_view_public(&self) -> bool;

    /// Whether the record exists distinctly per stage.
    fn supports_staging(&self) -> bool {
        false
    }

    /// The stage the record is currently being read at.
    fn current_stage(&self) -> Stage {
        Stage::Draft
    }

    /// Ancestor class names, most general type first, ending at the
    /// concrete class.
    fn ancestry_class_names(&self) -> Vec<String> {
        vec![self.record_type().class_name().to_string()]
    }

    /// Whether lifecycle events index this record automatically.
    fn auto_index(&self) -> bool {
        true
    }

    /// Whether this record may appear in search results. Honors the
    /// record's `ShowInSearch` field when present.
    fn show_in_search(&self) -> bool {
        match self.field("ShowInSearch") {
            Some(value) => value.as_integer().map(|v| v != 0).unwrap_or(true),
            None => true,
        }
    }
}

/// The storage collaborator: discovery and enumeration of indexable
/// records.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Every record type carrying the searchable capability.
    async fn indexable_types(&self) -> Result<Vec<Arc<dyn RecordType>>, PipelineError>;

    /// All records of a type. Only drives the full-resync path; not
    /// expected to be cheap.
    async fn records_of(
        &self,
        record_type: &dyn RecordType,
    ) -> Result<Vec<Arc<dyn Record>>, PipelineError>;
}
