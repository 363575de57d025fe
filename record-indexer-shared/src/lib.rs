//! # Record Indexer Shared
//!
//! Domain types shared across the record indexer crates: stages, field
//! mappings, field values, search documents, and the index-type-name
//! normalization used to address documents in the search engine.

pub mod document;
pub mod mapping;
pub mod search;
pub mod stage;
pub mod value;

pub use document::{document_id, index_type_name, FieldSet, SearchDocument};
pub use mapping::{FieldKind, FieldMapping, MappingSet};
pub use search::{SearchHit, SearchRequest, SearchResponse};
pub use stage::Stage;
pub use value::{FieldValue, DATE_VALUE_FORMAT, ENGINE_DATE_FORMAT};
