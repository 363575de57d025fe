//! # Record Indexer Pipeline
//!
//! The core record-to-document indexing pipeline.
//!
//! ## Architecture
//!
//! A record change flows through the pipeline as:
//!
//! 1. **LifecycleSync**: reacts to write/delete/publish/unpublish events
//!    and decides which stage's document is affected
//! 2. **SchemaMapper**: derives the field-type mapping for the record's
//!    type from its storage schema
//! 3. **DocumentBuilder**: builds the point-in-time document for a stage
//! 4. **SearchService**: transmits the document, or defers it to the
//!    **BulkBuffer** while a bulk session is open
//!
//! **IndexManager** drives index creation (`define`) and full
//! resynchronization (`refresh`) over every indexable record type known
//! to the storage collaborator.

pub mod buffer;
pub mod builder;
pub mod errors;
pub mod lifecycle;
pub mod manager;
pub mod schema;
pub mod service;
pub mod store;

#[cfg(test)]
pub(crate) mod testutil;

pub use buffer::BulkBuffer;
pub use builder::DocumentBuilder;
pub use errors::PipelineError;
pub use lifecycle::{IndexingConfig, LifecycleSync};
pub use manager::IndexManager;
pub use schema::SchemaMapper;
pub use service::SearchService;
pub use store::{Record, RecordStore, RecordType};
