//! # Record Indexer
//!
//! Top-level crate for the staged record search indexer.
//!
//! This crate wires the pipeline together for a host application: it
//! reads configuration from the environment, constructs the OpenSearch
//! provider, and exposes the assembled [`Dependencies`]. The host
//! supplies its storage collaborator (`RecordStore`) and calls the
//! lifecycle hooks from its record mutation events.

pub mod config;
pub mod telemetry;

pub use config::{Dependencies, IndexerConfig};

// the surface hosts interact with, re-exported for convenience
pub use record_indexer_pipeline::{
    IndexManager, LifecycleSync, Record, RecordStore, RecordType, SearchService,
};
pub use record_indexer_shared::{FieldValue, SearchHit, SearchResponse, Stage};

use thiserror::Error;

/// Errors that can occur during indexer initialization or execution.
#[derive(Error, Debug)]
pub enum IndexingError {
    /// Configuration error.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Pipeline error.
    #[error("Pipeline error: {0}")]
    PipelineError(#[from] record_indexer_pipeline::PipelineError),

    /// Search index error.
    #[error("Search index error: {0}")]
    SearchIndexError(#[from] record_indexer_repository::SearchIndexError),

    /// IO error.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

impl IndexingError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }
}
