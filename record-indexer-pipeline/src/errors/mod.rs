//! Error types for the indexing pipeline.

use thiserror::Error;

use record_indexer_repository::SearchIndexError;

/// Errors that can occur in the indexing pipeline.
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Error from the storage collaborator.
    #[error("Storage error: {0}")]
    StorageError(String),

    /// Error from the search engine provider.
    #[error("Search index error: {0}")]
    SearchIndexError(#[from] SearchIndexError),

    /// A bulk flush failed for one type's documents. That type's buffer
    /// is retained so `end_bulk_index` can be retried.
    #[error("Bulk flush error for type {type_name}: {source}")]
    BulkFlushError {
        type_name: String,
        source: SearchIndexError,
    },
}

impl PipelineError {
    /// Create a storage error.
    pub fn storage(msg: impl Into<String>) -> Self {
        Self::StorageError(msg.into())
    }

    /// Create a bulk flush error naming the affected type.
    pub fn bulk_flush(type_name: impl Into<String>, source: SearchIndexError) -> Self {
        Self::BulkFlushError {
            type_name: type_name.into(),
            source,
        }
    }
}
