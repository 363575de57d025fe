//! Search index error types.
//!
//! Engine failures during upsert, delete, or flush mean the search index
//! has drifted from the record store, so they are always surfaced to the
//! caller of the triggering operation rather than swallowed.

use thiserror::Error;

/// Errors that can occur during search index operations.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Failed to establish connection to the search engine.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// Failed to create the search index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to apply a type mapping to the index.
    #[error("Mapping error: {0}")]
    MappingError(String),

    /// Failed to upsert a single document.
    #[error("Index error: {0}")]
    IndexError(String),

    /// Bulk upsert failed for one type's documents. The type name is
    /// carried so a bulk session can retry that type's buffer.
    #[error("Bulk index error for type {type_name}: {reason}")]
    BulkIndexError { type_name: String, reason: String },

    /// Failed to delete a document.
    #[error("Delete error: {0}")]
    DeleteError(String),

    /// Search query execution failed.
    #[error("Query error: {0}")]
    QueryError(String),

    /// Failed to parse a response from the search engine.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SearchIndexError {
    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create a mapping error.
    pub fn mapping(msg: impl Into<String>) -> Self {
        Self::MappingError(msg.into())
    }

    /// Create an index (upsert) error.
    pub fn index(msg: impl Into<String>) -> Self {
        Self::IndexError(msg.into())
    }

    /// Create a bulk index error naming the affected type.
    pub fn bulk_index(type_name: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::BulkIndexError {
            type_name: type_name.into(),
            reason: reason.into(),
        }
    }

    /// Create a delete error.
    pub fn delete(msg: impl Into<String>) -> Self {
        Self::DeleteError(msg.into())
    }

    /// Create a query error.
    pub fn query(msg: impl Into<String>) -> Self {
        Self::QueryError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
