//! Search index provider trait definition.
//!
//! This module defines the abstract interface for search engine
//! operations, allowing different backend implementations (OpenSearch,
//! mocks for testing, etc.).

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use record_indexer_shared::{MappingSet, SearchDocument, SearchRequest, SearchResponse};

/// Abstract interface for search index operations.
///
/// The `type_name` arguments carry the normalized index-type-name of the
/// record class a document or mapping belongs to. The engine holds a
/// single flat index; type names scope mappings, logging, and bulk error
/// reporting.
///
/// # Thread Safety
///
/// All implementations must be `Send + Sync` to allow use across async
/// tasks.
#[async_trait]
pub trait SearchIndexProvider: Send + Sync {
    /// Check whether the index exists.
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError>;

    /// Create the index. Fails if it already exists; callers are expected
    /// to check [`SearchIndexProvider::index_exists`] first.
    async fn create_index(&self, index: &str) -> Result<(), SearchIndexError>;

    /// Apply a record type's field mapping to the index.
    ///
    /// Properties are merged into the index's flat mapping. Re-applying an
    /// unchanged mapping must have no adverse effect.
    async fn apply_mapping(
        &self,
        index: &str,
        type_name: &str,
        mapping: &MappingSet,
    ) -> Result<(), SearchIndexError>;

    /// Create or replace a single document.
    async fn upsert_document(
        &self,
        index: &str,
        type_name: &str,
        document: &SearchDocument,
    ) -> Result<(), SearchIndexError>;

    /// Create or replace a batch of documents in one bulk call.
    ///
    /// A partial failure is reported as
    /// [`SearchIndexError::BulkIndexError`] naming `type_name`.
    async fn upsert_documents(
        &self,
        index: &str,
        type_name: &str,
        documents: &[SearchDocument],
    ) -> Result<(), SearchIndexError>;

    /// Delete a document by id. Deleting a missing document succeeds.
    async fn delete_document(
        &self,
        index: &str,
        type_name: &str,
        doc_id: &str,
    ) -> Result<(), SearchIndexError>;

    /// Make recent writes visible to search.
    async fn refresh_index(&self, index: &str) -> Result<(), SearchIndexError>;

    /// Execute a search against the index.
    async fn search(
        &self,
        index: &str,
        request: &SearchRequest,
    ) -> Result<SearchResponse, SearchIndexError>;
}
