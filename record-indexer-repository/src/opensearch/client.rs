//! OpenSearch client implementation.
//!
//! This module provides the concrete implementation of
//! `SearchIndexProvider` using the OpenSearch Rust client.

use async_trait::async_trait;
use opensearch::{
    http::request::JsonBody,
    http::transport::{SingleNodeConnectionPool, TransportBuilder},
    indices::{
        IndicesCreateParts, IndicesExistsParts, IndicesPutMappingParts, IndicesRefreshParts,
    },
    BulkParts, DeleteParts, IndexParts, OpenSearch, SearchParts,
};
use serde_json::{json, Value};
use tracing::{debug, error, info};
use url::Url;

use crate::errors::SearchIndexError;
use crate::interfaces::SearchIndexProvider;
use crate::opensearch::index_settings::IndexSettings;
use crate::opensearch::queries::build_search_body;
use record_indexer_shared::{
    MappingSet, SearchDocument, SearchHit, SearchRequest, SearchResponse,
};

/// OpenSearch implementation of [`SearchIndexProvider`].
///
/// All record types share one flat index; per-type mappings are merged
/// into that index's properties and documents are addressed by the
/// `{type}_{record_id}_{stage}` id convention.
pub struct OpenSearchProvider {
    client: OpenSearch,
    settings: IndexSettings,
}

impl OpenSearchProvider {
    /// Create a new provider connected to the given URL.
    pub fn new(url: &str, settings: IndexSettings) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(url).map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let transport = TransportBuilder::new(conn_pool)
            .disable_proxy()
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let client = OpenSearch::new(transport);

        info!(url = %url, "Created OpenSearch provider");

        Ok(Self { client, settings })
    }

    /// Parse a single hit object from a search response.
    fn parse_hit(hit: &Value) -> Option<SearchHit> {
        let id = hit["_id"].as_str()?.to_string();
        let source = hit["_source"].clone();
        let score = hit["_score"].as_f64().unwrap_or(0.0);
        Some(SearchHit { id, source, score })
    }

    /// Parse the hits section of a search response body.
    fn parse_search_response(body: &Value) -> SearchResponse {
        let total = body["hits"]["total"]["value"].as_u64().unwrap_or(0);
        let hits = body["hits"]["hits"]
            .as_array()
            .map(|hits| hits.iter().filter_map(Self::parse_hit).collect())
            .unwrap_or_default();
        SearchResponse { total, hits }
    }
}

#[async_trait]
impl SearchIndexProvider for OpenSearchProvider {
    async fn index_exists(&self, index: &str) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        Ok(response.status_code().is_success())
    }

    async fn create_index(&self, index: &str) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(index))
            .body(self.settings.to_creation_body())
            .send()
            .await
            .map_err(|e| SearchIndexError::index_creation(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Index creation failed");
            return Err(SearchIndexError::index_creation(format!(
                "Create failed with status {}: {}",
                status, error_body
            )));
        }

        info!(index = %index, "Created search index");
        Ok(())
    }

    async fn apply_mapping(
        &self,
        index: &str,
        type_name: &str,
        mapping: &MappingSet,
    ) -> Result<(), SearchIndexError> {
        let body = json!({
            "properties": mapping.to_properties()
        });

        let response = self
            .client
            .indices()
            .put_mapping(IndicesPutMappingParts::Index(&[index]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::mapping(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, type_name = %type_name, "Mapping update failed");
            return Err(SearchIndexError::mapping(format!(
                "Mapping for {} failed with status {}: {}",
                type_name, status, error_body
            )));
        }

        debug!(type_name = %type_name, "Applied type mapping");
        Ok(())
    }

    async fn upsert_document(
        &self,
        index: &str,
        type_name: &str,
        document: &SearchDocument,
    ) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .index(IndexParts::IndexId(index, &document.id))
            .body(document.to_json())
            .send()
            .await
            .map_err(|e| SearchIndexError::index(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, doc_id = %document.id, "Upsert failed");
            return Err(SearchIndexError::index(format!(
                "Upsert failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %document.id, type_name = %type_name, "Document upserted");
        Ok(())
    }

    async fn upsert_documents(
        &self,
        index: &str,
        type_name: &str,
        documents: &[SearchDocument],
    ) -> Result<(), SearchIndexError> {
        if documents.is_empty() {
            return Ok(());
        }

        let mut body: Vec<JsonBody<Value>> = Vec::with_capacity(documents.len() * 2);
        for document in documents {
            body.push(json!({ "index": { "_id": document.id } }).into());
            body.push(document.to_json().into());
        }

        let response = self
            .client
            .bulk(BulkParts::Index(index))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::bulk_index(type_name, e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, type_name = %type_name, "Bulk upsert failed");
            return Err(SearchIndexError::bulk_index(
                type_name,
                format!("Bulk failed with status {}: {}", status, error_body),
            ));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        if response_body["errors"].as_bool().unwrap_or(false) {
            error!(type_name = %type_name, "Bulk response reported item failures");
            return Err(SearchIndexError::bulk_index(
                type_name,
                "one or more documents failed to index",
            ));
        }

        debug!(type_name = %type_name, count = documents.len(), "Bulk upserted documents");
        Ok(())
    }

    async fn delete_document(
        &self,
        index: &str,
        type_name: &str,
        doc_id: &str,
    ) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .delete(DeleteParts::IndexId(index, doc_id))
            .send()
            .await
            .map_err(|e| SearchIndexError::delete(e.to_string()))?;

        let status = response.status_code();

        // 404 is acceptable, the document may not exist
        if !status.is_success() && status.as_u16() != 404 {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, doc_id = %doc_id, "Delete failed");
            return Err(SearchIndexError::delete(format!(
                "Delete failed with status {}: {}",
                status, error_body
            )));
        }

        debug!(doc_id = %doc_id, type_name = %type_name, "Document deleted");
        Ok(())
    }

    async fn refresh_index(&self, index: &str) -> Result<(), SearchIndexError> {
        let response = self
            .client
            .indices()
            .refresh(IndicesRefreshParts::Index(&[index]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            return Err(SearchIndexError::connection(format!(
                "Refresh failed with status {}",
                status
            )));
        }

        Ok(())
    }

    async fn search(
        &self,
        index: &str,
        request: &SearchRequest,
    ) -> Result<SearchResponse, SearchIndexError> {
        let body = build_search_body(request);

        let response = self
            .client
            .search(SearchParts::Index(&[index]))
            .body(body)
            .send()
            .await
            .map_err(|e| SearchIndexError::query(e.to_string()))?;

        let status = response.status_code();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            error!(status = %status, body = %error_body, "Search failed");
            return Err(SearchIndexError::query(format!(
                "Search failed with status {}: {}",
                status, error_body
            )));
        }

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| SearchIndexError::parse(e.to_string()))?;

        Ok(Self::parse_search_response(&response_body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hit() {
        let hit = json!({
            "_id": "Article_42_Draft",
            "_source": {
                "Title": "Hello",
                "ID": 42
            },
            "_score": 1.5
        });

        let parsed = OpenSearchProvider::parse_hit(&hit).unwrap();
        assert_eq!(parsed.id, "Article_42_Draft");
        assert_eq!(parsed.source["Title"], json!("Hello"));
        assert_eq!(parsed.score, 1.5);
    }

    #[test]
    fn test_parse_hit_without_id() {
        let hit = json!({
            "_source": { "Title": "Orphan" },
            "_score": 1.0
        });

        assert!(OpenSearchProvider::parse_hit(&hit).is_none());
    }

    #[test]
    fn test_parse_search_response() {
        let body = json!({
            "hits": {
                "total": { "value": 2 },
                "hits": [
                    { "_id": "Article_1_Draft", "_source": {}, "_score": 2.0 },
                    { "_id": "Article_2_Draft", "_source": {}, "_score": 1.0 }
                ]
            }
        });

        let response = OpenSearchProvider::parse_search_response(&body);
        assert_eq!(response.total, 2);
        assert_eq!(response.hits.len(), 2);
        assert_eq!(response.hits[0].id, "Article_1_Draft");
    }

    #[test]
    fn test_parse_search_response_empty() {
        let response = OpenSearchProvider::parse_search_response(&json!({}));
        assert_eq!(response.total, 0);
        assert!(response.hits.is_empty());
    }
}
