//! Search request and response shapes exposed upward by the indexer.

use serde_json::Value;

/// A search request against the record index.
///
/// When `fields` is non-empty the query is matched against those fields;
/// otherwise the query text is passed through to the engine verbatim.
#[derive(Debug, Clone)]
pub struct SearchRequest {
    /// The query text.
    pub query: String,
    /// Optional list of fields to match against.
    pub fields: Vec<String>,
    /// Optional result size cap.
    pub limit: Option<usize>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            fields: Vec::new(),
            limit: None,
        }
    }

    /// Restrict matching to the given fields.
    pub fn with_fields(mut self, fields: Vec<String>) -> Self {
        self.fields = fields;
        self
    }

    /// Cap the number of returned hits.
    pub fn with_limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// A single search hit.
#[derive(Debug, Clone)]
pub struct SearchHit {
    /// The document id (`{type}_{record_id}_{stage}`).
    pub id: String,
    /// The stored document source.
    pub source: Value,
    /// Engine relevance score.
    pub score: f64,
}

/// A page of search results.
#[derive(Debug, Clone)]
pub struct SearchResponse {
    /// Total number of matching documents.
    pub total: u64,
    /// The returned hits.
    pub hits: Vec<SearchHit>,
}

impl SearchResponse {
    /// An empty result set.
    pub fn empty() -> Self {
        Self {
            total: 0,
            hits: Vec::new(),
        }
    }
}
