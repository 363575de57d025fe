//! OpenSearch query builders.

use serde_json::{json, Value};

use record_indexer_shared::SearchRequest;

/// Build the search body for a request.
///
/// A non-empty field list produces a `multi_match` over those fields; an
/// empty list passes the query text through verbatim as a `query_string`
/// query.
pub fn build_search_body(request: &SearchRequest) -> Value {
    let query = if request.fields.is_empty() {
        json!({
            "query_string": {
                "query": request.query
            }
        })
    } else {
        json!({
            "multi_match": {
                "query": request.query,
                "fields": request.fields
            }
        })
    };

    let mut body = json!({ "query": query });
    if let Some(limit) = request.limit {
        body["size"] = json!(limit);
    }
    body
}
