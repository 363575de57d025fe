//! Error types for the search engine provider boundary.

mod search_index_error;

pub use search_index_error::SearchIndexError;
