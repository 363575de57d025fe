//! Trait boundary to the search engine.

mod search_index_provider;

pub use search_index_provider::SearchIndexProvider;
