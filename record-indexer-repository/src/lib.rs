//! # Record Indexer Repository
//!
//! This crate provides the trait boundary to the search engine and a
//! concrete implementation for OpenSearch. The wire protocol is opaque to
//! the rest of the indexer: the pipeline only depends on the
//! [`SearchIndexProvider`] trait and the document shape from
//! `record-indexer-shared`.

pub mod errors;
pub mod interfaces;
pub mod opensearch;

pub use errors::SearchIndexError;
pub use interfaces::SearchIndexProvider;
pub use opensearch::{IndexSettings, OpenSearchProvider};
