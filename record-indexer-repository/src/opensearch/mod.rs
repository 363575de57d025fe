//! OpenSearch implementation of the search index provider.

mod client;
mod index_settings;
pub mod queries;

pub use client::OpenSearchProvider;
pub use index_settings::IndexSettings;
