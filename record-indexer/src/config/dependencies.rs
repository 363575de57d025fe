//! Dependency initialization and wiring for the record indexer.

use std::env;
use std::sync::Arc;

use tracing::info;

use crate::IndexingError;
use record_indexer_pipeline::{
    IndexManager, IndexingConfig, LifecycleSync, RecordStore, SearchService,
};
use record_indexer_repository::{IndexSettings, OpenSearchProvider};

/// Default OpenSearch URL.
const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Default record index name.
const DEFAULT_INDEX_NAME: &str = "records";

/// Indexer configuration resolved from the environment.
#[derive(Debug, Clone)]
pub struct IndexerConfig {
    /// OpenSearch server URL.
    pub opensearch_url: String,
    /// Name of the record index.
    pub index_name: String,
    /// Whether lifecycle indexing is globally disabled.
    pub indexing_disabled: bool,
}

impl IndexerConfig {
    /// Resolve configuration from environment variables.
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `SEARCH_INDEX`: record index name (default: records)
    /// - `SEARCH_INDEXING_DISABLED`: set to `1` or `true` to short-circuit
    ///   lifecycle indexing
    pub fn from_env() -> Self {
        let opensearch_url =
            env::var("OPENSEARCH_URL").unwrap_or_else(|_| DEFAULT_OPENSEARCH_URL.to_string());
        let index_name =
            env::var("SEARCH_INDEX").unwrap_or_else(|_| DEFAULT_INDEX_NAME.to_string());
        let indexing_disabled = env::var("SEARCH_INDEXING_DISABLED")
            .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
            .unwrap_or(false);

        Self {
            opensearch_url,
            index_name,
            indexing_disabled,
        }
    }
}

/// Container for all initialized dependencies.
pub struct Dependencies {
    /// The indexing service surface.
    pub service: Arc<SearchService>,
    /// Index administration (define, refresh).
    pub manager: IndexManager,
    /// Lifecycle hooks for the host's record mutation events.
    pub lifecycle: LifecycleSync,
}

impl std::fmt::Debug for Dependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dependencies").finish_non_exhaustive()
    }
}

impl Dependencies {
    /// Initialize all dependencies from environment variables, with the
    /// host's storage collaborator.
    pub fn new(store: Arc<dyn RecordStore>) -> Result<Self, IndexingError> {
        dotenv::dotenv().ok();
        Self::with_config(store, IndexerConfig::from_env())
    }

    /// Initialize from an explicit configuration.
    pub fn with_config(
        store: Arc<dyn RecordStore>,
        config: IndexerConfig,
    ) -> Result<Self, IndexingError> {
        info!(
            opensearch_url = %config.opensearch_url,
            index_name = %config.index_name,
            indexing_disabled = config.indexing_disabled,
            "Initializing record indexer"
        );

        let provider = OpenSearchProvider::new(&config.opensearch_url, IndexSettings::default())
            .map_err(|e| {
                IndexingError::config(format!("Failed to create OpenSearch provider: {}", e))
            })?;

        let service = Arc::new(SearchService::new(Arc::new(provider), config.index_name));
        let manager = IndexManager::new(service.clone(), store);
        let lifecycle = LifecycleSync::new(
            service.clone(),
            IndexingConfig {
                enabled: !config.indexing_disabled,
            },
        );

        Ok(Self {
            service,
            manager,
            lifecycle,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use record_indexer_pipeline::{PipelineError, Record, RecordType};

    // single test since the environment is process-global
    #[test]
    fn test_config_from_env() {
        env::remove_var("OPENSEARCH_URL");
        env::remove_var("SEARCH_INDEX");
        env::remove_var("SEARCH_INDEXING_DISABLED");

        let config = IndexerConfig::from_env();
        assert_eq!(config.opensearch_url, "http://localhost:9200");
        assert_eq!(config.index_name, "records");
        assert!(!config.indexing_disabled);

        for value in ["1", "true", "TRUE"] {
            env::set_var("SEARCH_INDEXING_DISABLED", value);
            assert!(IndexerConfig::from_env().indexing_disabled, "value {}", value);
        }
        env::set_var("SEARCH_INDEXING_DISABLED", "0");
        assert!(!IndexerConfig::from_env().indexing_disabled);
        env::remove_var("SEARCH_INDEXING_DISABLED");
    }

    struct EmptyStore;

    #[async_trait]
    impl RecordStore for EmptyStore {
        async fn indexable_types(&self) -> Result<Vec<Arc<dyn RecordType>>, PipelineError> {
            Ok(Vec::new())
        }

        async fn records_of(
            &self,
            _record_type: &dyn RecordType,
        ) -> Result<Vec<Arc<dyn Record>>, PipelineError> {
            Ok(Vec::new())
        }
    }

    #[tokio::test]
    async fn test_wiring_from_explicit_config() {
        let config = IndexerConfig {
            opensearch_url: "http://localhost:9200".to_string(),
            index_name: "records_test".to_string(),
            indexing_disabled: true,
        };

        let deps = Dependencies::with_config(Arc::new(EmptyStore), config).unwrap();
        assert_eq!(deps.service.index_name(), "records_test");
    }

    #[test]
    fn test_invalid_url_is_a_config_error() {
        let config = IndexerConfig {
            opensearch_url: "not a url".to_string(),
            index_name: "records".to_string(),
            indexing_disabled: false,
        };

        let error = Dependencies::with_config(Arc::new(EmptyStore), config).unwrap_err();
        assert!(matches!(error, IndexingError::ConfigError(_)));
    }
}
