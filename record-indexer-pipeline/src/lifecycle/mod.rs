//! Record lifecycle reactions.
//!
//! A stateless reaction table mapping record lifecycle events to index
//! operations on the affected stage's document. No state is held beyond
//! the call.

use std::sync::Arc;

use tracing::debug;

use crate::errors::PipelineError;
use crate::service::SearchService;
use crate::store::Record;
use record_indexer_shared::Stage;

/// Configuration injected into [`LifecycleSync`] at construction. The
/// disabled flag short-circuits every hook with `Ok(())`.
#[derive(Debug, Clone)]
pub struct IndexingConfig {
    /// Whether lifecycle indexing is enabled.
    pub enabled: bool,
}

impl Default for IndexingConfig {
    fn default() -> Self {
        Self { enabled: true }
    }
}

/// Reacts to record lifecycle events by indexing or removing the
/// affected stage's document.
pub struct LifecycleSync {
    service: Arc<SearchService>,
    config: IndexingConfig,
}

impl LifecycleSync {
    pub fn new(service: Arc<SearchService>, config: IndexingConfig) -> Self {
        Self { service, config }
    }

    /// A record was written: index it at its current stage.
    pub async fn after_write(&self, record: &dyn Record) -> Result<(), PipelineError> {
        if !self.config.enabled || !record.auto_index() {
            debug!(record_id = record.id(), "Skipping index after write");
            return Ok(());
        }

        self.service.index(record, record.current_stage()).await
    }

    /// A record was deleted: remove its current stage's document.
    pub async fn after_delete(&self, record: &dyn Record) -> Result<(), PipelineError> {
        if !self.config.enabled {
            return Ok(());
        }

        self.service.remove(record, record.current_stage()).await
    }

    /// A record was published: index its Live document.
    pub async fn after_publish(&self, record: &dyn Record) -> Result<(), PipelineError> {
        if !self.config.enabled || !record.auto_index() {
            return Ok(());
        }

        self.service.index(record, Stage::Live).await
    }

    /// A record was unpublished: remove the Live document, then reindex
    /// the Draft document. The record must vanish from public search
    /// results without losing its editable-stage searchability.
    pub async fn after_unpublish(&self, record: &dyn Record) -> Result<(), PipelineError> {
        if !self.config.enabled {
            return Ok(());
        }

        self.service.remove(record, Stage::Live).await?;
        self.service.index(record, Stage::Draft).await
    }
}
