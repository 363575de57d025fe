//! Index administration: creation, mapping application, full resync.

use std::sync::Arc;

use tracing::{info, instrument};

use crate::errors::PipelineError;
use crate::service::SearchService;
use crate::store::RecordStore;
use record_indexer_shared::{index_type_name, Stage};

/// Creates the index and drives full resynchronization.
pub struct IndexManager {
    service: Arc<SearchService>,
    store: Arc<dyn RecordStore>,
}

impl IndexManager {
    pub fn new(service: Arc<SearchService>, store: Arc<dyn RecordStore>) -> Self {
        Self { service, store }
    }

    /// Create the index if absent and apply every indexable type's
    /// derived mapping.
    ///
    /// Idempotent: running against an already-configured index re-applies
    /// the same mappings with no adverse effect.
    #[instrument(skip(self))]
    pub async fn define(&self) -> Result<(), PipelineError> {
        let provider = self.service.provider();
        let index = self.service.index_name();

        if !provider.index_exists(index).await? {
            provider.create_index(index).await?;
        }

        let types = self.store.indexable_types().await?;
        for record_type in &types {
            let type_name = index_type_name(record_type.class_name());
            let mapping = self.service.mapper().derive_mapping(record_type.as_ref());
            provider
                .apply_mapping(index, &type_name, &mapping)
                .await?;
        }

        info!(type_count = types.len(), "Defined index mappings");
        Ok(())
    }

    /// Full resynchronization: rebuild and bulk-index every record of
    /// every indexable type.
    ///
    /// The disaster-recovery / initial-seed path. Slow by design — run it
    /// off any request-serving path. Safe to retry from scratch after a
    /// failure: per-document upserts are idempotent.
    #[instrument(skip(self))]
    pub async fn refresh(&self) -> Result<(), PipelineError> {
        self.service.start_bulk_index().await;

        for record_type in self.store.indexable_types().await? {
            let records = self.store.records_of(record_type.as_ref()).await?;
            let count = records.len();

            for record in records {
                self.service.index(record.as_ref(), Stage::Draft).await?;
                if record.supports_staging() {
                    self.service.index(record.as_ref(), Stage::Live).await?;
                }
            }

            info!(
                class_name = %record_type.class_name(),
                record_count = count,
                "Buffered records for reindex"
            );
        }

        self.service.end_bulk_index().await
    }
}
