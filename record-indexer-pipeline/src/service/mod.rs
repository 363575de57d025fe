//! The indexing service surface.
//!
//! Ties the schema mapper, document builder, bulk buffer, and search
//! engine provider together behind the operations the host calls:
//! `index`, `remove`, `start_bulk_index`, `end_bulk_index`, `search`.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{debug, instrument};

use crate::buffer::BulkBuffer;
use crate::builder::DocumentBuilder;
use crate::errors::PipelineError;
use crate::schema::SchemaMapper;
use crate::store::Record;
use record_indexer_repository::SearchIndexProvider;
use record_indexer_shared::{document_id, index_type_name, SearchRequest, SearchResponse, Stage};

/// The record indexing service.
///
/// Indexing and removal run synchronously relative to the triggering
/// call, so index staleness is bounded by one engine round trip — unless
/// a bulk session is open, in which case documents accumulate in the
/// buffer until `end_bulk_index`.
pub struct SearchService {
    provider: Arc<dyn SearchIndexProvider>,
    mapper: SchemaMapper,
    builder: DocumentBuilder,
    buffer: Mutex<BulkBuffer>,
    index: String,
}

impl SearchService {
    pub fn new(provider: Arc<dyn SearchIndexProvider>, index: impl Into<String>) -> Self {
        Self::with_components(provider, SchemaMapper::new(), DocumentBuilder::new(), index)
    }

    /// Construct with a pre-configured mapper and builder (e.g. with
    /// registered mutators).
    pub fn with_components(
        provider: Arc<dyn SearchIndexProvider>,
        mapper: SchemaMapper,
        builder: DocumentBuilder,
        index: impl Into<String>,
    ) -> Self {
        Self {
            provider,
            mapper,
            builder,
            buffer: Mutex::new(BulkBuffer::new()),
            index: index.into(),
        }
    }

    pub fn index_name(&self) -> &str {
        &self.index
    }

    pub fn provider(&self) -> Arc<dyn SearchIndexProvider> {
        self.provider.clone()
    }

    pub fn mapper(&self) -> &SchemaMapper {
        &self.mapper
    }

    /// Create or update the document for `record` at `stage`.
    ///
    /// Buffered while a bulk session is active, transmitted immediately
    /// otherwise.
    pub async fn index(&self, record: &dyn Record, stage: Stage) -> Result<(), PipelineError> {
        let record_type = record.record_type();
        let type_name = index_type_name(record_type.class_name());
        let mapping = self.mapper.derive_mapping(record_type.as_ref());
        let document = self.builder.build(record, stage, &mapping);

        {
            let mut buffer = self.buffer.lock().await;
            if buffer.is_active() {
                debug!(doc_id = %document.id, "Buffered document for bulk session");
                buffer.push(&type_name, document);
                return Ok(());
            }
        }

        self.provider
            .upsert_document(&self.index, &type_name, &document)
            .await?;
        self.provider.refresh_index(&self.index).await?;
        Ok(())
    }

    /// Remove the document for `record` at `stage`.
    pub async fn remove(&self, record: &dyn Record, stage: Stage) -> Result<(), PipelineError> {
        let record_type = record.record_type();
        let type_name = index_type_name(record_type.class_name());
        let doc_id = document_id(&type_name, record.id(), stage);

        self.provider
            .delete_document(&self.index, &type_name, &doc_id)
            .await?;
        Ok(())
    }

    /// Begin a bulk session: subsequent `index` calls buffer instead of
    /// transmitting.
    pub async fn start_bulk_index(&self) {
        self.buffer.lock().await.start();
    }

    /// Whether a bulk session is currently active.
    pub async fn is_bulk_active(&self) -> bool {
        self.buffer.lock().await.is_active()
    }

    /// End the bulk session, transmitting buffered documents per type.
    ///
    /// On a failed type the session stays active with that type's bucket
    /// (and all undelivered ones) retained, so a retried call resumes
    /// where this one failed. Only a fully drained flush deactivates the
    /// session.
    #[instrument(skip(self))]
    pub async fn end_bulk_index(&self) -> Result<(), PipelineError> {
        loop {
            let next = self.buffer.lock().await.take_next();
            let Some((type_name, documents)) = next else {
                break;
            };

            let count = documents.len();
            if let Err(error) = self
                .provider
                .upsert_documents(&self.index, &type_name, &documents)
                .await
            {
                self.buffer.lock().await.restore(type_name.clone(), documents);
                return Err(PipelineError::bulk_flush(type_name, error));
            }
            debug!(type_name = %type_name, count = count, "Flushed buffered documents");
        }

        self.buffer.lock().await.deactivate();
        self.provider.refresh_index(&self.index).await?;
        Ok(())
    }

    /// Search the record index. A non-empty `fields` list matches against
    /// those fields; an empty list passes the query through verbatim.
    pub async fn search(
        &self,
        query: &str,
        fields: &[String],
    ) -> Result<SearchResponse, PipelineError> {
        let request = SearchRequest::new(query).with_fields(fields.to_vec());
        Ok(self.provider.search(&self.index, &request).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testutil::{MockProvider, TestRecord, TestRecordType};
    use record_indexer_shared::FieldValue;
    use std::sync::atomic::Ordering;

    fn article_type() -> Arc<TestRecordType> {
        Arc::new(TestRecordType::new("Article").with_field("Title", "Varchar(255)"))
    }

    fn service() -> (Arc<MockProvider>, SearchService) {
        let provider = Arc::new(MockProvider::new());
        let service = SearchService::new(provider.clone(), "records");
        (provider, service)
    }

    #[tokio::test]
    async fn test_unbuffered_index_transmits_immediately() {
        let (provider, service) = service();
        let record = TestRecord::new(42, article_type())
            .with_value("Title", FieldValue::from("Hello"));

        service.index(&record, Stage::Draft).await.unwrap();

        assert_eq!(provider.upsert_calls.load(Ordering::SeqCst), 1);
        let doc = provider.document("Article_42_Draft").unwrap();
        assert_eq!(doc["Title"], serde_json::json!("Hello"));
    }

    #[tokio::test]
    async fn test_buffering_is_transparent_to_end_state() {
        let r1 = TestRecord::new(1, article_type()).with_value("Title", FieldValue::from("One"));
        let r2 = TestRecord::new(2, article_type()).with_value("Title", FieldValue::from("Two"));

        let (direct_provider, direct) = service();
        direct.index(&r1, Stage::Draft).await.unwrap();
        direct.index(&r2, Stage::Draft).await.unwrap();

        let (buffered_provider, buffered) = service();
        buffered.start_bulk_index().await;
        buffered.index(&r1, Stage::Draft).await.unwrap();
        buffered.index(&r2, Stage::Draft).await.unwrap();
        assert_eq!(buffered_provider.document_count(), 0);
        buffered.end_bulk_index().await.unwrap();

        assert_eq!(
            *direct_provider.documents.lock().unwrap(),
            *buffered_provider.documents.lock().unwrap()
        );
        assert!(!buffered.is_bulk_active().await);
    }

    #[tokio::test]
    async fn test_failed_flush_retains_undelivered_types() {
        let (provider, service) = service();
        *provider.fail_bulk_for.lock().unwrap() = Some("Article".to_string());

        let record = TestRecord::new(1, article_type());
        service.start_bulk_index().await;
        service.index(&record, Stage::Draft).await.unwrap();

        let error = service.end_bulk_index().await.unwrap_err();
        assert!(matches!(
            error,
            PipelineError::BulkFlushError { ref type_name, .. } if type_name == "Article"
        ));
        assert!(service.is_bulk_active().await);

        // clearing the fault lets a retried flush deliver the same docs
        *provider.fail_bulk_for.lock().unwrap() = None;
        service.end_bulk_index().await.unwrap();
        assert!(provider.document("Article_1_Draft").is_some());
        assert!(!service.is_bulk_active().await);
    }

    #[tokio::test]
    async fn test_remove_deletes_the_stage_document() {
        let (provider, service) = service();
        let record = TestRecord::new(42, article_type()).with_staging();

        service.index(&record, Stage::Live).await.unwrap();
        assert!(provider.document("Article_42_Live").is_some());

        service.remove(&record, Stage::Live).await.unwrap();
        assert!(provider.document("Article_42_Live").is_none());
        assert_eq!(provider.delete_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_empty_bulk_session_ends_cleanly() {
        let (provider, service) = service();
        service.start_bulk_index().await;
        service.end_bulk_index().await.unwrap();

        assert_eq!(provider.bulk_calls.load(Ordering::SeqCst), 0);
        assert!(!service.is_bulk_active().await);
    }
}
