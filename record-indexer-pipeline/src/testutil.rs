//! Shared test fixtures: in-memory record types, records, a mock search
//! provider, and a mock record store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::errors::PipelineError;
use crate::store::{Record, RecordStore, RecordType};
use record_indexer_repository::{SearchIndexError, SearchIndexProvider};
use record_indexer_shared::{
    FieldValue, MappingSet, SearchDocument, SearchRequest, SearchResponse, Stage,
};

/// A record type built up field by field.
pub struct TestRecordType {
    name: String,
    searchable: Vec<String>,
    schema: HashMap<String, String>,
    hierarchy: bool,
}

impl TestRecordType {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            searchable: Vec::new(),
            schema: HashMap::new(),
            hierarchy: false,
        }
    }

    /// Declare a searchable field backed by a storage column.
    pub fn with_field(mut self, name: &str, storage_type: &str) -> Self {
        self.searchable.push(name.to_string());
        self.schema.insert(name.to_string(), storage_type.to_string());
        self
    }

    /// Declare a searchable field with no storage column.
    pub fn with_searchable_field(mut self, name: &str) -> Self {
        self.searchable.push(name.to_string());
        self
    }

    pub fn with_hierarchy(mut self) -> Self {
        self.hierarchy = true;
        self
    }
}

impl RecordType for TestRecordType {
    fn class_name(&self) -> &str {
        &self.name
    }

    fn searchable_fields(&self) -> Vec<String> {
        self.searchable.clone()
    }

    fn storage_schema(&self) -> HashMap<String, String> {
        self.schema.clone()
    }

    fn supports_hierarchy(&self) -> bool {
        self.hierarchy
    }
}

/// A record snapshot built up value by value.
pub struct TestRecord {
    id: i64,
    record_type: Arc<TestRecordType>,
    values: Vec<(String, FieldValue)>,
    parent: Option<Arc<TestRecord>>,
    staging: bool,
    stage: Stage,
    public_view: bool,
    auto_index: bool,
    ancestry: Option<Vec<String>>,
}

impl TestRecord {
    pub fn new(id: i64, record_type: Arc<TestRecordType>) -> Self {
        Self {
            id,
            record_type,
            values: Vec::new(),
            parent: None,
            staging: false,
            stage: Stage::Draft,
            public_view: true,
            auto_index: true,
            ancestry: None,
        }
    }

    pub fn with_value(mut self, name: &str, value: FieldValue) -> Self {
        self.values.push((name.to_string(), value));
        self
    }

    pub fn with_parent(mut self, parent: Arc<TestRecord>) -> Self {
        self.parent = Some(parent);
        self
    }

    pub fn with_staging(mut self) -> Self {
        self.staging = true;
        self
    }

    pub fn at_stage(mut self, stage: Stage) -> Self {
        self.stage = stage;
        self
    }

    pub fn with_public_view(mut self, public_view: bool) -> Self {
        self.public_view = public_view;
        self
    }

    pub fn without_auto_index(mut self) -> Self {
        self.auto_index = false;
        self
    }

    pub fn with_ancestry(mut self, ancestry: Vec<String>) -> Self {
        self.ancestry = Some(ancestry);
        self
    }
}

impl Record for TestRecord {
    fn id(&self) -> i64 {
        self.id
    }

    fn record_type(&self) -> Arc<dyn RecordType> {
        self.record_type.clone()
    }

    fn field(&self, name: &str) -> Option<FieldValue> {
        self.values
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.clone())
    }

    fn has_field(&self, name: &str) -> bool {
        self.values.iter().any(|(n, _)| n == name)
    }

    fn parent(&self) -> Option<Arc<dyn Record>> {
        self.parent
            .clone()
            .map(|parent| parent as Arc<dyn Record>)
    }

    fn can_view_public(&self) -> bool {
        self.public_view
    }

    fn supports_staging(&self) -> bool {
        self.staging
    }

    fn current_stage(&self) -> Stage {
        self.stage
    }

    fn ancestry_class_names(&self) -> Vec<String> {
        match &self.ancestry {
            Some(ancestry) => ancestry.clone(),
            None => vec![self.record_type.class_name().to_string()],
        }
    }

    fn auto_index(&self) -> bool {
        self.auto_index
    }
}

/// Mock search provider recording index state in memory.
pub struct MockProvider {
    pub exists: AtomicBool,
    pub create_calls: AtomicUsize,
    pub upsert_calls: AtomicUsize,
    pub bulk_calls: AtomicUsize,
    pub delete_calls: AtomicUsize,
    pub refresh_calls: AtomicUsize,
    /// type_name -> applied mapping properties
    pub mappings: Mutex<HashMap<String, Value>>,
    /// doc_id -> document source
    pub documents: Mutex<HashMap<String, Value>>,
    /// Inject a bulk failure for this type name.
    pub fail_bulk_for: Mutex<Option<String>>,
}

impl MockProvider {
    pub fn new() -> Self {
        Self {
            exists: AtomicBool::new(false),
            create_calls: AtomicUsize::new(0),
            upsert_calls: AtomicUsize::new(0),
            bulk_calls: AtomicUsize::new(0),
            delete_calls: AtomicUsize::new(0),
            refresh_calls: AtomicUsize::new(0),
            mappings: Mutex::new(HashMap::new()),
            documents: Mutex::new(HashMap::new()),
            fail_bulk_for: Mutex::new(None),
        }
    }

    pub fn document(&self, doc_id: &str) -> Option<Value> {
        self.documents.lock().unwrap().get(doc_id).cloned()
    }

    pub fn document_count(&self) -> usize {
        self.documents.lock().unwrap().len()
    }
}

#[async_trait]
impl SearchIndexProvider for MockProvider {
    async fn index_exists(&self, _index: &str) -> Result<bool, SearchIndexError> {
        Ok(self.exists.load(Ordering::SeqCst))
    }

    async fn create_index(&self, _index: &str) -> Result<(), SearchIndexError> {
        self.exists.store(true, Ordering::SeqCst);
        self.create_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn apply_mapping(
        &self,
        _index: &str,
        type_name: &str,
        mapping: &MappingSet,
    ) -> Result<(), SearchIndexError> {
        self.mappings
            .lock()
            .unwrap()
            .insert(type_name.to_string(), mapping.to_properties());
        Ok(())
    }

    async fn upsert_document(
        &self,
        _index: &str,
        _type_name: &str,
        document: &SearchDocument,
    ) -> Result<(), SearchIndexError> {
        self.upsert_calls.fetch_add(1, Ordering::SeqCst);
        self.documents
            .lock()
            .unwrap()
            .insert(document.id.clone(), document.to_json());
        Ok(())
    }

    async fn upsert_documents(
        &self,
        _index: &str,
        type_name: &str,
        documents: &[SearchDocument],
    ) -> Result<(), SearchIndexError> {
        self.bulk_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_bulk_for.lock().unwrap().as_deref() == Some(type_name) {
            return Err(SearchIndexError::bulk_index(type_name, "injected failure"));
        }
        let mut stored = self.documents.lock().unwrap();
        for document in documents {
            stored.insert(document.id.clone(), document.to_json());
        }
        Ok(())
    }

    async fn delete_document(
        &self,
        _index: &str,
        _type_name: &str,
        doc_id: &str,
    ) -> Result<(), SearchIndexError> {
        self.delete_calls.fetch_add(1, Ordering::SeqCst);
        self.documents.lock().unwrap().remove(doc_id);
        Ok(())
    }

    async fn refresh_index(&self, _index: &str) -> Result<(), SearchIndexError> {
        self.refresh_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn search(
        &self,
        _index: &str,
        _request: &SearchRequest,
    ) -> Result<SearchResponse, SearchIndexError> {
        Ok(SearchResponse::empty())
    }
}

/// Mock record store serving fixed types and records.
pub struct MockStore {
    types: Vec<Arc<dyn RecordType>>,
    records: HashMap<String, Vec<Arc<dyn Record>>>,
}

impl MockStore {
    pub fn new() -> Self {
        Self {
            types: Vec::new(),
            records: HashMap::new(),
        }
    }

    pub fn with_records(
        mut self,
        record_type: Arc<TestRecordType>,
        records: Vec<Arc<TestRecord>>,
    ) -> Self {
        let class_name = record_type.class_name().to_string();
        self.types.push(record_type as Arc<dyn RecordType>);
        self.records.insert(
            class_name,
            records
                .into_iter()
                .map(|record| record as Arc<dyn Record>)
                .collect(),
        );
        self
    }
}

#[async_trait]
impl RecordStore for MockStore {
    async fn indexable_types(&self) -> Result<Vec<Arc<dyn RecordType>>, PipelineError> {
        Ok(self.types.clone())
    }

    async fn records_of(
        &self,
        record_type: &dyn RecordType,
    ) -> Result<Vec<Arc<dyn Record>>, PipelineError> {
        Ok(self
            .records
            .get(record_type.class_name())
            .cloned()
            .unwrap_or_default())
    }
}
