//! In-memory buffering for bulk index sessions.
//!
//! While a session is active, documents accumulate in per-type buckets
//! instead of being transmitted. The buffer assumes a single producer
//! drives a session to completion before another begins; the service
//! guards it with a mutex.

use std::collections::VecDeque;

use record_indexer_shared::SearchDocument;

/// Per-type document buckets for one bulk session.
#[derive(Debug, Default)]
pub struct BulkBuffer {
    active: bool,
    buckets: VecDeque<(String, Vec<SearchDocument>)>,
}

impl BulkBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a session. Any leftovers from an abandoned session are
    /// dropped; a retried full resync resends everything anyway.
    pub fn start(&mut self) {
        self.active = true;
        self.buckets.clear();
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    /// Append a document to its type's bucket, keeping type order by
    /// first appearance.
    pub fn push(&mut self, type_name: &str, document: SearchDocument) {
        match self
            .buckets
            .iter_mut()
            .find(|(name, _)| name == type_name)
        {
            Some((_, documents)) => documents.push(document),
            None => self
                .buckets
                .push_back((type_name.to_string(), vec![document])),
        }
    }

    /// Remove and return the next type's bucket for transmission.
    pub fn take_next(&mut self) -> Option<(String, Vec<SearchDocument>)> {
        self.buckets.pop_front()
    }

    /// Put a bucket back at the front after a failed transmit, so a
    /// retried flush picks it up first.
    pub fn restore(&mut self, type_name: String, documents: Vec<SearchDocument>) {
        self.buckets.push_front((type_name, documents));
    }

    /// End the session, clearing any state.
    pub fn deactivate(&mut self) {
        self.active = false;
        self.buckets.clear();
    }

    /// Number of buffered documents across all types.
    pub fn pending(&self) -> usize {
        self.buckets.iter().map(|(_, docs)| docs.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.buckets.is_empty()
    }
}
