//! Index-level settings applied at creation time.

use serde_json::{json, Value};

/// Shard and replica settings for the record index.
#[derive(Debug, Clone)]
pub struct IndexSettings {
    /// Number of primary shards.
    pub shards: u32,
    /// Number of replicas.
    pub replicas: u32,
}

impl Default for IndexSettings {
    fn default() -> Self {
        Self {
            shards: 1,
            replicas: 1,
        }
    }
}

impl IndexSettings {
    /// Render the index creation body.
    ///
    /// Automatic date detection is disabled: date fields are declared
    /// explicitly by the derived mappings, with a fixed format.
    pub fn to_creation_body(&self) -> Value {
        json!({
            "settings": {
                "number_of_shards": self.shards,
                "number_of_replicas": self.replicas
            },
            "mappings": {
                "date_detection": false
            }
        })
    }
}
