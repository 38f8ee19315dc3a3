//! Persisted records

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub type RecordId = u64;

/// A persisted record of one model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    pub model: String,
    /// Field values; unset fields are absent
    pub values: Map<String, Value>,
}

impl Record {
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.values.get(field)
    }
}
