//! Record snapshot: the pending change set of one write

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One changed field of a pending write.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldChange {
    pub field: String,
    /// Previously persisted value.
    ///
    /// `None` means the field was never set. `Some(Value::Null)` means it
    /// was persisted as an explicit null.
    #[serde(
        default,
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub previous: Option<Value>,
    /// Attempted new value
    pub value: Value,
}

impl FieldChange {
    /// Returns true if a real (non-null) value was previously persisted
    pub fn had_value(&self) -> bool {
        matches!(&self.previous, Some(v) if !v.is_null())
    }
}

// A present key always deserializes to `Some`, keeping explicit null
// distinct from an absent key.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Read-only view of a record and its pending changes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordSnapshot {
    /// True while the record has not been persisted yet
    #[serde(default)]
    is_new_record: bool,
    /// Changes in the order they were recorded
    #[serde(default)]
    changes: Vec<FieldChange>,
}

impl RecordSnapshot {
    /// Snapshot of a record that is about to be created
    pub fn new_record() -> Self {
        Self {
            is_new_record: true,
            changes: Vec::new(),
        }
    }

    /// Snapshot of an already persisted record
    pub fn existing() -> Self {
        Self::default()
    }

    /// Records a change.
    ///
    /// Changing the same field twice keeps its original position and
    /// previous value; only the new value is replaced.
    pub fn with_change(
        mut self,
        field: impl Into<String>,
        previous: Option<Value>,
        value: Value,
    ) -> Self {
        self.record_change(field, previous, value);
        self
    }

    pub fn record_change(&mut self, field: impl Into<String>, previous: Option<Value>, value: Value) {
        let field = field.into();
        match self.changes.iter_mut().find(|c| c.field == field) {
            Some(existing) => existing.value = value,
            None => self.changes.push(FieldChange {
                field,
                previous,
                value,
            }),
        }
    }

    pub fn is_new_record(&self) -> bool {
        self.is_new_record
    }

    pub fn changes(&self) -> &[FieldChange] {
        &self.changes
    }

    /// Changed field names in recording order
    pub fn changed_fields(&self) -> impl Iterator<Item = &str> {
        self.changes.iter().map(|c| c.field.as_str())
    }

    pub fn has_changes(&self) -> bool {
        !self.changes.is_empty()
    }
}
