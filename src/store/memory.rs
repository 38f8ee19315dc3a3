//! In-memory record store running before-validate hooks on every write

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

use super::errors::{StoreError, StoreResult};
use super::record::{Record, RecordId};
use crate::enforcer::RecordSnapshot;
use crate::hook::{BeforeValidateHook, HookHost, HookOptions};
use crate::observability::{log_event_with_fields, Event};
use crate::schema::{ModelSchema, SchemaError, SchemaLoader};

/// Field mirroring the record id when declared. Only the store writes it.
const ID_FIELD: &str = "id";

/// Minimal persistence layer with change tracking.
///
/// A write is persisted only when every registered hook accepts it;
/// a rejected write leaves the stored record untouched.
#[derive(Default)]
pub struct MemoryStore {
    schemas: HashMap<String, ModelSchema>,
    records: HashMap<String, BTreeMap<RecordId, Record>>,
    hooks: Vec<Box<dyn BeforeValidateHook>>,
    next_id: RecordId,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store with every model known to the loader.
    pub fn from_loader(loader: &SchemaLoader) -> StoreResult<Self> {
        let mut store = Self::new();
        for schema in loader.all_schemas() {
            store.define(schema.clone())?;
        }
        Ok(store)
    }

    /// Declares a model. Redefinition is rejected.
    pub fn define(&mut self, schema: ModelSchema) -> StoreResult<()> {
        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed_schema("<in-memory>", e))?;

        if self.schemas.contains_key(&schema.model) {
            return Err(SchemaError::schema_immutable(&schema.model).into());
        }

        self.records.insert(schema.model.clone(), BTreeMap::new());
        self.schemas.insert(schema.model.clone(), schema);
        Ok(())
    }

    pub fn schema(&self, model: &str) -> StoreResult<&ModelSchema> {
        self.schemas
            .get(model)
            .ok_or_else(|| StoreError::UnknownModel(model.to_string()))
    }

    pub fn hook_count(&self) -> usize {
        self.hooks.len()
    }

    /// Creates a record from the given field values.
    pub fn create<I, K>(&mut self, model: &str, values: I) -> StoreResult<Record>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let schema = self.schema(model)?;
        let id = self.next_id + 1;

        let mut snapshot = RecordSnapshot::new_record();
        let mut fields = Map::new();
        for (field, value) in values {
            let field = field.into();
            check_declared(schema, &field)?;
            if field == ID_FIELD && value != Value::from(id) {
                return Err(StoreError::RecordIdAssigned {
                    model: model.to_string(),
                    id,
                });
            }
            snapshot.record_change(field.clone(), None, value.clone());
            fields.insert(field, value);
        }

        self.run_hooks(schema, &snapshot, &HookOptions::default())?;
        let assign_id = schema.has_field(ID_FIELD) && !fields.contains_key(ID_FIELD);

        self.next_id = id;
        if assign_id {
            fields.insert(ID_FIELD.to_string(), Value::from(id));
        }

        let record = Record {
            id,
            model: model.to_string(),
            values: fields,
        };
        self.records
            .entry(model.to_string())
            .or_default()
            .insert(id, record.clone());

        let id = id.to_string();
        log_event_with_fields(Event::RecordCreated, &[("id", id.as_str()), ("model", model)]);
        Ok(record)
    }

    /// Applies changes to an existing record.
    ///
    /// Only values that differ from the stored ones count as changed,
    /// in the order given.
    pub fn update<I, K>(
        &mut self,
        model: &str,
        id: RecordId,
        changes: I,
        options: HookOptions,
    ) -> StoreResult<Record>
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<String>,
    {
        let schema = self.schema(model)?;
        let current = self.get(model, id)?;

        let mut snapshot = RecordSnapshot::existing();
        for (field, value) in changes {
            let field = field.into();
            check_declared(schema, &field)?;
            let previous = current.get(&field);
            if previous != Some(&value) {
                if field == ID_FIELD {
                    return Err(StoreError::RecordIdAssigned {
                        model: model.to_string(),
                        id,
                    });
                }
                snapshot.record_change(field, previous.cloned(), value);
            }
        }

        self.run_hooks(schema, &snapshot, &options)?;

        let record = self
            .records
            .get_mut(model)
            .and_then(|records| records.get_mut(&id))
            .ok_or_else(|| StoreError::RecordNotFound {
                model: model.to_string(),
                id,
            })?;
        for change in snapshot.changes() {
            record.values.insert(change.field.clone(), change.value.clone());
        }

        let changed: Vec<_> = snapshot.changed_fields().collect();
        let changed = changed.join(",");
        let id = id.to_string();
        log_event_with_fields(
            Event::UpdatePersisted,
            &[("fields", changed.as_str()), ("id", id.as_str()), ("model", model)],
        );
        Ok(record.clone())
    }

    pub fn get(&self, model: &str, id: RecordId) -> StoreResult<&Record> {
        let records = self
            .records
            .get(model)
            .ok_or_else(|| StoreError::UnknownModel(model.to_string()))?;
        records.get(&id).ok_or_else(|| StoreError::RecordNotFound {
            model: model.to_string(),
            id,
        })
    }

    fn run_hooks(
        &self,
        schema: &ModelSchema,
        snapshot: &RecordSnapshot,
        options: &HookOptions,
    ) -> StoreResult<()> {
        for hook in &self.hooks {
            hook.before_validate(schema, snapshot, options)?;
        }
        Ok(())
    }
}

impl HookHost for MemoryStore {
    fn add_before_validate(&mut self, hook: Box<dyn BeforeValidateHook>) {
        self.hooks.push(hook);
    }
}

fn check_declared(schema: &ModelSchema, field: &str) -> StoreResult<()> {
    if schema.has_field(field) {
        Ok(())
    } else {
        Err(StoreError::UnknownField {
            model: schema.model.clone(),
            field: field.to_string(),
        })
    }
}
