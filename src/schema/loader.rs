//! Schema loader for model declarations
//!
//! - Schemas stored at `<schema_dir>/model_<name>.json`
//! - One file per model
//! - Malformed schema files cause startup failure (FATAL)

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{SchemaError, SchemaResult};
use super::types::ModelSchema;
use crate::observability::{log_event_with_fields, Event};

/// Reads model schema files from disk and keeps an in-memory registry.
///
/// Declarations are fixed once registered; redefinition is rejected.
pub struct SchemaLoader {
    schema_dir: PathBuf,
    schemas: HashMap<String, ModelSchema>,
}

impl SchemaLoader {
    /// Creates a loader reading from `schema_dir`.
    pub fn new(schema_dir: &Path) -> Self {
        Self {
            schema_dir: schema_dir.to_path_buf(),
            schemas: HashMap::new(),
        }
    }

    /// Returns the schema directory path.
    pub fn schema_dir(&self) -> &Path {
        &self.schema_dir
    }

    /// Loads all schema files from the schema directory.
    ///
    /// A missing directory is treated as an empty schema set.
    pub fn load_all(&mut self) -> SchemaResult<()> {
        if !self.schema_dir.exists() {
            return Ok(());
        }

        let entries = fs::read_dir(&self.schema_dir).map_err(|e| {
            SchemaError::malformed_schema(
                self.schema_dir.display().to_string(),
                format!("Failed to read schema directory: {}", e),
            )
        })?;

        let mut paths = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| {
                SchemaError::malformed_schema(
                    self.schema_dir.display().to_string(),
                    format!("Failed to read directory entry: {}", e),
                )
            })?;
            let path = entry.path();
            if path.extension().is_some_and(|ext| ext == "json") {
                paths.push(path);
            }
        }
        // Directory order is platform dependent.
        paths.sort();

        for path in &paths {
            self.load_schema_file(path)?;
        }

        let count = self.schemas.len().to_string();
        let dir = self.schema_dir.display().to_string();
        log_event_with_fields(
            Event::SchemasLoaded,
            &[("count", count.as_str()), ("schema_dir", dir.as_str())],
        );

        Ok(())
    }

    fn load_schema_file(&mut self, path: &Path) -> SchemaResult<()> {
        let content = fs::read_to_string(path).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to read file: {}", e),
            )
        })?;

        let schema: ModelSchema = serde_json::from_str(&content).map_err(|e| {
            SchemaError::malformed_schema(path.display().to_string(), format!("Invalid JSON: {}", e))
        })?;

        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed_schema(path.display().to_string(), e))?;

        if self.schemas.contains_key(&schema.model) {
            return Err(SchemaError::schema_immutable(&schema.model));
        }

        self.schemas.insert(schema.model.clone(), schema);
        Ok(())
    }

    /// Registers a schema directly (for tests or programmatic definition).
    pub fn register(&mut self, schema: ModelSchema) -> SchemaResult<()> {
        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed_schema("<in-memory>", e))?;

        if self.schemas.contains_key(&schema.model) {
            return Err(SchemaError::schema_immutable(&schema.model));
        }

        self.schemas.insert(schema.model.clone(), schema);
        Ok(())
    }

    /// Gets a schema by model name.
    pub fn get(&self, model: &str) -> Option<&ModelSchema> {
        self.schemas.get(model)
    }

    /// Gets a schema or fails with `NOUPDATE_UNKNOWN_SCHEMA`.
    pub fn require(&self, model: &str) -> SchemaResult<&ModelSchema> {
        self.get(model).ok_or_else(|| SchemaError::unknown_schema(model))
    }

    pub fn exists(&self, model: &str) -> bool {
        self.schemas.contains_key(model)
    }

    pub fn all_schemas(&self) -> impl Iterator<Item = &ModelSchema> {
        self.schemas.values()
    }

    pub fn schema_count(&self) -> usize {
        self.schemas.len()
    }

    /// Writes a schema file to the schema directory.
    ///
    /// Existing files are never overwritten.
    pub fn save_schema(&self, schema: &ModelSchema) -> SchemaResult<PathBuf> {
        schema
            .validate_structure()
            .map_err(|e| SchemaError::malformed_schema("<in-memory>", e))?;

        let path = self.schema_dir.join(format!("model_{}.json", schema.model));

        if path.exists() {
            return Err(SchemaError::schema_immutable(&schema.model));
        }

        fs::create_dir_all(&self.schema_dir).map_err(|e| {
            SchemaError::malformed_schema(
                self.schema_dir.display().to_string(),
                format!("Failed to create schema directory: {}", e),
            )
        })?;

        let content = serde_json::to_string_pretty(schema).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to serialize schema: {}", e),
            )
        })?;

        fs::write(&path, content).map_err(|e| {
            SchemaError::malformed_schema(
                path.display().to_string(),
                format!("Failed to write file: {}", e),
            )
        })?;

        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::super::errors::SchemaErrorCode;
    use super::super::types::{FieldDecl, Immutability};
    use super::*;
    use tempfile::TempDir;

    fn sample_schema() -> ModelSchema {
        let mut fields = HashMap::new();
        fields.insert("id".into(), FieldDecl::mutable());
        fields.insert("attr1".into(), FieldDecl::no_update());
        ModelSchema::new("Model_2", fields)
    }

    #[test]
    fn test_register_and_get() {
        let temp_dir = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(temp_dir.path());

        loader.register(sample_schema()).unwrap();

        let schema = loader.get("Model_2").unwrap();
        assert_eq!(schema.model, "Model_2");
        assert!(loader.require("Model_9").is_err());
    }

    #[test]
    fn test_redefinition_rejected() {
        let temp_dir = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(temp_dir.path());

        loader.register(sample_schema()).unwrap();

        let result = loader.register(sample_schema());
        assert_eq!(result.unwrap_err().code(), SchemaErrorCode::SchemaImmutable);
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let loader = SchemaLoader::new(temp_dir.path());
        loader.save_schema(&sample_schema()).unwrap();

        let mut reloaded = SchemaLoader::new(temp_dir.path());
        reloaded.load_all().unwrap();

        let schema = reloaded.get("Model_2").unwrap();
        assert_eq!(schema.field("attr1").unwrap().immutability, Immutability::NoUpdate);
    }

    #[test]
    fn test_save_never_overwrites() {
        let temp_dir = TempDir::new().unwrap();
        let loader = SchemaLoader::new(temp_dir.path());
        loader.save_schema(&sample_schema()).unwrap();
        assert!(loader.save_schema(&sample_schema()).is_err());
    }

    #[test]
    fn test_save_rejects_model_name_outside_schema_dir() {
        let temp_dir = TempDir::new().unwrap();
        let schema_dir = temp_dir.path().join("schemas");
        let loader = SchemaLoader::new(&schema_dir);

        let err = loader
            .save_schema(&ModelSchema::new("../x", HashMap::new()))
            .unwrap_err();
        assert_eq!(err.code(), SchemaErrorCode::MalformedSchema);
        assert!(!schema_dir.exists());
    }

    #[test]
    fn test_load_hand_written_file() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(
            temp_dir.path().join("model_3.json"),
            r#"{
                "model": "Model_3",
                "fields": {
                    "id": {},
                    "attr1": { "noUpdate": { "readOnly": true } },
                    "attr2": { "noUpdate": false },
                    "attr3": { "noUpdate": null }
                }
            }"#,
        )
        .unwrap();
        fs::write(temp_dir.path().join("notes.txt"), "ignored").unwrap();

        let mut loader = SchemaLoader::new(temp_dir.path());
        loader.load_all().unwrap();

        assert_eq!(loader.schema_count(), 1);
        let schema = loader.get("Model_3").unwrap();
        assert_eq!(schema.field("attr1").unwrap().immutability, Immutability::ReadOnly);
        assert_eq!(schema.field("attr2").unwrap().immutability, Immutability::Mutable);
        assert_eq!(schema.field("attr3").unwrap().immutability, Immutability::Mutable);
    }

    #[test]
    fn test_malformed_file_is_fatal() {
        let temp_dir = TempDir::new().unwrap();
        fs::write(temp_dir.path().join("model_bad.json"), "{ not json").unwrap();

        let mut loader = SchemaLoader::new(temp_dir.path());
        let err = loader.load_all().unwrap_err();
        assert!(err.is_fatal());
        assert_eq!(err.code(), SchemaErrorCode::MalformedSchema);
    }

    #[test]
    fn test_missing_directory_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let mut loader = SchemaLoader::new(&temp_dir.path().join("absent"));

        loader.load_all().unwrap();
        assert_eq!(loader.schema_count(), 0);
    }
}
