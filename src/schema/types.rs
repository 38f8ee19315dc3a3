//! Field declaration types
//!
//! Declaration surface (JSON):
//! - `"noUpdate"` absent, `null` or `false`: mutable
//! - `"noUpdate": true`: no-update
//! - `"noUpdate": { "readOnly": true }`: read-only

use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashMap;

/// Immutability mode of a single field.
///
/// `ReadOnly` is strictly stronger than `NoUpdate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(from = "NoUpdateOption", into = "NoUpdateOption")]
pub enum Immutability {
    /// No restriction
    #[default]
    Mutable,
    /// May be set once, never changed after a real value exists
    NoUpdate,
    /// May never be changed once the record exists
    ReadOnly,
}

impl Immutability {
    /// Returns the mode name used in diagnostics
    pub fn as_str(&self) -> &'static str {
        match self {
            Immutability::Mutable => "mutable",
            Immutability::NoUpdate => "no-update",
            Immutability::ReadOnly => "read-only",
        }
    }

    /// Returns true if the field carries any restriction
    pub fn is_restricted(&self) -> bool {
        !matches!(self, Immutability::Mutable)
    }
}

/// Raw `noUpdate` option as written in schema files.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum NoUpdateOption {
    Flag(bool),
    Options {
        #[serde(rename = "readOnly", default)]
        read_only: bool,
    },
}

impl From<NoUpdateOption> for Immutability {
    fn from(raw: NoUpdateOption) -> Self {
        match raw {
            NoUpdateOption::Flag(false) => Immutability::Mutable,
            NoUpdateOption::Flag(true) => Immutability::NoUpdate,
            // An options object still marks the field as no-update.
            NoUpdateOption::Options { read_only: false } => Immutability::NoUpdate,
            NoUpdateOption::Options { read_only: true } => Immutability::ReadOnly,
        }
    }
}

impl From<Immutability> for NoUpdateOption {
    fn from(mode: Immutability) -> Self {
        match mode {
            Immutability::Mutable => NoUpdateOption::Flag(false),
            Immutability::NoUpdate => NoUpdateOption::Flag(true),
            Immutability::ReadOnly => NoUpdateOption::Options { read_only: true },
        }
    }
}

/// Per-field declaration attached at schema-definition time
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldDecl {
    /// Immutability mode
    #[serde(
        rename = "noUpdate",
        default,
        deserialize_with = "null_as_mutable",
        skip_serializing_if = "is_mutable"
    )]
    pub immutability: Immutability,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

fn is_mutable(mode: &Immutability) -> bool {
    *mode == Immutability::Mutable
}

fn null_as_mutable<'de, D>(deserializer: D) -> Result<Immutability, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Immutability>::deserialize(deserializer)?.unwrap_or_default())
}

impl FieldDecl {
    pub fn mutable() -> Self {
        Self::default()
    }

    pub fn no_update() -> Self {
        Self {
            immutability: Immutability::NoUpdate,
            description: None,
        }
    }

    pub fn read_only() -> Self {
        Self {
            immutability: Immutability::ReadOnly,
            description: None,
        }
    }
}

/// Lookup of immutability declarations by field name.
///
/// Fields without a declaration are treated as mutable by callers.
pub trait FieldDeclarations {
    fn immutability(&self, field: &str) -> Option<Immutability>;
}

impl FieldDeclarations for HashMap<String, Immutability> {
    fn immutability(&self, field: &str) -> Option<Immutability> {
        self.get(field).copied()
    }
}

impl FieldDeclarations for HashMap<String, FieldDecl> {
    fn immutability(&self, field: &str) -> Option<Immutability> {
        self.get(field).map(|decl| decl.immutability)
    }
}

/// Declarations of one model
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModelSchema {
    /// Model name, unique within a loader
    pub model: String,
    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Field declarations keyed by field name
    pub fields: HashMap<String, FieldDecl>,
}

impl ModelSchema {
    /// Create a new model schema
    pub fn new(model: impl Into<String>, fields: HashMap<String, FieldDecl>) -> Self {
        Self {
            model: model.into(),
            description: None,
            fields,
        }
    }

    /// Returns the declaration of a field
    pub fn field(&self, name: &str) -> Option<&FieldDecl> {
        self.fields.get(name)
    }

    /// Returns true if the model declares the field
    pub fn has_field(&self, name: &str) -> bool {
        self.fields.contains_key(name)
    }

    /// Returns names of restricted fields, sorted
    pub fn restricted_fields(&self) -> Vec<(&str, Immutability)> {
        let mut restricted: Vec<_> = self
            .fields
            .iter()
            .filter(|(_, decl)| decl.immutability.is_restricted())
            .map(|(name, decl)| (name.as_str(), decl.immutability))
            .collect();
        restricted.sort_by_key(|(name, _)| *name);
        restricted
    }

    /// Validates the schema structure itself
    pub fn validate_structure(&self) -> Result<(), String> {
        if self.model.trim().is_empty() {
            return Err("Model name must not be empty".into());
        }

        // The name becomes part of a file name on save.
        if !self
            .model
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-')
        {
            return Err(format!(
                "Model name '{}' may only contain ASCII letters, digits, '_' and '-'",
                self.model
            ));
        }

        if let Some(name) = self.fields.keys().find(|name| name.trim().is_empty()) {
            return Err(format!("Field name '{}' must not be empty", name));
        }

        Ok(())
    }
}

impl FieldDeclarations for ModelSchema {
    fn immutability(&self, field: &str) -> Option<Immutability> {
        self.fields.immutability(field)
    }
}
