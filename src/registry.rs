//! # Model Registry Module
//!
//! Static registration of the models the generator is allowed to reference.
//!
//! The registry replaces runtime reflection over an application's model
//! classes: every model a mapping entry points at must be declared up front
//! (normally via `[[model]]` tables in the configuration file) and is checked
//! when the configuration is loaded, not when generation runs.
//!
//! Registered schemas are also handed to the unit templates, so a template
//! can render the declared fields of the model it is generating code for.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A single declared field of a model.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelField {
    /// Field name as it appears in generated code
    pub name: String,
    /// Rust type of the field (e.g. `String`, `i64`)
    pub ty: String,
}

/// Declared schema for one model.
///
/// `fields` may be empty; templates that do not iterate fields ignore it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ModelSchema {
    /// Model name; must be a valid identifier
    pub name: String,
    /// Declared fields, in declaration order
    #[serde(default)]
    pub fields: Vec<ModelField>,
}

/// Registry of all statically declared models, keyed by model name.
#[derive(Debug, Clone, Default)]
pub struct ModelRegistry {
    models: BTreeMap<String, ModelSchema>,
}

impl ModelRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model schema. Re-registering a name replaces the previous
    /// schema.
    pub fn register(&mut self, schema: ModelSchema) {
        self.models.insert(schema.name.clone(), schema);
    }

    /// Look up a registered model by name.
    pub fn get(&self, name: &str) -> Option<&ModelSchema> {
        self.models.get(name)
    }

    /// Whether a model with this name has been registered.
    pub fn contains(&self, name: &str) -> bool {
        self.models.contains_key(name)
    }

    /// Number of registered models.
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the registry has no models.
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Declared fields for a model, or an empty slice when the model carries
    /// no field declarations.
    pub fn fields(&self, name: &str) -> &[ModelField] {
        self.get(name).map(|s| s.fields.as_slice()).unwrap_or(&[])
    }
}
