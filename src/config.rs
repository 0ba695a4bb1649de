//! # Configuration Module
//!
//! Explicit configuration objects for the generator and the token gate.
//!
//! All state the original workflow kept in ambient globals (the endpoint
//! mapping, the shared secret, output locations) lives in an [`AppConfig`]
//! loaded from a TOML file and passed into components at construction time.
//!
//! ## File format
//!
//! ```toml
//! templates_dir = "templates"
//!
//! [output]
//! forms = "generated/forms.rs"
//! routes = "generated/routes.rs"
//!
//! [security]
//! secret = "change-me"
//! token_ttl_secs = 86400
//!
//! [[endpoint]]
//! name = "books"
//! model = "Book"
//!
//! [[model]]
//! name = "Book"
//! fields = [{ name = "title", ty = "String" }]
//! ```
//!
//! Endpoint order in the file is the order units and import lists are
//! generated in. The shared secret can be overridden with the
//! `APIFORGE_SECRET` environment variable.
//!
//! ## Validation
//!
//! Loading fails early when the mapping is empty, an endpoint name is
//! duplicated, a model name is not a valid identifier, or a mapping entry
//! references a model that was never declared.

use serde::Deserialize;
use std::env;
use std::fmt;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::registry::{ModelRegistry, ModelSchema};

/// Environment variable that overrides the configured shared secret.
pub const SECRET_ENV_VAR: &str = "APIFORGE_SECRET";

/// One entry of the endpoint mapping: a URL-path segment and the model it
/// exposes.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct EndpointEntry {
    /// Endpoint name, used for the URL path and in generated route names
    pub name: String,
    /// Model the endpoint serves; must be declared in a `[[model]]` table
    pub model: String,
}

/// Ordered endpoint-name → model-name mapping.
///
/// Iteration order is the declaration order in the configuration file and
/// determines the order of generated units and import lists. Endpoint names
/// are unique; model reuse across endpoints is allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EndpointMapping(Vec<EndpointEntry>);

impl EndpointMapping {
    /// Build a mapping from entries, preserving their order.
    pub fn new(entries: Vec<EndpointEntry>) -> Self {
        Self(entries)
    }

    /// Iterate entries in declaration order.
    pub fn iter(&self) -> std::slice::Iter<'_, EndpointEntry> {
        self.0.iter()
    }

    /// Model names in declaration order (duplicates preserved).
    pub fn model_names(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(|e| e.model.as_str())
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Whether the mapping has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a EndpointMapping {
    type Item = &'a EndpointEntry;
    type IntoIter = std::slice::Iter<'a, EndpointEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Destination paths for the two generated source files.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct OutputConfig {
    /// Path the generated forms source is written to
    pub forms: PathBuf,
    /// Path the generated routes source is written to
    pub routes: PathBuf,
}

/// Settings for token issuance and verification.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SecurityConfig {
    /// Shared HMAC secret; overridden by `APIFORGE_SECRET` when set
    pub secret: String,
    /// Maximum accepted token age in seconds; `None` disables the age check
    #[serde(default)]
    pub token_ttl_secs: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    #[serde(default = "default_templates_dir")]
    templates_dir: PathBuf,
    output: OutputConfig,
    security: SecurityConfig,
    #[serde(default, rename = "endpoint")]
    endpoints: Vec<EndpointEntry>,
    #[serde(default, rename = "model")]
    models: Vec<ModelSchema>,
}

fn default_templates_dir() -> PathBuf {
    PathBuf::from("templates")
}

/// Fully validated application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Directory holding the `forms/` and `routes/` template sets
    pub templates_dir: PathBuf,
    /// Generated file destinations
    pub output: OutputConfig,
    /// Token gate settings
    pub security: SecurityConfig,
    /// Ordered endpoint mapping
    pub endpoints: EndpointMapping,
    /// Registry built from the declared models
    pub registry: ModelRegistry,
}

impl AppConfig {
    /// Load and validate a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let raw: RawConfig = toml::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_raw(raw)
    }

    fn from_raw(raw: RawConfig) -> Result<Self, ConfigError> {
        if raw.endpoints.is_empty() {
            return Err(ConfigError::EmptyMapping);
        }

        let mut registry = ModelRegistry::new();
        for model in raw.models {
            if !is_valid_identifier(&model.name) {
                return Err(ConfigError::InvalidModelName { name: model.name });
            }
            registry.register(model);
        }

        let mut seen = std::collections::HashSet::new();
        for entry in &raw.endpoints {
            if !seen.insert(entry.name.as_str()) {
                return Err(ConfigError::DuplicateEndpoint {
                    name: entry.name.clone(),
                });
            }
            if !is_valid_identifier(&entry.model) {
                return Err(ConfigError::InvalidModelName {
                    name: entry.model.clone(),
                });
            }
            if !registry.contains(&entry.model) {
                return Err(ConfigError::UnknownModel {
                    endpoint: entry.name.clone(),
                    model: entry.model.clone(),
                });
            }
        }

        let mut security = raw.security;
        if let Ok(secret) = env::var(SECRET_ENV_VAR) {
            security.secret = secret;
        }

        Ok(Self {
            templates_dir: raw.templates_dir,
            output: raw.output,
            security,
            endpoints: EndpointMapping::new(raw.endpoints),
            registry,
        })
    }
}

fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Errors raised while loading or validating a configuration file.
#[derive(Debug)]
pub enum ConfigError {
    /// The configuration file could not be read
    Read {
        /// Configuration file path
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// The configuration file is not valid TOML
    Parse {
        /// Configuration file path
        path: PathBuf,
        /// Underlying TOML error
        source: toml::de::Error,
    },
    /// The endpoint mapping has no entries
    EmptyMapping,
    /// Two `[[endpoint]]` tables share the same name
    DuplicateEndpoint {
        /// The duplicated endpoint name
        name: String,
    },
    /// A model name is not a valid identifier
    InvalidModelName {
        /// The offending model name
        name: String,
    },
    /// A mapping entry references a model that was never declared
    UnknownModel {
        /// Endpoint that references the model
        endpoint: String,
        /// The undeclared model name
        model: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Read { path, source } => {
                write!(f, "failed to read config {}: {}", path.display(), source)
            }
            ConfigError::Parse { path, source } => {
                write!(f, "failed to parse config {}: {}", path.display(), source)
            }
            ConfigError::EmptyMapping => {
                write!(f, "endpoint mapping is empty; declare at least one [[endpoint]]")
            }
            ConfigError::DuplicateEndpoint { name } => {
                write!(f, "duplicate endpoint name '{name}'")
            }
            ConfigError::InvalidModelName { name } => {
                write!(f, "model name '{name}' is not a valid identifier")
            }
            ConfigError::UnknownModel { endpoint, model } => {
                write!(
                    f,
                    "endpoint '{endpoint}' references undeclared model '{model}'"
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Read { source, .. } => Some(source),
            ConfigError::Parse { source, .. } => Some(source),
            _ => None,
        }
    }
}
