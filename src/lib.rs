//! # apiforge
//!
//! **apiforge** is a template-driven code generator for API source files,
//! paired with the JWT-backed authorization gate the generated handlers sit
//! behind.
//!
//! ## Overview
//!
//! Two loosely coupled components form the core:
//!
//! - **[`generator`]** — reads an ordered endpoint-name → model-name mapping
//!   and two four-file template sets from disk, renders one unit per model,
//!   and writes the assembled forms and routes source files to fixed paths.
//!   Deterministic: the same mapping and templates produce byte-identical
//!   output.
//! - **[`security`]** — issues HS256 tokens carrying `{sub, iat}` at login
//!   time and, per request, verifies a bearer token against the shared
//!   secret, resolves the subject through a user store, and returns the
//!   resolved principal (or a typed failure with a structured error body).
//!
//! The two never call each other at runtime: the generator runs ahead of time
//! as a maintenance command, and its output is compiled into the application
//! whose requests the gate screens.
//!
//! ## Modules
//!
//! - **[`config`]** — explicit TOML-backed configuration; mapping, output
//!   paths, security settings, model declarations
//! - **[`registry`]** — statically registered model schemas, checked at
//!   configuration-load time
//! - **[`generator`]** — template loading, typed-context rendering, artifact
//!   assembly and writing
//! - **[`security`]** — token issuance and the request authorization gate
//! - **[`cli`]** — the `generate` and `check` maintenance commands
//!
//! ## Quick Start
//!
//! ```bash
//! # Validate the mapping and generate both source files
//! apiforge generate --config apiforge.toml
//! ```
//!
//! ```rust,no_run
//! use apiforge::config::AppConfig;
//! use apiforge::generator::Generator;
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = AppConfig::load(Path::new("apiforge.toml"))?;
//! let generator = Generator::from_config(&config);
//! let forms = generator.generate_forms()?;
//! let routes = generator.generate_routes()?;
//! println!("wrote {} and {}", forms.path.display(), routes.path.display());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod generator;
pub mod registry;
pub mod security;

pub use config::{AppConfig, ConfigError, EndpointEntry, EndpointMapping};
pub use generator::{ArtifactKind, GeneratedArtifact, Generator, GeneratorError, TemplateSet};
pub use registry::{ModelField, ModelRegistry, ModelSchema};
pub use security::{
    AuthError, Claims, ErrorBody, InMemoryUserStore, Principal, SecurityRequest, TokenGate,
    UserStore,
};
