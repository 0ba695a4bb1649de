//! # Generator Module
//!
//! Template-based code generation for the two API source artifacts.
//!
//! ## Overview
//!
//! The generator deterministically produces a forms source file and a routes
//! source file from the ordered endpoint mapping and two on-disk template
//! sets. It runs ahead of time as a maintenance command, never in the request
//! path.
//!
//! ## Pipeline
//!
//! ```text
//! EndpointMapping + TemplateSet → per-model unit rendering → body join
//!                               → import-list rendering → skeleton rendering
//!                               → fs::write (overwrite)
//! ```
//!
//! 1. **Template loading** — the four fragments of a [`TemplateSet`]
//!    (`skeleton`, `library_imports`, `base_imports`, `base_unit`) are read
//!    fresh from fixed file names under `<templates_dir>/forms/` or
//!    `<templates_dir>/routes/` on every run. Nothing is cached.
//! 2. **Unit rendering** — `base_unit` is rendered once per mapping entry, in
//!    mapping order, with a typed context struct.
//! 3. **Assembly** — units are joined with a blank line, the import fragment
//!    is rendered with the comma-joined name lists, and the skeleton is
//!    rendered with the three assembled pieces.
//! 4. **Write** — the finished text is written to the configured destination,
//!    overwriting whatever is there. Substitution happens entirely in memory,
//!    so a rendering failure leaves the previous file untouched.
//!
//! Rendering uses minijinja with strict undefined behavior: a template that
//! references a placeholder the typed context does not provide fails with
//! [`GeneratorError::Render`] instead of silently emitting an empty string.
//!
//! ## Determinism
//!
//! The same mapping and template files produce byte-identical output across
//! runs. Mapping order drives both the order of units in the body and the
//! order of names in the rendered import lists.

mod error;
mod generate;
mod templates;

pub use error::GeneratorError;
pub use generate::{GeneratedArtifact, Generator};
pub use templates::{
    ArtifactKind, FormUnitContext, ImportsContext, RouteUnitContext, TemplateSet, FORM_SUFFIX,
};
