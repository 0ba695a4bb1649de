use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::error::GeneratorError;
use super::templates::{
    render, ArtifactKind, FormUnitContext, FormsSkeletonContext, ImportsContext, RouteUnitContext,
    RoutesSkeletonContext, TemplateSet, FORM_SUFFIX,
};
use crate::config::{AppConfig, EndpointMapping, OutputConfig};
use crate::registry::ModelRegistry;

/// A fully substituted artifact, already persisted to its destination.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedArtifact {
    /// Where the artifact was written
    pub path: PathBuf,
    /// The generated source text
    pub text: String,
}

/// Code generator over an endpoint mapping and on-disk template sets.
///
/// Holds borrowed configuration only; construction performs no I/O. Template
/// files are read inside [`generate_forms`](Self::generate_forms) and
/// [`generate_routes`](Self::generate_routes) so edits between runs are
/// always picked up.
pub struct Generator<'a> {
    templates_dir: &'a Path,
    mapping: &'a EndpointMapping,
    registry: &'a ModelRegistry,
    output: &'a OutputConfig,
}

impl<'a> Generator<'a> {
    /// Create a generator from explicit parts.
    pub fn new(
        templates_dir: &'a Path,
        mapping: &'a EndpointMapping,
        registry: &'a ModelRegistry,
        output: &'a OutputConfig,
    ) -> Self {
        Self {
            templates_dir,
            mapping,
            registry,
            output,
        }
    }

    /// Create a generator borrowing everything from an [`AppConfig`].
    pub fn from_config(config: &'a AppConfig) -> Self {
        Self::new(
            &config.templates_dir,
            &config.endpoints,
            &config.registry,
            &config.output,
        )
    }

    /// Generate the forms source file and write it to the configured path.
    ///
    /// Returns the generated text alongside the destination path. The
    /// destination is overwritten; rendering failures leave it untouched.
    pub fn generate_forms(&self) -> Result<GeneratedArtifact, GeneratorError> {
        if self.mapping.is_empty() {
            return Err(GeneratorError::EmptyMapping);
        }
        let set = TemplateSet::load(self.templates_dir, ArtifactKind::Forms)?;
        debug!(dir = %self.templates_dir.display(), "loaded forms template set");

        let mut units = Vec::with_capacity(self.mapping.len());
        for entry in self.mapping {
            let ctx = FormUnitContext {
                model_name: &entry.model,
                fields: self.registry.fields(&entry.model),
            };
            units.push(render("base_form", &set.base_unit, &ctx)?);
        }
        let body = units.join("\n\n");

        let imports = ImportsContext {
            models_name: join_names(self.mapping.model_names()),
            forms_name: None,
        };
        let project_imports = render("base_imports", &set.base_imports, &imports)?;

        let skeleton = FormsSkeletonContext {
            library_imports: set.library_imports,
            project_imports,
            forms: body,
        };
        let text = render("forms_structure", &set.skeleton, &skeleton)?;

        let artifact = write_artifact(&self.output.forms, text)?;
        println!("✅ Generated forms → {:?}", artifact.path);
        Ok(artifact)
    }

    /// Generate the routes source file and write it to the configured path.
    ///
    /// Same shape as [`generate_forms`](Self::generate_forms); route units
    /// additionally receive the form name and the endpoint string, and the
    /// import fragment receives the comma-joined form-name list.
    pub fn generate_routes(&self) -> Result<GeneratedArtifact, GeneratorError> {
        if self.mapping.is_empty() {
            return Err(GeneratorError::EmptyMapping);
        }
        let set = TemplateSet::load(self.templates_dir, ArtifactKind::Routes)?;
        debug!(dir = %self.templates_dir.display(), "loaded routes template set");

        let mut units = Vec::with_capacity(self.mapping.len());
        for entry in self.mapping {
            let ctx = RouteUnitContext {
                model_name: &entry.model,
                form_name: format!("{}{FORM_SUFFIX}", entry.model),
                endpoint: &entry.name,
                fields: self.registry.fields(&entry.model),
            };
            units.push(render("base_route", &set.base_unit, &ctx)?);
        }
        let body = units.join("\n\n");

        let imports = ImportsContext {
            models_name: join_names(self.mapping.model_names()),
            forms_name: Some(join_names(
                self.mapping
                    .model_names()
                    .map(|m| format!("{m}{FORM_SUFFIX}")),
            )),
        };
        let project_imports = render("base_imports", &set.base_imports, &imports)?;

        let skeleton = RoutesSkeletonContext {
            library_imports: set.library_imports,
            project_imports,
            routes: body,
        };
        let text = render("routes_structure", &set.skeleton, &skeleton)?;

        let artifact = write_artifact(&self.output.routes, text)?;
        println!("✅ Generated routes → {:?}", artifact.path);
        Ok(artifact)
    }
}

fn join_names<I, S>(names: I) -> String
where
    I: Iterator<Item = S>,
    S: AsRef<str>,
{
    names
        .map(|n| n.as_ref().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn write_artifact(path: &Path, text: String) -> Result<GeneratedArtifact, GeneratorError> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent).map_err(|source| GeneratorError::WriteFailure {
                path: path.to_path_buf(),
                source,
            })?;
        }
    }
    fs::write(path, &text).map_err(|source| GeneratorError::WriteFailure {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(GeneratedArtifact {
        path: path.to_path_buf(),
        text,
    })
}
