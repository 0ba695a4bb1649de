use minijinja::{Environment, UndefinedBehavior};
use serde::Serialize;
use std::fs;
use std::path::Path;

use super::error::GeneratorError;
use crate::registry::ModelField;

/// Suffix appended to a model name to form its generated form name.
pub const FORM_SUFFIX: &str = "Form";

/// Which of the two artifacts a template set belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArtifactKind {
    /// Data-entry form definitions
    Forms,
    /// REST route definitions
    Routes,
}

impl ArtifactKind {
    /// Subdirectory of the templates directory holding this kind's fragments.
    pub fn dir_name(self) -> &'static str {
        match self {
            ArtifactKind::Forms => "forms",
            ArtifactKind::Routes => "routes",
        }
    }

    /// File name of the skeleton fragment.
    pub fn skeleton_file(self) -> &'static str {
        match self {
            ArtifactKind::Forms => "forms_structure",
            ArtifactKind::Routes => "routes_structure",
        }
    }

    /// File name of the per-model unit fragment.
    pub fn unit_file(self) -> &'static str {
        match self {
            ArtifactKind::Forms => "base_form",
            ArtifactKind::Routes => "base_route",
        }
    }
}

/// The four template fragments an artifact is assembled from.
///
/// Loaded fresh from disk on every generation run; never cached or mutated.
#[derive(Debug, Clone)]
pub struct TemplateSet {
    /// Overall file skeleton; placeholders for `library_imports`,
    /// `project_imports`, and the joined body (`forms` or `routes`)
    pub skeleton: String,
    /// Library import block, substituted verbatim into the skeleton
    pub library_imports: String,
    /// Project import fragment; placeholder for the comma-joined name lists
    pub base_imports: String,
    /// Per-model unit fragment
    pub base_unit: String,
}

impl TemplateSet {
    /// Read the four fragments for `kind` from `<dir>/<kind>/`.
    ///
    /// Any unreadable file fails with [`GeneratorError::TemplateMissing`].
    pub fn load(dir: &Path, kind: ArtifactKind) -> Result<Self, GeneratorError> {
        let base = dir.join(kind.dir_name());
        Ok(Self {
            skeleton: read_template(&base.join(kind.skeleton_file()))?,
            library_imports: read_template(&base.join("library_imports"))?,
            base_imports: read_template(&base.join("base_imports"))?,
            base_unit: read_template(&base.join(kind.unit_file()))?,
        })
    }
}

fn read_template(path: &Path) -> Result<String, GeneratorError> {
    fs::read_to_string(path).map_err(|source| GeneratorError::TemplateMissing {
        path: path.to_path_buf(),
        source,
    })
}

/// Context for rendering one forms unit.
#[derive(Serialize)]
pub struct FormUnitContext<'a> {
    /// Model the form is generated for
    pub model_name: &'a str,
    /// Declared fields of the model (may be empty)
    pub fields: &'a [ModelField],
}

/// Context for rendering one routes unit.
#[derive(Serialize)]
pub struct RouteUnitContext<'a> {
    /// Model the route serves
    pub model_name: &'a str,
    /// Generated form name (`model_name` + [`FORM_SUFFIX`])
    pub form_name: String,
    /// Endpoint path segment from the mapping
    pub endpoint: &'a str,
    /// Declared fields of the model (may be empty)
    pub fields: &'a [ModelField],
}

/// Context for rendering the project-import fragment.
#[derive(Serialize)]
pub struct ImportsContext {
    /// Comma-joined model names, in mapping order
    pub models_name: String,
    /// Comma-joined form names; only present for the routes artifact
    #[serde(skip_serializing_if = "Option::is_none")]
    pub forms_name: Option<String>,
}

/// Skeleton context for the forms artifact.
#[derive(Serialize)]
pub(crate) struct FormsSkeletonContext {
    pub library_imports: String,
    pub project_imports: String,
    pub forms: String,
}

/// Skeleton context for the routes artifact.
#[derive(Serialize)]
pub(crate) struct RoutesSkeletonContext {
    pub library_imports: String,
    pub project_imports: String,
    pub routes: String,
}

/// Render one template fragment against a typed context.
///
/// Undefined placeholders are an error: the environment runs with strict
/// undefined behavior so a fragment referencing a name the context does not
/// carry fails instead of rendering an empty string.
pub(crate) fn render<S: Serialize>(
    name: &str,
    source: &str,
    ctx: &S,
) -> Result<String, GeneratorError> {
    let mut env = Environment::new();
    env.set_undefined_behavior(UndefinedBehavior::Strict);
    env.add_template(name, source)
        .map_err(|source| GeneratorError::Render {
            template: name.to_string(),
            source,
        })?;
    let template = env.get_template(name).map_err(|source| GeneratorError::Render {
        template: name.to_string(),
        source,
    })?;
    template.render(ctx).map_err(|source| GeneratorError::Render {
        template: name.to_string(),
        source,
    })
}
