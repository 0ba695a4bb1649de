use std::fmt;
use std::io;
use std::path::PathBuf;

/// Errors raised by the code generator.
///
/// All variants surface synchronously to the invoking maintenance command;
/// nothing is retried.
#[derive(Debug)]
pub enum GeneratorError {
    /// The endpoint mapping has no entries, so there is nothing to generate
    EmptyMapping,
    /// One of the four template files could not be read
    TemplateMissing {
        /// Path of the unreadable template file
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
    /// A template failed to render (syntax error or unknown placeholder)
    Render {
        /// Name of the failing template fragment
        template: String,
        /// Underlying rendering error
        source: minijinja::Error,
    },
    /// The assembled artifact could not be written to its destination
    WriteFailure {
        /// Destination path
        path: PathBuf,
        /// Underlying I/O error
        source: io::Error,
    },
}

impl fmt::Display for GeneratorError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GeneratorError::EmptyMapping => {
                write!(f, "endpoint mapping is empty; nothing to generate")
            }
            GeneratorError::TemplateMissing { path, source } => {
                write!(f, "template file {} unreadable: {}", path.display(), source)
            }
            GeneratorError::Render { template, source } => {
                write!(f, "template '{template}' failed to render: {source}")
            }
            GeneratorError::WriteFailure { path, source } => {
                write!(
                    f,
                    "failed to write generated file {}: {}",
                    path.display(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for GeneratorError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            GeneratorError::EmptyMapping => None,
            GeneratorError::TemplateMissing { source, .. } => Some(source),
            GeneratorError::Render { source, .. } => Some(source),
            GeneratorError::WriteFailure { source, .. } => Some(source),
        }
    }
}
