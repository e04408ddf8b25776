//! Error types for stack building and template rendering.

use thiserror::Error;

/// Result type alias for deploy operations.
pub type DeployResult<T> = Result<T, DeployError>;

/// Errors that can occur while producing a stack template.
#[derive(Error, Debug)]
pub enum DeployError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error("Failed to parse template {name}: {message}")]
    TemplateParse { name: String, message: String },

    #[error("Failed to execute template {name}: {message}")]
    TemplateExecution { name: String, message: String },
}
