//! Error types for the workspace and environment store.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading the workspace or the environment store.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("No workspace found from {0} upwards, run `archer init` first")]
    WorkspaceNotFound(PathBuf),

    #[error("Manifest file not found: {0}")]
    ManifestNotFound(PathBuf),

    #[error("Environment {env} not found in project {project}")]
    EnvironmentNotFound { project: String, env: String },

    #[error("Invalid environment record in {path}: {message}")]
    InvalidEnvironment { path: PathBuf, message: String },

    #[error("Failed to list {path}: {source}")]
    Walk {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}
