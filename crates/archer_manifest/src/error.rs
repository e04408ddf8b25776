//! Error types for manifest decoding.

use thiserror::Error;

/// Result type alias for manifest operations.
pub type ManifestResult<T> = Result<T, ManifestError>;

/// Errors that can occur while decoding a manifest.
#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("Malformed manifest: {0}")]
    Malformed(String),

    #[error("Unsupported manifest type '{found}' (supported types: {supported})")]
    UnsupportedType { found: String, supported: String },
}
