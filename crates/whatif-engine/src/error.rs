//! Knowledge base loading errors.

use std::path::PathBuf;

use thiserror::Error;
use whatif_core::errors::SchemaError;

/// Errors raised while reading and validating a KB or demo document.
#[derive(Debug, Error)]
pub enum KbError {
    /// The document could not be read from disk.
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid TOML or does not match the expected shape.
    #[error("invalid TOML document: {0}")]
    Toml(#[from] toml::de::Error),

    /// The document is not valid JSON or does not match the expected shape.
    #[error("invalid JSON document: {0}")]
    Json(#[from] serde_json::Error),

    /// The file extension is neither `.toml` nor `.json`.
    #[error("unsupported knowledge base format '{0}' (expected .toml or .json)")]
    UnsupportedFormat(String),

    /// The document parsed but references undeclared or duplicated entities.
    #[error(transparent)]
    Schema(#[from] SchemaError),
}
