//! Error types for schema loading.

use thiserror::Error;

/// Errors that can occur while loading a schema file.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The schema file could not be read.
    #[error("Unable to read schema file '{path}': {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid JSON or does not match the schema shape.
    #[error("Unable to decode schema at JSON path '{path}': {source}")]
    Decode {
        /// JSON path where decoding failed (`.` for the document root).
        path: String,
        #[source]
        source: serde_json::Error,
    },
}
