//! Schema loading from disk.

use std::fs;
use std::path::Path;

use crate::error::LoadError;
use crate::types::Schema;

/// Reads a schema file as UTF-8 and decodes it.
///
/// ## Errors
///
/// - [`LoadError::Io`] if the file cannot be read
/// - [`LoadError::Decode`] if the content is not a valid schema document
pub fn load(path: &Path) -> Result<Schema, LoadError> {
    let content = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.display().to_string(),
        source,
    })?;

    Schema::from_json_str(&content)
}

impl Schema {
    /// Decodes a schema from JSON text.
    ///
    /// Decode errors carry the JSON path of the offending value.
    ///
    /// ## Examples
    ///
    /// ```
    /// use swaggen_define::{LoadError, Schema};
    ///
    /// let err = Schema::from_json_str(r#"{ "definitions": { "a": { "enum": 5 } } }"#).unwrap_err();
    /// match err {
    ///     LoadError::Decode { path, .. } => assert_eq!(path, "definitions.a.enum"),
    ///     other => panic!("unexpected error: {other}"),
    /// }
    /// ```
    pub fn from_json_str(content: &str) -> Result<Self, LoadError> {
        let de = &mut serde_json::Deserializer::from_str(content);
        serde_path_to_error::deserialize(de).map_err(|err| LoadError::Decode {
            path: err.path().to_string(),
            source: err.into_inner(),
        })
    }
}
