//! Operation responses.

use serde::Deserialize;

use crate::schema::TypeDescriptor;

/// A response declared for one status code.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Response {
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Response body schema, absent for bodiless responses.
    #[serde(default)]
    pub schema: Option<TypeDescriptor>,
}
