//! Operation parameters.

use serde::Deserialize;

use crate::schema::TypeDescriptor;

/// Where an operation argument is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ParameterLocation {
    /// Substituted into a `{name}` placeholder of the URL template.
    Path,
    /// Appended to the query string.
    Query,
    /// Serialized as the request body.
    Body,
    /// Sent as an HTTP header (not supported by the generator).
    Header,
    /// Sent as a form field (not supported by the generator).
    FormData,
}

/// A declared operation parameter.
///
/// Non-body parameters describe their type inline (`type`, `items`,
/// `format`), body parameters carry a nested `schema`. Use
/// [`Parameter::descriptor`] to get the effective type either way.
///
/// ## Examples
///
/// ```
/// use swaggen_define::{Parameter, ParameterLocation};
///
/// let param: Parameter = serde_json::from_str(
///     r#"{ "name": "limit", "in": "query", "required": false, "type": "integer" }"#,
/// ).unwrap();
///
/// assert_eq!(param.location, ParameterLocation::Query);
/// assert_eq!(param.descriptor().kind.as_deref(), Some("integer"));
/// ```
#[derive(Debug, Clone, Deserialize)]
pub struct Parameter {
    /// Parameter name as it appears in the URL template or query string.
    pub name: String,
    /// Parameter location.
    #[serde(rename = "in")]
    pub location: ParameterLocation,
    /// Whether the schema marks the parameter as required.
    #[serde(default)]
    pub required: bool,
    /// Body schema (only for `in: body`).
    #[serde(default)]
    pub schema: Option<TypeDescriptor>,
    /// Inline type information (non-body parameters).
    #[serde(flatten)]
    pub inline: TypeDescriptor,
}

impl Parameter {
    /// Returns the effective type descriptor.
    ///
    /// Body parameters use their `schema`; every other location (and a body
    /// parameter missing its schema) uses the inline fields.
    pub fn descriptor(&self) -> &TypeDescriptor {
        match (&self.location, &self.schema) {
            (ParameterLocation::Body, Some(schema)) => schema,
            _ => &self.inline,
        }
    }
}
