//! Security schemes and requirements.
//!
//! Swagger documents declare named schemes under `securityDefinitions` and
//! reference them from `security` requirement lists, either at the document
//! level (default for every operation) or per operation.

use indexmap::IndexMap;
use serde::Deserialize;

/// A security requirement: scheme name -> required scopes.
///
/// Only the scheme names matter for code generation.
pub type SecurityRequirement = IndexMap<String, Vec<String>>;

/// The type of a declared security scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum SecuritySchemeKind {
    /// HTTP Basic authentication (username + password).
    Basic,
    /// A key carried in a header or query parameter.
    ApiKey,
    /// OAuth2 flows; generated clients pass the token as a bearer.
    #[serde(rename = "oauth2")]
    OAuth2,
}

/// An entry of the `securityDefinitions` block.
///
/// ## Examples
///
/// ```
/// use swaggen_define::{SecurityScheme, SecuritySchemeKind};
///
/// let scheme: SecurityScheme = serde_json::from_str(r#"{ "type": "basic" }"#).unwrap();
/// assert_eq!(scheme.kind, SecuritySchemeKind::Basic);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct SecurityScheme {
    /// Scheme type.
    #[serde(rename = "type")]
    pub kind: SecuritySchemeKind,
    /// Header or query parameter name for `apiKey` schemes.
    #[serde(default)]
    pub name: Option<String>,
    /// Where an `apiKey` is carried (`header` or `query`).
    #[serde(default, rename = "in")]
    pub location: Option<String>,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}
