//! Core types for Swagger API descriptions.
//!
//! This module provides the top-level schema model:
//!
//! - [`Schema`] - The decoded API description
//! - [`PathItem`] - Operations grouped under a URL template
//! - [`Operation`] - A single HTTP operation
//! - [`HttpMethod`] - HTTP method enumeration

use std::str::FromStr;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::auth::{SecurityRequirement, SecurityScheme};
use crate::request::Parameter;
use crate::response::Response;
use crate::schema::{Definition, TypeDescriptor};

/// HTTP methods an operation can be bound to.
///
/// Path items key their operations by the lowercase method name, so parsing
/// is case-insensitive and display is lowercase.
///
/// ## Examples
///
/// ```
/// use std::str::FromStr;
/// use swaggen_define::HttpMethod;
///
/// assert_eq!(HttpMethod::from_str("get").unwrap(), HttpMethod::Get);
/// assert_eq!(HttpMethod::from_str("DELETE").unwrap(), HttpMethod::Delete);
/// assert_eq!(HttpMethod::Post.to_string(), "post");
/// ```
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumIter, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum HttpMethod {
    /// HTTP GET
    Get,
    /// HTTP POST
    Post,
    /// HTTP PUT
    Put,
    /// HTTP PATCH
    Patch,
    /// HTTP DELETE
    Delete,
    /// HTTP HEAD
    Head,
    /// HTTP OPTIONS
    Options,
}

impl HttpMethod {
    /// Returns the PascalCase variant name used by the generated `Method` enum.
    pub fn variant_name(self) -> &'static str {
        match self {
            Self::Get => "Get",
            Self::Post => "Post",
            Self::Put => "Put",
            Self::Patch => "Patch",
            Self::Delete => "Delete",
            Self::Head => "Head",
            Self::Options => "Options",
        }
    }
}

/// The `info` block of a Swagger document.
///
/// Only used to enrich the generated module documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct Info {
    /// API title.
    #[serde(default)]
    pub title: String,
    /// API version string.
    #[serde(default)]
    pub version: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
}

/// A decoded API description.
///
/// The schema is loaded once and stays read-only for the rest of a
/// generation run. All maps preserve document order so the generated output
/// is stable across runs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Schema {
    /// Document metadata.
    #[serde(default)]
    pub info: Info,
    /// Named security schemes referenced by operation requirements.
    #[serde(default)]
    pub security_definitions: IndexMap<String, SecurityScheme>,
    /// Default security requirements for operations that declare none.
    #[serde(default)]
    pub security: Vec<SecurityRequirement>,
    /// URL template -> operations registered under it.
    #[serde(default)]
    pub paths: IndexMap<String, PathItem>,
    /// Definition name -> data type definition.
    #[serde(default)]
    pub definitions: IndexMap<String, Definition>,
}

impl Schema {
    /// Iterates every `(url template, method, path item, operation)` in
    /// document order.
    pub fn operations(&self) -> impl Iterator<Item = (&str, HttpMethod, &PathItem, &Operation)> {
        self.paths.iter().flat_map(|(url, item)| {
            item.operations
                .iter()
                .map(move |(method, op)| (url.as_str(), *method, item, op))
        })
    }
}

/// The operations registered under one URL template.
///
/// Besides the per-method operations a path item may carry `parameters`
/// shared by all of its operations. Any other key (vendor extensions,
/// `summary`, `$ref`) is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(try_from = "IndexMap<String, serde_json::Value>")]
pub struct PathItem {
    /// Parameters shared by every operation of this path.
    pub parameters: Vec<Parameter>,
    /// Method -> operation, in document order.
    pub operations: IndexMap<HttpMethod, Operation>,
}

impl TryFrom<IndexMap<String, serde_json::Value>> for PathItem {
    type Error = serde_json::Error;

    fn try_from(raw: IndexMap<String, serde_json::Value>) -> Result<Self, Self::Error> {
        let mut item = PathItem::default();

        for (key, value) in raw {
            if key == "parameters" {
                item.parameters = serde_json::from_value(value)?;
            } else if let Ok(method) = HttpMethod::from_str(&key) {
                item.operations.insert(method, serde_json::from_value(value)?);
            }
        }

        Ok(item)
    }
}

/// A single HTTP operation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operation {
    /// Unique operation identifier; becomes the generated function name.
    #[serde(default)]
    pub operation_id: Option<String>,
    /// One-line summary.
    #[serde(default)]
    pub summary: String,
    /// Longer description.
    #[serde(default)]
    pub description: String,
    /// Declared parameters, in order.
    #[serde(default)]
    pub parameters: Vec<Parameter>,
    /// Status code -> response.
    #[serde(default)]
    pub responses: IndexMap<String, Response>,
    /// Security requirements; `None` falls back to the schema default.
    #[serde(default)]
    pub security: Option<Vec<SecurityRequirement>>,
    /// Grouping tags.
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Operation {
    /// Returns the schema of the `200` response, if the operation declares one.
    pub fn success_schema(&self) -> Option<&TypeDescriptor> {
        self.responses.get("200").and_then(|r| r.schema.as_ref())
    }
}
