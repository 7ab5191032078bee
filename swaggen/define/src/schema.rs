//! Data type definitions and raw type descriptors.
//!
//! Descriptors are kept exactly as they appear in the document. Turning a
//! descriptor into a closed set of type shapes (and rejecting unsupported
//! ones) is the generator's job, so a single bad property only affects the
//! definition that owns it instead of failing the whole load.

use indexmap::IndexMap;
use serde::Deserialize;

/// Prefix of local definition references.
const DEFINITIONS_PREFIX: &str = "#/definitions/";

/// Strips the `#/definitions/` prefix from a reference.
///
/// References without the prefix are returned unchanged.
///
/// ## Examples
///
/// ```
/// use swaggen_define::clean_ref;
///
/// assert_eq!(clean_ref("#/definitions/apiAccount"), "apiAccount");
/// assert_eq!(clean_ref("apiAccount"), "apiAccount");
/// ```
pub fn clean_ref(reference: &str) -> &str {
    reference.strip_prefix(DEFINITIONS_PREFIX).unwrap_or(reference)
}

/// A raw type descriptor (property, parameter, response or item schema).
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TypeDescriptor {
    /// Primitive or container type name (`integer`, `array`, `object`, ...).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Reference to a definition (`#/definitions/Name`).
    #[serde(default, rename = "$ref")]
    pub reference: Option<String>,
    /// Element type for `array`.
    #[serde(default)]
    pub items: Option<Box<TypeDescriptor>>,
    /// Value type for `object` maps.
    #[serde(default, rename = "additionalProperties")]
    pub additional_properties: Option<AdditionalProperties>,
    /// Format hint (`int64`, `date-time`, `boolean`, ...).
    #[serde(default)]
    pub format: Option<String>,
    /// Free-form description; also scanned for the optionality marker.
    #[serde(default)]
    pub description: String,
    /// Short title.
    #[serde(default)]
    pub title: String,
}

impl TypeDescriptor {
    /// Creates a descriptor for a primitive or container type name.
    pub fn of_kind(kind: impl Into<String>) -> Self {
        Self {
            kind: Some(kind.into()),
            ..Self::default()
        }
    }

    /// Creates a descriptor referencing a definition.
    pub fn of_ref(reference: impl Into<String>) -> Self {
        Self {
            reference: Some(reference.into()),
            ..Self::default()
        }
    }

    /// Returns the referenced definition name without the `#/definitions/` prefix.
    pub fn ref_name(&self) -> Option<&str> {
        self.reference.as_deref().map(clean_ref)
    }
}

/// The `additionalProperties` of an object descriptor.
///
/// Swagger allows either a boolean or a nested schema.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AdditionalProperties {
    /// `true` / `false`: free-form values.
    Flag(bool),
    /// Typed map values.
    Schema(Box<TypeDescriptor>),
}

impl AdditionalProperties {
    /// Returns the value schema, if one was given.
    pub fn schema(&self) -> Option<&TypeDescriptor> {
        match self {
            Self::Flag(_) => None,
            Self::Schema(schema) => Some(schema),
        }
    }
}

/// A named data type: an enum when `enum` is non-empty, a record otherwise.
///
/// ## Examples
///
/// ```
/// use swaggen_define::Definition;
///
/// let def: Definition = serde_json::from_str(
///     r#"{ "type": "string", "enum": ["UNKNOWN", "EMAIL"], "default": "UNKNOWN" }"#,
/// ).unwrap();
///
/// assert!(def.is_enum());
/// assert_eq!(def.variants, vec!["UNKNOWN", "EMAIL"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Definition {
    /// Definition type (`object`, `string` for enums, ...).
    #[serde(default, rename = "type")]
    pub kind: Option<String>,
    /// Free-form description; for enums the i-th line documents the i-th variant.
    #[serde(default)]
    pub description: String,
    /// Short title.
    #[serde(default)]
    pub title: String,
    /// Enum variant names, in tag order.
    #[serde(default, rename = "enum")]
    pub variants: Vec<String>,
    /// Record properties, in document order.
    #[serde(default)]
    pub properties: IndexMap<String, TypeDescriptor>,
}

impl Definition {
    /// Returns true if this definition is an enum.
    pub fn is_enum(&self) -> bool {
        !self.variants.is_empty()
    }

    /// Returns the description, falling back to the title when empty.
    pub fn description_or_title(&self) -> &str {
        if self.description.is_empty() {
            &self.title
        } else {
            &self.description
        }
    }
}
