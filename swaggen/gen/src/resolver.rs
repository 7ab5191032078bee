//! Type resolution from schema descriptors to Rust types.
//!
//! Resolution happens in two steps:
//!
//! 1. [`PropertyType::from_descriptor`] classifies a raw [`TypeDescriptor`]
//!    into the closed set of shapes the generator understands, rejecting
//!    anything else with a [`SchemaError::UnsupportedType`].
//! 2. [`resolve`] maps a [`PropertyType`] onto a [`RustType`], looking up
//!    references in the definitions map passed in by the caller.
//!
//! ## Mapping
//!
//! | descriptor | Rust type |
//! |---|---|
//! | `integer` | `i32` |
//! | `number` | `f32` |
//! | `boolean` | `bool` |
//! | `string` | `String` (`Option<String>` when the description marks it optional) |
//! | `array<T>` | `Vec<T>` |
//! | `object` | `HashMap<String, V>` (`V = String` when untyped) |
//! | `$ref` to an enum | the enum type (`Copy`) |
//! | `$ref` to a record | the record type |

use std::fmt;

use indexmap::IndexMap;
use swaggen_define::{Definition, TypeDescriptor, clean_ref};

use crate::errors::SchemaError;
use crate::naming::{camel_to_pascal, pascal_to_camel, type_name};

/// Marker token that makes a string property optional.
const OPTIONAL_MARKER: &str = "optional";

/// Returns true if a property description marks the property as optional.
///
/// Swagger 2.0 documents generated from protobuf carry no structural
/// optionality for scalar fields, so the description text is scanned for the
/// word `optional` instead. The check is a case-sensitive substring match.
///
/// ## Examples
///
/// ```
/// use swaggen_gen::resolver::is_optional_by_convention;
///
/// assert!(is_optional_by_convention("The user's email (optional)."));
/// assert!(!is_optional_by_convention("The user's email."));
/// ```
pub fn is_optional_by_convention(description: &str) -> bool {
    description.contains(OPTIONAL_MARKER)
}

/// The closed set of type shapes the generator supports.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PropertyType {
    /// `type: integer`
    Integer,
    /// `type: number`
    Number,
    /// `type: boolean`
    Boolean,
    /// `type: string`, optional when the description heuristic matches.
    String { optional: bool },
    /// `type: array` with its item type.
    Array(Box<PropertyType>),
    /// `type: object`; keys are always strings, this is the value type.
    Map(Box<PropertyType>),
    /// `$ref` to a definition, by bare name.
    Reference(String),
}

impl PropertyType {
    /// Classifies a raw descriptor.
    ///
    /// A `$ref` wins over `type`. Objects without a typed
    /// `additionalProperties` are treated as string maps.
    ///
    /// ## Errors
    ///
    /// Returns [`SchemaError::UnsupportedType`] when the descriptor has
    /// neither `type` nor `$ref`, an unknown `type`, or an array without
    /// `items`.
    pub fn from_descriptor(descriptor: &TypeDescriptor, context: &str) -> Result<Self, SchemaError> {
        if let Some(name) = descriptor.ref_name() {
            return Ok(Self::Reference(name.to_string()));
        }

        let unsupported = |kind: &str| SchemaError::UnsupportedType {
            kind: kind.to_string(),
            context: context.to_string(),
        };

        match descriptor.kind.as_deref() {
            Some("integer") => Ok(Self::Integer),
            Some("number") => Ok(Self::Number),
            Some("boolean") => Ok(Self::Boolean),
            Some("string") => Ok(Self::String {
                optional: is_optional_by_convention(&descriptor.description),
            }),
            Some("array") => {
                let items = descriptor
                    .items
                    .as_deref()
                    .ok_or_else(|| unsupported("array without items"))?;
                Ok(Self::Array(Box::new(Self::from_descriptor(items, context)?)))
            }
            Some("object") => {
                let value = match descriptor
                    .additional_properties
                    .as_ref()
                    .and_then(|ap| ap.schema())
                {
                    Some(value) => Self::from_descriptor(value, context)?,
                    None => Self::String { optional: false },
                };
                Ok(Self::Map(Box::new(value)))
            }
            Some(other) => Err(unsupported(other)),
            None => Err(unsupported("<none>")),
        }
    }
}

/// A Rust type emitted by the generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RustType {
    /// `i32`
    I32,
    /// `f32`
    F32,
    /// `bool`
    Bool,
    /// `String`
    String,
    /// `Vec<T>`
    Vec(Box<RustType>),
    /// `HashMap<String, T>`
    Map(Box<RustType>),
    /// A generated enum (passed by value).
    Enum(String),
    /// A generated record struct.
    Record(String),
}

impl RustType {
    /// Returns true for types that are `Copy` in generated code.
    pub fn is_copy(&self) -> bool {
        matches!(self, Self::I32 | Self::F32 | Self::Bool | Self::Enum(_))
    }

    /// Name of the generated enum or record this type refers to, looking
    /// through `Vec` and `HashMap`.
    pub fn referenced_type(&self) -> Option<&str> {
        match self {
            Self::Vec(inner) | Self::Map(inner) => inner.referenced_type(),
            Self::Enum(name) | Self::Record(name) => Some(name),
            Self::I32 | Self::F32 | Self::Bool | Self::String => None,
        }
    }
}

impl fmt::Display for RustType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::I32 => write!(f, "i32"),
            Self::F32 => write!(f, "f32"),
            Self::Bool => write!(f, "bool"),
            Self::String => write!(f, "String"),
            Self::Vec(inner) => write!(f, "Vec<{inner}>"),
            Self::Map(inner) => write!(f, "HashMap<String, {inner}>"),
            Self::Enum(name) | Self::Record(name) => write!(f, "{name}"),
        }
    }
}

/// The result of resolving a property type.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedType {
    /// The emitted type.
    pub ty: RustType,
    /// Whether the occurrence is wrapped in `Option`.
    pub optional: bool,
}

impl ResolvedType {
    fn required(ty: RustType) -> Self {
        Self {
            ty,
            optional: false,
        }
    }
}

impl fmt::Display for ResolvedType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.optional {
            write!(f, "Option<{}>", self.ty)
        } else {
            write!(f, "{}", self.ty)
        }
    }
}

/// Looks up a definition by reference name.
///
/// Definition keys use inconsistent casing, so after an exact match the
/// camelCase and then the PascalCase spelling of the name are tried. Returns
/// the matching key together with the definition.
///
/// ## Examples
///
/// ```
/// use indexmap::IndexMap;
/// use swaggen_define::Definition;
/// use swaggen_gen::resolver::lookup_definition;
///
/// let mut definitions = IndexMap::new();
/// definitions.insert("SomeType".to_string(), Definition::default());
///
/// let (key, _) = lookup_definition(&definitions, "someType").unwrap();
/// assert_eq!(key, "SomeType");
/// assert!(lookup_definition(&definitions, "otherType").is_none());
/// ```
pub fn lookup_definition<'a>(
    definitions: &'a IndexMap<String, Definition>,
    reference: &str,
) -> Option<(&'a str, &'a Definition)> {
    let name = clean_ref(reference);

    [
        name.to_string(),
        pascal_to_camel(name),
        camel_to_pascal(name),
    ]
    .iter()
    .find_map(|candidate| definitions.get_key_value(candidate.as_str()))
    .map(|(key, def)| (key.as_str(), def))
}

/// Resolves a property type to the Rust type to emit.
///
/// ## Errors
///
/// Returns [`SchemaError::UnresolvedReference`] when a reference (at any
/// nesting depth) names no definition.
pub fn resolve(
    property: &PropertyType,
    definitions: &IndexMap<String, Definition>,
    context: &str,
) -> Result<ResolvedType, SchemaError> {
    let resolved = match property {
        PropertyType::Integer => ResolvedType::required(RustType::I32),
        PropertyType::Number => ResolvedType::required(RustType::F32),
        PropertyType::Boolean => ResolvedType::required(RustType::Bool),
        PropertyType::String { optional } => ResolvedType {
            ty: RustType::String,
            optional: *optional,
        },
        PropertyType::Array(inner) => {
            let inner = resolve(inner, definitions, context)?;
            ResolvedType::required(RustType::Vec(Box::new(inner.ty)))
        }
        PropertyType::Map(value) => {
            let value = resolve(value, definitions, context)?;
            ResolvedType::required(RustType::Map(Box::new(value.ty)))
        }
        PropertyType::Reference(name) => {
            let (key, definition) = lookup_definition(definitions, name).ok_or_else(|| {
                SchemaError::UnresolvedReference {
                    reference: name.clone(),
                    context: context.to_string(),
                }
            })?;
            let name = type_name(key);
            if definition.is_enum() {
                ResolvedType::required(RustType::Enum(name))
            } else {
                ResolvedType::required(RustType::Record(name))
            }
        }
    };

    Ok(resolved)
}

/// Classifies and resolves a raw descriptor in one step.
pub fn resolve_descriptor(
    descriptor: &TypeDescriptor,
    definitions: &IndexMap<String, Definition>,
    context: &str,
) -> Result<ResolvedType, SchemaError> {
    let property = PropertyType::from_descriptor(descriptor, context)?;
    resolve(&property, definitions, context)
}
