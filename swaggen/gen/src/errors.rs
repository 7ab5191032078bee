//! Error types for the swaggen generator.

use swaggen_define::LoadError;
use thiserror::Error;

/// Fatal errors that abort a generation run.
#[derive(Debug, Error)]
pub enum GeneratorError {
    /// The schema file could not be read or decoded.
    #[error(transparent)]
    Load(#[from] LoadError),

    /// Failed to generate code (rendered tokens are not a valid Rust file)
    #[error("Code generation failed: {0}")]
    CodeGenError(String),

    /// Failed to write output file
    #[error("Failed to write output file '{path}': {source}")]
    WriteError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    ConfigError(String),

    /// Output was produced but some definitions or operations were skipped.
    #[error("{count} schema error(s): generated output is incomplete")]
    Incomplete {
        /// Number of skipped entries.
        count: usize,
    },
}

/// A problem with a single definition or operation.
///
/// Schema errors are not fatal: the offending entry is skipped, the rest of
/// the schema is still generated, and all collected errors are reported once
/// generation finishes.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    /// A `$ref` names a definition that exists under neither its camelCase
    /// nor its PascalCase spelling.
    #[error("{context}: unresolved reference '{reference}'")]
    UnresolvedReference {
        /// The reference as written (without `#/definitions/`).
        reference: String,
        /// Where the reference was found.
        context: String,
    },

    /// A type descriptor uses a type the generator cannot map.
    #[error("{context}: unsupported type '{kind}'")]
    UnsupportedType {
        /// The `type` value, or `<none>` when neither `type` nor `$ref` is set.
        kind: String,
        /// Where the descriptor was found.
        context: String,
    },

    /// A parameter location/type combination the generator cannot express.
    #[error("operation '{operation}': parameter '{parameter}' {reason}")]
    UnsupportedParameter {
        operation: String,
        parameter: String,
        reason: String,
    },

    /// More than one `in: body` parameter on a single operation.
    #[error("operation '{operation}': multiple body parameters ('{first}' and '{second}')")]
    MultipleBodies {
        operation: String,
        first: String,
        second: String,
    },

    /// An operation without an `operationId`.
    #[error("{method} {path}: operation has no operationId")]
    MissingOperationId { method: String, path: String },

    /// Two operations normalize to the same function name.
    #[error("operation '{operation}': function name '{function}' is already taken")]
    DuplicateFunction { operation: String, function: String },

    /// A definition normalizes to a type name that is already declared,
    /// either by an earlier definition or by the shared request types.
    #[error("definition '{definition}': type name '{type_name}' is already taken")]
    DuplicateType {
        definition: String,
        type_name: String,
    },

    /// Two properties of one definition normalize to the same field name.
    #[error("definition '{definition}': property '{property}' collides with field '{field}'")]
    DuplicateField {
        definition: String,
        property: String,
        field: String,
    },

    /// An entry refers to a type whose definition was skipped.
    #[error("{context}: depends on '{type_name}', which was not generated")]
    MissingDependency { context: String, type_name: String },
}

/// A non-fatal observation about generated code.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationWarning {
    /// A `{placeholder}` in a URL template has no matching path parameter and
    /// stays in the generated path verbatim.
    #[error(
        "operation '{operation}': placeholder '{{{placeholder}}}' has no path parameter and is left in the URL"
    )]
    UnmatchedPlaceholder {
        operation: String,
        placeholder: String,
    },
}
