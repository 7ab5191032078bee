//! Output assembly and writing for generated code.
//!
//! This module handles the final phase of code generation: running the
//! emitters over a schema, assembling the rendered pieces into a complete
//! Rust file, validating and formatting it, and writing it out.
//!
//! ## Output Structure
//!
//! ```text
//! // This code was automatically generated by swaggen. Do not edit manually.
//! //! module docs (info block, dependencies, operations)
//! use ...;                        // only what the module needs
//! pub enum Authentication { .. }
//! pub enum Method { .. }
//! pub struct RestRequest<Response> { .. }
//! // one declaration per definition
//! // one function per operation
//! ```
//!
//! ## Safety Guarantees
//!
//! - **Validation**: All generated code is validated with `syn` before writing
//! - **Formatting**: Output is formatted with `prettyplease` unless disabled
//! - **Atomic writes**: Files use the temp file + rename pattern to prevent
//!   partial writes

use std::collections::HashSet;
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use proc_macro2::TokenStream;
use quote::quote;
use swaggen_define::Schema;
use tracing::{debug, info};

use crate::codegen::{
    Imports, ModuleDocBuilder, generate_declaration, generate_function, generate_imports,
    generate_request_types,
};
use crate::definitions::emit_definitions;
use crate::errors::{GenerationWarning, GeneratorError, SchemaError};
use crate::ir::{Module, ModuleHeader};
use crate::operations::{drop_dangling_functions, emit_operations};

/// Notice placed on the first line of every generated file.
pub const GENERATED_NOTICE: &str =
    "// This code was automatically generated by swaggen. Do not edit manually.";

/// Settings for one generation run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// Operation-id prefix removed before deriving function names.
    pub strip_prefix: Option<String>,
    /// Sub-namespace recorded in the module documentation.
    pub sub_namespace: Option<String>,
    /// Format the output with `prettyplease`.
    pub format: bool,
}

impl Default for GenerateOptions {
    fn default() -> Self {
        Self {
            strip_prefix: None,
            sub_namespace: None,
            format: true,
        }
    }
}

impl GenerateOptions {
    /// Checks the options for values that can never be valid.
    ///
    /// ## Errors
    ///
    /// Returns `GeneratorError::ConfigError` for an explicitly empty
    /// sub-namespace.
    pub fn validate(&self) -> Result<(), GeneratorError> {
        if self.sub_namespace.as_deref().is_some_and(str::is_empty) {
            return Err(GeneratorError::ConfigError(
                "sub-namespace must not be empty".to_string(),
            ));
        }
        Ok(())
    }
}

/// The result of a generation run.
#[derive(Debug, Clone)]
pub struct Generated {
    /// The generated source text.
    pub code: String,
    /// The intermediate representation the code was rendered from.
    pub module: Module,
    /// Definitions and operations that were skipped.
    pub errors: Vec<SchemaError>,
    /// Non-fatal observations.
    pub warnings: Vec<GenerationWarning>,
}

impl Generated {
    /// Returns true if every definition and operation made it into the output.
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Runs the definition and operation emitters over a schema.
///
/// Errors from individual entries do not stop the run; they are returned
/// alongside the module built from everything else.
pub fn build_module(
    schema: &Schema,
    options: &GenerateOptions,
) -> (Module, Vec<SchemaError>, Vec<GenerationWarning>) {
    let (declarations, mut errors) = emit_definitions(schema);
    let mut operations = emit_operations(schema, options.strip_prefix.as_deref());
    errors.extend(operations.errors);

    let declared: HashSet<String> = declarations
        .iter()
        .map(|decl| decl.name().to_string())
        .collect();
    errors.extend(drop_dangling_functions(&mut operations.functions, &declared));

    let module = Module {
        header: ModuleHeader {
            title: schema.info.title.clone(),
            version: schema.info.version.clone(),
            description: schema.info.description.clone(),
            sub_namespace: options.sub_namespace.clone(),
        },
        declarations,
        functions: operations.functions,
    };

    debug!(
        declarations = module.declarations.len(),
        functions = module.functions.len(),
        errors = errors.len(),
        "built module"
    );

    (module, errors, operations.warnings)
}

/// Assembles the token stream for a complete module.
pub fn assemble_module(module: &Module) -> TokenStream {
    let docs = ModuleDocBuilder::new(module).build();
    let imports = generate_imports(&Imports::for_module(module));
    let request_types = generate_request_types();
    let declarations = module.declarations.iter().map(generate_declaration);
    let functions = module.functions.iter().map(generate_function);

    quote! {
        #docs

        #imports

        #request_types

        #(#declarations)*

        #(#functions)*
    }
}

/// Validates generated code using syn.
///
/// ## Errors
///
/// Returns `GeneratorError::CodeGenError` if the code fails to parse.
pub fn validate_code(tokens: &TokenStream) -> Result<syn::File, GeneratorError> {
    syn::parse2(tokens.clone())
        .map_err(|e| GeneratorError::CodeGenError(format!("Generated code is invalid: {}", e)))
}

/// Formats a parsed file with prettyplease, prepending the generated-code
/// notice.
pub fn format_code(file: &syn::File) -> String {
    let formatted = prettyplease::unparse(file);
    format!("{GENERATED_NOTICE}\n\n{formatted}")
}

/// Generates the client source for a schema.
///
/// ## Errors
///
/// - `GeneratorError::ConfigError` for invalid options
/// - `GeneratorError::CodeGenError` if the rendered tokens are not valid Rust
///
/// Schema errors are not fatal; check [`Generated::errors`].
pub fn render(schema: &Schema, options: &GenerateOptions) -> Result<Generated, GeneratorError> {
    options.validate()?;

    let (module, errors, warnings) = build_module(schema, options);
    let tokens = assemble_module(&module);
    let file = validate_code(&tokens)?;

    let code = if options.format {
        format_code(&file)
    } else {
        format!("{GENERATED_NOTICE}\n\n{tokens}\n")
    };

    Ok(Generated {
        code,
        module,
        errors,
        warnings,
    })
}

/// Where generated text goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Destination {
    /// The standard output stream.
    Stdout,
    /// A file, created or overwritten.
    File(PathBuf),
}

impl From<Option<PathBuf>> for Destination {
    fn from(path: Option<PathBuf>) -> Self {
        path.map_or(Self::Stdout, Self::File)
    }
}

/// Writes generated text to its destination.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if the text cannot be written.
pub fn write_output(text: &str, destination: &Destination) -> Result<(), GeneratorError> {
    match destination {
        Destination::Stdout => {
            let mut stdout = io::stdout().lock();
            stdout
                .write_all(text.as_bytes())
                .and_then(|()| stdout.flush())
                .map_err(|e| GeneratorError::WriteError {
                    path: "<stdout>".to_string(),
                    source: e,
                })
        }
        Destination::File(path) => {
            write_atomic(path, text)?;
            info!(path = %path.display(), bytes = text.len(), "wrote generated code");
            Ok(())
        }
    }
}

/// Writes content to a file atomically using temp file + rename.
///
/// The file is never left partially written: readers see either the old or
/// the new content.
///
/// ## Errors
///
/// Returns `GeneratorError::WriteError` if:
/// - Parent directories cannot be created
/// - The temp file cannot be written
/// - The rename operation fails
pub fn write_atomic(path: &Path, content: &str) -> Result<(), GeneratorError> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        fs::create_dir_all(parent).map_err(|e| GeneratorError::WriteError {
            path: parent.display().to_string(),
            source: e,
        })?;
    }

    let temp_path = path.with_extension("tmp");
    fs::write(&temp_path, content).map_err(|e| GeneratorError::WriteError {
        path: temp_path.display().to_string(),
        source: e,
    })?;

    fs::rename(&temp_path, path).map_err(|e| GeneratorError::WriteError {
        path: path.display().to_string(),
        source: e,
    })?;

    Ok(())
}
