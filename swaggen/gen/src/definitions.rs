//! Definition emission: schema definitions -> enum and record declarations.
//!
//! A definition with a non-empty `enum` list becomes an integer-tagged enum;
//! every other definition becomes a record struct with one field per
//! property.

use std::collections::HashSet;

use indexmap::IndexMap;
use swaggen_define::{Definition, Schema};
use tracing::{debug, warn};

use crate::errors::SchemaError;
use crate::ir::{Declaration, EnumDecl, EnumVariant, FieldDecl, RecordDecl, single_line};
use crate::naming::{field_name, rust_ident, type_name};
use crate::resolver::resolve_descriptor;

/// Type names the generated module already declares or imports.
pub const RESERVED_TYPE_NAMES: &[&str] = &[
    "Authentication",
    "Method",
    "RestRequest",
    "PhantomData",
    "HashMap",
    "String",
    "Vec",
    "Option",
    "Serialize",
    "Deserialize",
    "Serialize_repr",
    "Deserialize_repr",
];

/// Emits one declaration per definition.
///
/// Definitions that fail to resolve are skipped; their errors are returned
/// alongside the declarations that succeeded. A definition whose type name
/// is reserved or already taken is skipped as
/// [`SchemaError::DuplicateType`], and records referring to a skipped
/// definition are dropped as [`SchemaError::MissingDependency`].
pub fn emit_definitions(schema: &Schema) -> (Vec<Declaration>, Vec<SchemaError>) {
    let mut declarations = Vec::with_capacity(schema.definitions.len());
    let mut errors = Vec::new();
    let mut taken: HashSet<String> = RESERVED_TYPE_NAMES.iter().map(|n| n.to_string()).collect();

    for (name, definition) in &schema.definitions {
        let result = emit_definition(name, definition, &schema.definitions).and_then(|decl| {
            if taken.insert(decl.name().to_string()) {
                Ok(decl)
            } else {
                Err(SchemaError::DuplicateType {
                    definition: name.clone(),
                    type_name: decl.name().to_string(),
                })
            }
        });

        match result {
            Ok(decl) => declarations.push(decl),
            Err(err) => {
                warn!(definition = %name, error = %err, "skipping definition");
                errors.push(err);
            }
        }
    }

    drop_dangling_records(&mut declarations, &mut errors);
    (declarations, errors)
}

/// Removes records with a field whose type was never declared, repeating
/// until every remaining reference resolves.
fn drop_dangling_records(declarations: &mut Vec<Declaration>, errors: &mut Vec<SchemaError>) {
    loop {
        let declared: HashSet<String> = declarations
            .iter()
            .map(|decl| decl.name().to_string())
            .collect();
        let before = declarations.len();

        declarations.retain(|decl| {
            let Declaration::Record(record) = decl else {
                return true;
            };
            let missing = record.fields.iter().find_map(|field| {
                field
                    .ty
                    .ty
                    .referenced_type()
                    .filter(|name| !declared.contains(*name))
                    .map(|name| (field, name))
            });
            match missing {
                None => true,
                Some((field, missing)) => {
                    let err = SchemaError::MissingDependency {
                        context: format!("record '{}', field '{}'", record.name, field.name),
                        type_name: missing.to_string(),
                    };
                    warn!(record = %record.name, error = %err, "dropping record");
                    errors.push(err);
                    false
                }
            }
        });

        if declarations.len() == before {
            break;
        }
    }
}

/// Emits the declaration for a single definition.
///
/// ## Errors
///
/// Returns the first [`SchemaError`] raised while resolving a record
/// property, or [`SchemaError::DuplicateField`] when two properties map to
/// the same field name. Enum definitions never fail.
pub fn emit_definition(
    name: &str,
    definition: &Definition,
    definitions: &IndexMap<String, Definition>,
) -> Result<Declaration, SchemaError> {
    if definition.is_enum() {
        let decl = emit_enum(name, definition);
        debug!(definition = %name, variants = decl.variants.len(), "emitted enum");
        Ok(Declaration::Enum(decl))
    } else {
        let decl = emit_record(name, definition, definitions)?;
        debug!(definition = %name, fields = decl.fields.len(), "emitted record");
        Ok(Declaration::Record(decl))
    }
}

/// Builds an enum declaration.
///
/// Variants keep their schema order and are tagged `0..n`. The i-th line of
/// the description documents the i-th variant; variants past the last line
/// (or on a blank line) stay undocumented.
fn emit_enum(name: &str, definition: &Definition) -> EnumDecl {
    let doc_lines: Vec<&str> = definition.description.split('\n').collect();

    let variants = definition
        .variants
        .iter()
        .enumerate()
        .map(|(idx, variant)| EnumVariant {
            name: rust_ident(variant),
            tag: idx as i32,
            doc: doc_lines
                .get(idx)
                .map(|line| line.trim_end())
                .filter(|line| !line.trim().is_empty())
                .map(str::to_string),
        })
        .collect();

    EnumDecl {
        name: type_name(name),
        doc: single_line(definition.description_or_title()),
        variants,
    }
}

/// Builds a record declaration, resolving every property type.
fn emit_record(
    name: &str,
    definition: &Definition,
    definitions: &IndexMap<String, Definition>,
) -> Result<RecordDecl, SchemaError> {
    let mut fields: Vec<FieldDecl> = Vec::with_capacity(definition.properties.len());

    for (key, descriptor) in &definition.properties {
        let context = format!("definition '{name}', property '{key}'");
        let ty = resolve_descriptor(descriptor, definitions, &context)?;
        let field = field_name(key);
        if fields.iter().any(|f| f.name == field) {
            return Err(SchemaError::DuplicateField {
                definition: name.to_string(),
                property: key.clone(),
                field,
            });
        }

        let doc = if descriptor.description.is_empty() {
            &descriptor.title
        } else {
            &descriptor.description
        };

        fields.push(FieldDecl {
            name: field,
            wire_name: key.clone(),
            ty,
            doc: single_line(doc),
        });
    }

    Ok(RecordDecl {
        name: type_name(name),
        doc: single_line(definition.description_or_title()),
        fields,
    })
}
