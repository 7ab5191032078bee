//! Operation emission: HTTP operations -> operation functions.
//!
//! Every `(url template, method, operation)` triple becomes one
//! [`OperationFn`]: authentication arguments first, then one argument per
//! declared parameter. The function body (path substitution, query string,
//! authentication and body construction) is fully determined by the
//! argument list, so the IR only records the arguments and their shapes.
//!
//! ## Argument Shapes
//!
//! | location | schema type | argument |
//! |---|---|---|
//! | path | string | `&str` |
//! | path | integer / number / boolean | `i32` / `f32` / `bool` |
//! | query | scalar | `Option<T>` (`Option<&str>` for strings) |
//! | query | array of scalars | `&[T]` |
//! | body | string | `&str` (`Option<&str>` when not required) |
//! | body | anything else | resolved type (`Option<T>` when not required) |

use std::collections::HashSet;

use indexmap::IndexMap;
use swaggen_define::{
    Definition, HttpMethod, Operation, Parameter, ParameterLocation, PathItem, Schema,
    SecurityRequirement, SecuritySchemeKind,
};
use tracing::{debug, warn};

use crate::errors::{GenerationWarning, SchemaError};
use crate::ir::{AuthKind, FnParam, OperationFn, ParamKind, QueryValue, single_line};
use crate::naming::{field_name, function_name};
use crate::parser::unmatched_placeholders;
use crate::resolver::{PropertyType, RustType, resolve, resolve_descriptor};

/// Scheme name treated as Basic auth even without a `securityDefinitions` entry.
const BASIC_AUTH_SCHEME: &str = "BasicAuth";

/// Names bound inside every generated function body.
const RESERVED_LOCALS: &[&str] = &[
    "urlpath",
    "query_params",
    "body_json",
    "authentication",
    "method",
    "encode",
];

/// Free functions the generated module imports.
const RESERVED_FUNCTIONS: &[&str] = &["encode"];

/// Everything produced by emitting the operations of a schema.
#[derive(Debug, Default)]
pub struct EmittedOperations {
    /// Successfully emitted functions, in schema order.
    pub functions: Vec<OperationFn>,
    /// Operations that were skipped.
    pub errors: Vec<SchemaError>,
    /// Non-fatal observations about emitted functions.
    pub warnings: Vec<GenerationWarning>,
}

/// Emits one function per operation.
///
/// Operations are visited grouped by URL template then method, in document
/// order. A failing operation is skipped and its error collected; function
/// names must be unique, so a later operation whose name collides with an
/// earlier one is reported as [`SchemaError::DuplicateFunction`].
pub fn emit_operations(schema: &Schema, strip_prefix: Option<&str>) -> EmittedOperations {
    let mut emitted = EmittedOperations::default();
    let mut taken: HashSet<String> = HashSet::new();

    for (url, method, item, operation) in schema.operations() {
        let result = emit_operation(url, method, item, operation, schema, strip_prefix)
            .and_then(|(function, warnings)| {
                if taken.insert(function.name.clone()) {
                    Ok((function, warnings))
                } else {
                    Err(SchemaError::DuplicateFunction {
                        operation: function.operation_id,
                        function: function.name,
                    })
                }
            });

        match result {
            Ok((function, warnings)) => {
                for warning in &warnings {
                    warn!("{warning}");
                }
                emitted.warnings.extend(warnings);
                emitted.functions.push(function);
            }
            Err(err) => {
                warn!(%url, %method, error = %err, "skipping operation");
                emitted.errors.push(err);
            }
        }
    }

    emitted
}

/// Removes functions whose body or response type was never declared.
///
/// Returns one [`SchemaError::MissingDependency`] per removed function.
pub fn drop_dangling_functions(
    functions: &mut Vec<OperationFn>,
    declared: &HashSet<String>,
) -> Vec<SchemaError> {
    let mut errors = Vec::new();

    functions.retain(|function| {
        let body = function.body_param().and_then(|param| match &param.kind {
            ParamKind::Body { ty, .. } => Some(ty),
            _ => None,
        });
        let missing = body
            .into_iter()
            .chain(function.response.as_ref())
            .filter_map(RustType::referenced_type)
            .find(|name| !declared.contains(*name));

        match missing {
            None => true,
            Some(missing) => {
                let err = SchemaError::MissingDependency {
                    context: format!("operation '{}'", function.operation_id),
                    type_name: missing.to_string(),
                };
                warn!(function = %function.name, error = %err, "dropping operation");
                errors.push(err);
                false
            }
        }
    });

    errors
}

/// Emits the function for a single operation.
///
/// ## Errors
///
/// - [`SchemaError::MissingOperationId`] when the operation has no id
/// - [`SchemaError::UnsupportedParameter`] for header/form parameters and
///   non-scalar path or query parameters
/// - [`SchemaError::MultipleBodies`] for a second body parameter
/// - any resolution error from a body parameter or the success response
pub fn emit_operation(
    url: &str,
    method: HttpMethod,
    item: &PathItem,
    operation: &Operation,
    schema: &Schema,
    strip_prefix: Option<&str>,
) -> Result<(OperationFn, Vec<GenerationWarning>), SchemaError> {
    let operation_id =
        operation
            .operation_id
            .as_deref()
            .ok_or_else(|| SchemaError::MissingOperationId {
                method: method.to_string().to_uppercase(),
                path: url.to_string(),
            })?;

    let auth = auth_kind(operation, schema);
    let mut params: Vec<FnParam> = Vec::new();
    let mut body_name: Option<&str> = None;

    for param in effective_parameters(item, operation) {
        if param.location == ParameterLocation::Body {
            if let Some(first) = body_name {
                return Err(SchemaError::MultipleBodies {
                    operation: operation_id.to_string(),
                    first: first.to_string(),
                    second: param.name.clone(),
                });
            }
            body_name = Some(param.name.as_str());
        }
        let mut emitted = emit_param(operation_id, param, &schema.definitions)?;
        if RESERVED_LOCALS.contains(&emitted.name.as_str()) {
            emitted.name.push('_');
        }
        let taken = auth.arg_names().contains(&emitted.name.as_str())
            || params.iter().any(|p| p.name == emitted.name);
        if taken {
            return Err(SchemaError::UnsupportedParameter {
                operation: operation_id.to_string(),
                parameter: param.name.clone(),
                reason: format!("collides with another argument named '{}'", emitted.name),
            });
        }
        params.push(emitted);
    }

    let response = operation
        .success_schema()
        .map(|descriptor| {
            let context = format!("operation '{operation_id}', response");
            resolve_descriptor(descriptor, &schema.definitions, &context)
        })
        .transpose()?
        .map(|resolved| resolved.ty);

    let declared: Vec<&str> = params
        .iter()
        .filter(|p| matches!(p.kind, ParamKind::Path { .. }))
        .map(|p| p.wire_name.as_str())
        .collect();
    let warnings = unmatched_placeholders(url, &declared)
        .into_iter()
        .map(|placeholder| GenerationWarning::UnmatchedPlaceholder {
            operation: operation_id.to_string(),
            placeholder: placeholder.to_string(),
        })
        .collect();

    let doc = if operation.summary.is_empty() {
        &operation.description
    } else {
        &operation.summary
    };

    let mut name = function_name(operation_id, strip_prefix);
    if RESERVED_FUNCTIONS.contains(&name.as_str()) {
        name.push('_');
    }

    let function = OperationFn {
        name,
        operation_id: operation_id.to_string(),
        doc: single_line(doc),
        method,
        url_template: url.to_string(),
        auth,
        params,
        response,
    };

    debug!(
        operation = %operation_id,
        function = %function.name,
        params = function.params.len(),
        "emitted operation"
    );

    Ok((function, warnings))
}

/// Determines the authentication an operation requires.
///
/// The operation's own `security` list wins; without one the schema-level
/// default applies. Only the first requirement is considered: if it names a
/// scheme declared as `type: basic` (or the conventional `BasicAuth` name
/// when undeclared) the function takes a username and password. Every other
/// case, including no requirement at all, takes a bearer token.
pub fn auth_kind(operation: &Operation, schema: &Schema) -> AuthKind {
    let requirements: &[SecurityRequirement] = operation
        .security
        .as_deref()
        .unwrap_or(schema.security.as_slice());

    let is_basic = |scheme: &String| match schema.security_definitions.get(scheme) {
        Some(definition) => definition.kind == SecuritySchemeKind::Basic,
        None => scheme == BASIC_AUTH_SCHEME,
    };

    match requirements.first() {
        Some(requirement) if requirement.keys().any(is_basic) => AuthKind::Basic,
        _ => AuthKind::Bearer,
    }
}

/// Path-level parameters followed by the operation's own parameters.
///
/// An operation parameter overrides a path-level parameter with the same
/// name and location.
fn effective_parameters<'a>(item: &'a PathItem, operation: &'a Operation) -> Vec<&'a Parameter> {
    let overridden = |shared: &Parameter| {
        operation
            .parameters
            .iter()
            .any(|p| p.name == shared.name && p.location == shared.location)
    };

    item.parameters
        .iter()
        .filter(|shared| !overridden(shared))
        .chain(operation.parameters.iter())
        .collect()
}

/// Builds the function argument for one parameter.
fn emit_param(
    operation_id: &str,
    param: &Parameter,
    definitions: &IndexMap<String, Definition>,
) -> Result<FnParam, SchemaError> {
    let context = format!("operation '{operation_id}', parameter '{}'", param.name);
    let unsupported = |reason: &str| SchemaError::UnsupportedParameter {
        operation: operation_id.to_string(),
        parameter: param.name.clone(),
        reason: reason.to_string(),
    };

    let kind = match param.location {
        ParameterLocation::Header => return Err(unsupported("is a header parameter")),
        ParameterLocation::FormData => return Err(unsupported("is a form data parameter")),
        ParameterLocation::Path => {
            let property = PropertyType::from_descriptor(param.descriptor(), &context)?;
            let ty = scalar_type(&property)
                .ok_or_else(|| unsupported("is a path parameter with a non-scalar type"))?;
            ParamKind::Path { ty }
        }
        ParameterLocation::Query => {
            let property = PropertyType::from_descriptor(param.descriptor(), &context)?;
            let value = match &property {
                PropertyType::Array(inner) => scalar_type(inner).map(QueryValue::Array),
                other => scalar_type(other).map(QueryValue::Scalar),
            };
            ParamKind::Query(value.ok_or_else(|| {
                unsupported("is a query parameter that is not a scalar or an array of scalars")
            })?)
        }
        ParameterLocation::Body => {
            let property = PropertyType::from_descriptor(param.descriptor(), &context)?;
            let resolved = resolve(&property, definitions, &context)?;
            ParamKind::Body {
                ty: resolved.ty,
                required: param.required,
            }
        }
    };

    Ok(FnParam {
        name: field_name(&param.name),
        wire_name: param.name.clone(),
        kind,
    })
}

/// Maps scalar property types; containers and references yield `None`.
fn scalar_type(property: &PropertyType) -> Option<RustType> {
    match property {
        PropertyType::Integer => Some(RustType::I32),
        PropertyType::Number => Some(RustType::F32),
        PropertyType::Boolean => Some(RustType::Bool),
        PropertyType::String { .. } => Some(RustType::String),
        PropertyType::Array(_) | PropertyType::Map(_) | PropertyType::Reference(_) => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::schema_from_json;

    fn single_function(json: &str) -> OperationFn {
        let schema = schema_from_json(json);
        let emitted = emit_operations(&schema, Some("Nakama_"));
        assert!(emitted.errors.is_empty(), "errors: {:?}", emitted.errors);
        assert_eq!(emitted.functions.len(), 1);
        emitted.functions.into_iter().next().unwrap()
    }

    #[test]
    fn function_name_strips_prefix_and_snake_cases() {
        let function = single_function(
            r#"{ "paths": { "/v2/account": { "get": { "operationId": "Nakama_GetAccount" } } } }"#,
        );
        assert_eq!(function.name, "get_account");
        assert_eq!(function.operation_id, "Nakama_GetAccount");
        assert_eq!(function.method, HttpMethod::Get);
        assert_eq!(function.response, None);
    }

    #[test]
    fn no_security_defaults_to_bearer() {
        let function = single_function(
            r#"{ "paths": { "/v2/account": { "get": { "operationId": "GetAccount" } } } }"#,
        );
        assert_eq!(function.auth, AuthKind::Bearer);
        assert_eq!(function.auth.arg_names(), &["bearer_token"]);
    }

    #[test]
    fn basic_auth_requirement_by_name() {
        let function = single_function(
            r#"{ "paths": { "/v2/account/authenticate/email": { "post": {
                "operationId": "AuthenticateEmail",
                "security": [{ "BasicAuth": [] }, { "HttpKeyAuth": [] }]
            } } } }"#,
        );
        assert_eq!(function.auth, AuthKind::Basic);
    }

    #[test]
    fn basic_auth_requirement_by_security_definition() {
        let function = single_function(
            r#"{
                "securityDefinitions": { "ServerKey": { "type": "basic" } },
                "paths": { "/v2/rpc": { "post": {
                    "operationId": "Rpc", "security": [{ "ServerKey": [] }]
                } } }
            }"#,
        );
        assert_eq!(function.auth, AuthKind::Basic);
    }

    #[test]
    fn keyed_requirement_is_bearer() {
        let function = single_function(
            r#"{
                "securityDefinitions": { "HttpKeyAuth": { "type": "apiKey", "name": "http_key", "in": "header" } },
                "paths": { "/v2/rpc": { "post": {
                    "operationId": "Rpc", "security": [{ "HttpKeyAuth": [] }]
                } } }
            }"#,
        );
        assert_eq!(function.auth, AuthKind::Bearer);
    }

    #[test]
    fn schema_level_security_applies_without_operation_security() {
        let function = single_function(
            r#"{
                "security": [{ "BasicAuth": [] }],
                "paths": { "/v2/healthcheck": { "get": { "operationId": "Healthcheck" } } }
            }"#,
        );
        assert_eq!(function.auth, AuthKind::Basic);
    }

    #[test]
    fn parameters_map_to_argument_shapes() {
        let function = single_function(
            r##"{
                "definitions": { "apiAccountEmail": { "properties": { "email": { "type": "string" } } } },
                "paths": { "/v2/user/{userId}/link": { "post": {
                    "operationId": "LinkEmail",
                    "parameters": [
                        { "name": "userId", "in": "path", "required": true, "type": "string" },
                        { "name": "limit", "in": "query", "required": true, "type": "integer" },
                        { "name": "ids", "in": "query", "type": "array", "items": { "type": "string" } },
                        { "name": "body", "in": "body", "required": true,
                          "schema": { "$ref": "#/definitions/apiAccountEmail" } }
                    ]
                } } }
            }"##,
        );

        let kinds: Vec<_> = function
            .params
            .iter()
            .map(|p| (p.name.as_str(), p.kind.clone()))
            .collect();
        assert_eq!(
            kinds,
            vec![
                ("user_id", ParamKind::Path { ty: RustType::String }),
                ("limit", ParamKind::Query(QueryValue::Scalar(RustType::I32))),
                ("ids", ParamKind::Query(QueryValue::Array(RustType::String))),
                (
                    "body",
                    ParamKind::Body {
                        ty: RustType::Record("ApiAccountEmail".to_string()),
                        required: true
                    }
                ),
            ]
        );
        assert_eq!(function.path_params().count(), 1);
        assert_eq!(function.query_params().count(), 2);
        assert!(function.body_param().is_some());
    }

    #[test]
    fn response_reference_resolves_with_case_fallback() {
        let function = single_function(
            r##"{
                "definitions": { "ApiAccount": { "properties": { "wallet": { "type": "string" } } } },
                "paths": { "/v2/account": { "get": {
                    "operationId": "GetAccount",
                    "responses": { "200": { "schema": { "$ref": "#/definitions/apiAccount" } } }
                } } }
            }"##,
        );
        assert_eq!(
            function.response,
            Some(RustType::Record("ApiAccount".to_string()))
        );
    }

    #[test]
    fn unresolved_response_skips_operation_but_keeps_others() {
        let schema = schema_from_json(
            r##"{ "paths": {
                "/a": { "get": { "operationId": "A",
                    "responses": { "200": { "schema": { "$ref": "#/definitions/missing" } } } } },
                "/b": { "get": { "operationId": "B" } }
            } }"##,
        );
        let emitted = emit_operations(&schema, None);
        assert_eq!(emitted.functions.len(), 1);
        assert_eq!(emitted.functions[0].name, "b");
        assert!(matches!(
            emitted.errors.as_slice(),
            [SchemaError::UnresolvedReference { reference, .. }] if reference == "missing"
        ));
    }

    #[test]
    fn multiple_bodies_are_rejected() {
        let schema = schema_from_json(
            r#"{ "paths": { "/x": { "post": { "operationId": "X", "parameters": [
                { "name": "a", "in": "body", "schema": { "type": "string" } },
                { "name": "b", "in": "body", "schema": { "type": "string" } }
            ] } } } }"#,
        );
        let emitted = emit_operations(&schema, None);
        assert!(emitted.functions.is_empty());
        assert!(matches!(
            emitted.errors.as_slice(),
            [SchemaError::MultipleBodies { .. }]
        ));
    }

    #[test]
    fn unsupported_parameters_are_rejected() {
        let schema = schema_from_json(
            r#"{ "paths": {
                "/h": { "get": { "operationId": "H", "parameters": [
                    { "name": "x-trace", "in": "header", "type": "string" } ] } },
                "/q": { "get": { "operationId": "Q", "parameters": [
                    { "name": "filter", "in": "query", "type": "object" } ] } },
                "/p/{ids}": { "get": { "operationId": "P", "parameters": [
                    { "name": "ids", "in": "path", "type": "array", "items": { "type": "string" } } ] } }
            } }"#,
        );
        let emitted = emit_operations(&schema, None);
        assert!(emitted.functions.is_empty());
        assert_eq!(emitted.errors.len(), 3);
        assert!(
            emitted
                .errors
                .iter()
                .all(|e| matches!(e, SchemaError::UnsupportedParameter { .. }))
        );
    }

    #[test]
    fn missing_operation_id_is_reported() {
        let schema = schema_from_json(r#"{ "paths": { "/x": { "delete": {} } } }"#);
        let emitted = emit_operations(&schema, None);
        assert_eq!(
            emitted.errors,
            vec![SchemaError::MissingOperationId {
                method: "DELETE".to_string(),
                path: "/x".to_string()
            }]
        );
    }

    #[test]
    fn imported_function_names_get_a_trailing_underscore() {
        let function = single_function(
            r#"{ "paths": { "/v2/encode": { "post": {
                "operationId": "Nakama_Encode",
                "parameters": [{ "name": "text", "in": "query", "type": "string" }]
            } } } }"#,
        );
        assert_eq!(function.name, "encode_");
    }

    #[test]
    fn functions_using_undeclared_types_are_dropped() {
        let schema = schema_from_json(
            r##"{
                "paths": {
                    "/v2/account": {
                        "get": {
                            "operationId": "GetAccount",
                            "responses": { "200": { "schema": { "$ref": "#/definitions/apiAccount" } } }
                        },
                        "put": {
                            "operationId": "UpdateAccount",
                            "parameters": [{ "name": "body", "in": "body", "required": true,
                                "schema": { "$ref": "#/definitions/apiUpdate" } }]
                        }
                    },
                    "/healthcheck": { "get": { "operationId": "Healthcheck" } }
                },
                "definitions": {
                    "apiAccount": { "properties": { "id": { "type": "string" } } },
                    "apiUpdate": { "properties": { "id": { "type": "string" } } }
                }
            }"##,
        );
        let mut functions = emit_operations(&schema, None).functions;
        let declared: HashSet<String> = ["ApiAccount".to_string()].into_iter().collect();

        let errors = drop_dangling_functions(&mut functions, &declared);

        let names: Vec<_> = functions.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["get_account", "healthcheck"]);
        assert_eq!(
            errors,
            vec![SchemaError::MissingDependency {
                context: "operation 'UpdateAccount'".to_string(),
                type_name: "ApiUpdate".to_string(),
            }]
        );
    }

    #[test]
    fn duplicate_function_names_are_reported() {
        let schema = schema_from_json(
            r#"{ "paths": {
                "/a": { "get": { "operationId": "Nakama_ListFriends" } },
                "/b": { "get": { "operationId": "ListFriends" } }
            } }"#,
        );
        let emitted = emit_operations(&schema, Some("Nakama_"));
        assert_eq!(emitted.functions.len(), 1);
        assert!(matches!(
            emitted.errors.as_slice(),
            [SchemaError::DuplicateFunction { function, .. }] if function == "list_friends"
        ));
    }

    #[test]
    fn unmatched_placeholder_is_a_warning() {
        let schema = schema_from_json(
            r#"{ "paths": { "/v2/group/{groupId}/user/{userId}": { "get": {
                "operationId": "GetGroupUser",
                "parameters": [ { "name": "groupId", "in": "path", "required": true, "type": "string" } ]
            } } } }"#,
        );
        let emitted = emit_operations(&schema, None);
        assert_eq!(emitted.functions.len(), 1);
        assert_eq!(
            emitted.warnings,
            vec![GenerationWarning::UnmatchedPlaceholder {
                operation: "GetGroupUser".to_string(),
                placeholder: "userId".to_string(),
            }]
        );
    }

    #[test]
    fn path_level_parameters_are_shared_and_overridable() {
        let schema = schema_from_json(
            r#"{ "paths": { "/v2/channel/{channelId}": {
                "parameters": [
                    { "name": "channelId", "in": "path", "required": true, "type": "string" },
                    { "name": "limit", "in": "query", "type": "integer" }
                ],
                "get": { "operationId": "ListMessages", "parameters": [
                    { "name": "limit", "in": "query", "type": "string" },
                    { "name": "forward", "in": "query", "type": "boolean" }
                ] }
            } } }"#,
        );
        let emitted = emit_operations(&schema, None);
        let function = &emitted.functions[0];

        let params: Vec<_> = function
            .params
            .iter()
            .map(|p| (p.name.as_str(), p.kind.clone()))
            .collect();
        assert_eq!(
            params,
            vec![
                ("channel_id", ParamKind::Path { ty: RustType::String }),
                ("limit", ParamKind::Query(QueryValue::Scalar(RustType::String))),
                ("forward", ParamKind::Query(QueryValue::Scalar(RustType::Bool))),
            ]
        );
    }

    #[test]
    fn parameter_names_avoid_body_locals_and_each_other() {
        let function = single_function(
            r#"{ "paths": { "/x": { "get": { "operationId": "X", "parameters": [
                { "name": "method", "in": "query", "type": "string" }
            ] } } } }"#,
        );
        assert_eq!(function.params[0].name, "method_");
        assert_eq!(function.params[0].wire_name, "method");

        let schema = schema_from_json(
            r#"{ "paths": { "/y/{id}": { "get": { "operationId": "Y", "parameters": [
                { "name": "id", "in": "path", "required": true, "type": "string" },
                { "name": "id", "in": "query", "type": "string" }
            ] } } } }"#,
        );
        let emitted = emit_operations(&schema, None);
        assert!(matches!(
            emitted.errors.as_slice(),
            [SchemaError::UnsupportedParameter { parameter, .. }] if parameter == "id"
        ));
    }

    #[test]
    fn doc_prefers_summary_over_description() {
        let function = single_function(
            r#"{ "paths": { "/x": { "get": {
                "operationId": "X", "summary": "Do the thing\nquickly.", "description": "Longer text."
            } } } }"#,
        );
        assert_eq!(function.doc, "Do the thing quickly.");
    }
}
