//! Test fixtures for schema definitions and whole schemas.
//!
//! Only compiled for tests.

use indexmap::IndexMap;
use proc_macro2::TokenStream;
use swaggen_define::{Definition, Schema, TypeDescriptor};

use crate::output::{format_code, validate_code};

/// Builds an enum definition with the given variants and description.
pub fn enum_definition(variants: &[&str], description: &str) -> Definition {
    Definition {
        description: description.to_string(),
        variants: variants.iter().map(|v| v.to_string()).collect(),
        ..Definition::default()
    }
}

/// Builds a record definition from `(property, descriptor)` pairs.
pub fn record_definition(properties: &[(&str, TypeDescriptor)]) -> Definition {
    Definition {
        kind: Some("object".to_string()),
        properties: properties
            .iter()
            .map(|(name, descriptor)| (name.to_string(), descriptor.clone()))
            .collect::<IndexMap<_, _>>(),
        ..Definition::default()
    }
}

/// Decodes a schema from inline JSON, panicking on malformed fixtures.
pub fn schema_from_json(json: &str) -> Schema {
    Schema::from_json_str(json).expect("test fixture should decode")
}

/// A small schema exercising every declaration and argument shape.
pub const ACCOUNT_SCHEMA: &str = r##"{
    "info": { "title": "Account API", "version": "2.0", "description": "Manage user accounts." },
    "securityDefinitions": {
        "BasicAuth": { "type": "basic" },
        "HttpKeyAuth": { "type": "apiKey", "name": "http_key", "in": "header" }
    },
    "paths": {
        "/v2/account": {
            "get": {
                "operationId": "Nakama_GetAccount",
                "summary": "Fetch the current user's account.",
                "responses": { "200": { "schema": { "$ref": "#/definitions/apiAccount" } } }
            },
            "put": {
                "operationId": "Nakama_UpdateAccount",
                "parameters": [
                    { "name": "body", "in": "body", "required": true,
                      "schema": { "$ref": "#/definitions/apiUpdateAccountRequest" } }
                ]
            }
        },
        "/v2/account/authenticate/device": {
            "post": {
                "operationId": "Nakama_AuthenticateDevice",
                "security": [{ "BasicAuth": [] }],
                "parameters": [
                    { "name": "body", "in": "body", "required": true, "schema": { "type": "string" } },
                    { "name": "create", "in": "query", "type": "boolean" },
                    { "name": "username", "in": "query", "type": "string" }
                ]
            }
        },
        "/v2/user/{userId}/friends": {
            "get": {
                "operationId": "Nakama_ListFriends",
                "parameters": [
                    { "name": "userId", "in": "path", "required": true, "type": "string" },
                    { "name": "limit", "in": "query", "type": "integer" },
                    { "name": "ids", "in": "query", "type": "array", "items": { "type": "string" } }
                ]
            }
        }
    },
    "definitions": {
        "apiAccount": {
            "type": "object",
            "description": "A user account.",
            "properties": {
                "userId": { "type": "string" },
                "wallet": { "type": "string", "description": "Wallet JSON (optional)." },
                "metadata": { "type": "object", "additionalProperties": { "type": "string" } },
                "devices": { "type": "array", "items": { "$ref": "#/definitions/apiAccountDevice" } },
                "status": { "$ref": "#/definitions/apiStatus" }
            }
        },
        "apiAccountDevice": {
            "type": "object",
            "properties": { "id": { "type": "string" } }
        },
        "apiStatus": {
            "type": "string",
            "enum": ["ONLINE", "OFFLINE"],
            "description": "- ONLINE: Connected.\n- OFFLINE: Not connected."
        },
        "apiUpdateAccountRequest": {
            "type": "object",
            "properties": {
                "displayName": { "type": "string", "description": "Display name (optional)." },
                "timezone": { "type": "string" }
            }
        }
    }
}"##;

/// Validates and formats a token fragment the way the renderer does.
pub fn format_tokens(tokens: &TokenStream) -> String {
    let file = validate_code(tokens).expect("tokens should form a valid file");
    format_code(&file)
}
