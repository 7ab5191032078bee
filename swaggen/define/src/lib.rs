//! Swaggen Schema Library
//!
//! This crate provides the in-memory model of a Swagger 2.0 style API
//! description (`definitions` + `paths`) and the loader that decodes it from
//! JSON. The model is consumed by the `swaggen-gen` crate to generate
//! strongly-typed Rust client code.
//!
//! ## Core Types
//!
//! - [`Schema`] - The decoded API description (definitions, paths, security)
//! - [`PathItem`] - All operations registered under one URL template
//! - [`HttpMethod`] - HTTP methods an operation can be bound to
//! - [`Operation`] - A single HTTP operation with parameters and responses
//! - [`Parameter`] - An operation argument and its [`ParameterLocation`]
//! - [`Definition`] - A named data type, either an enum or a record
//! - [`TypeDescriptor`] - The raw type descriptor of a property or parameter
//! - [`SecurityScheme`] - Entries of the `securityDefinitions` block
//!
//! ## Examples
//!
//! ```
//! use swaggen_define::{HttpMethod, Schema};
//!
//! let schema = Schema::from_json_str(r#"{
//!     "paths": {
//!         "/v2/account": {
//!             "get": { "operationId": "Nakama_GetAccount", "parameters": [] }
//!         }
//!     },
//!     "definitions": {
//!         "apiAccount": { "properties": { "wallet": { "type": "string" } } }
//!     }
//! }"#).unwrap();
//!
//! assert_eq!(schema.definitions.len(), 1);
//! let item = &schema.paths["/v2/account"];
//! assert!(item.operations.contains_key(&HttpMethod::Get));
//! ```

pub mod auth;
pub mod error;
pub mod load;
pub mod request;
pub mod response;
pub mod schema;
pub mod types;

// Re-export main types at crate root
pub use auth::{SecurityRequirement, SecurityScheme, SecuritySchemeKind};
pub use error::LoadError;
pub use load::load;
pub use request::{Parameter, ParameterLocation};
pub use response::Response;
pub use schema::{AdditionalProperties, Definition, TypeDescriptor, clean_ref};
pub use types::{HttpMethod, Info, Operation, PathItem, Schema};
