//! Swagger client code generator library.
//!
//! This crate turns a Swagger 2.0 API description (loaded with
//! `swaggen-define`) into a single Rust source file containing:
//!
//! - `Authentication`, `Method` and `RestRequest<Response>` request plumbing
//! - One integer-tagged enum or record struct per schema definition
//! - One function per HTTP operation that builds a `RestRequest` from typed
//!   arguments (path substitution, query string, authentication and body)
//!
//! ## Pipeline
//!
//! 1. [`definitions`] and [`operations`] emit the intermediate representation
//!    in [`ir`], using [`naming`] and [`resolver`]
//! 2. [`codegen`] renders the IR into token streams
//! 3. [`output`] assembles, validates, formats and writes the file
//!
//! Problems with individual definitions or operations are collected as
//! [`errors::SchemaError`]s; the affected entry is skipped and the rest of
//! the schema is still generated.
//!
//! ## Example Usage
//!
//! ```
//! use swaggen_define::Schema;
//! use swaggen_gen::output::{GenerateOptions, render};
//!
//! let schema = Schema::from_json_str(r##"{
//!     "paths": { "/v2/account": { "get": {
//!         "operationId": "GetAccount",
//!         "responses": { "200": { "schema": { "$ref": "#/definitions/apiAccount" } } }
//!     } } },
//!     "definitions": {
//!         "apiAccount": { "type": "object", "properties": { "count": { "type": "integer" } } }
//!     }
//! }"##).unwrap();
//!
//! let generated = render(&schema, &GenerateOptions::default()).unwrap();
//! assert!(generated.errors.is_empty());
//! assert!(generated.code.contains("pub struct ApiAccount"));
//! assert!(generated.code.contains("pub fn get_account(bearer_token: &str) -> RestRequest<ApiAccount>"));
//! ```

pub mod codegen;
pub mod definitions;
pub mod errors;
pub mod ir;
pub mod naming;
pub mod operations;
pub mod output;
pub mod parser;
pub mod resolver;

#[cfg(test)]
mod test_utils;
