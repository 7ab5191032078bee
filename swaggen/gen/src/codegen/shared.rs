//! Shared declarations at the top of every generated module.
//!
//! Generates the `use` preamble and the request plumbing every operation
//! function returns: `Authentication`, `Method` and `RestRequest<Response>`.
//! Executing a `RestRequest` is left to the consumer's HTTP layer.

use proc_macro2::TokenStream;
use quote::quote;

use crate::codegen::types::uses_map;
use crate::ir::{Module, ParamKind, QueryValue};
use crate::resolver::RustType;

/// External items the generated code refers to.
///
/// Only the imports a module actually uses are emitted, so the generated
/// file compiles without unused-import warnings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Imports {
    /// `std::collections::HashMap`
    pub hash_map: bool,
    /// `serde::{Deserialize, Serialize}` for records
    pub serde: bool,
    /// `serde_repr::{Deserialize_repr, Serialize_repr}` for enums
    pub serde_repr: bool,
    /// `serde_json` for structured request bodies
    pub serde_json: bool,
    /// `urlencoding::encode` for string query values
    pub urlencoding: bool,
}

impl Imports {
    /// Scans a module for everything its generated code will reference.
    pub fn for_module(module: &Module) -> Self {
        let mut imports = Self {
            serde: module.records().next().is_some(),
            serde_repr: module.enums().next().is_some(),
            ..Self::default()
        };

        imports.hash_map = module
            .records()
            .flat_map(|r| r.fields.iter())
            .any(|f| uses_map(&f.ty.ty));

        for param in module.functions.iter().flat_map(|f| f.params.iter()) {
            match &param.kind {
                ParamKind::Query(QueryValue::Scalar(ty) | QueryValue::Array(ty)) => {
                    imports.urlencoding |= *ty == RustType::String;
                }
                ParamKind::Body { ty, .. } => {
                    imports.hash_map |= uses_map(ty);
                    imports.serde_json |= *ty != RustType::String;
                }
                ParamKind::Path { .. } => {}
            }
        }

        imports.hash_map |= module
            .functions
            .iter()
            .filter_map(|f| f.response.as_ref())
            .any(uses_map);

        imports
    }
}

/// Generates the `use` statements for a module.
pub fn generate_imports(imports: &Imports) -> TokenStream {
    let hash_map = imports
        .hash_map
        .then(|| quote! { use std::collections::HashMap; });
    let serde = imports
        .serde
        .then(|| quote! { use serde::{Deserialize, Serialize}; });
    let serde_repr = imports
        .serde_repr
        .then(|| quote! { use serde_repr::{Deserialize_repr, Serialize_repr}; });
    let urlencoding = imports
        .urlencoding
        .then(|| quote! { use urlencoding::encode; });

    quote! {
        #hash_map
        use std::marker::PhantomData;

        #serde
        #serde_repr
        #urlencoding
    }
}

/// Generates the authentication, method and request descriptor types.
///
/// ## Generated Code
///
/// ```ignore
/// pub struct RestRequest<Response> {
///     pub authentication: Authentication,
///     pub urlpath: String,
///     pub query_params: String,
///     pub body: String,
///     pub method: Method,
///     pub _marker: PhantomData<Response>,
/// }
/// ```
pub fn generate_request_types() -> TokenStream {
    quote! {
        /// Credentials attached to a request.
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub enum Authentication {
            /// HTTP Basic authentication.
            Basic {
                username: String,
                password: String,
            },
            /// Bearer token authentication.
            Bearer {
                token: String,
            },
        }

        /// HTTP method of a request.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Method {
            Get,
            Post,
            Put,
            Patch,
            Delete,
            Head,
            Options,
        }

        /// A prepared request whose successful response decodes to `Response`.
        ///
        /// `query_params` holds `name=value&` pairs with values already
        /// URL-encoded; `body` is empty when the operation sends none.
        #[derive(Debug)]
        pub struct RestRequest<Response> {
            pub authentication: Authentication,
            pub urlpath: String,
            pub query_params: String,
            pub body: String,
            pub method: Method,
            pub _marker: PhantomData<Response>,
        }
    }
}
