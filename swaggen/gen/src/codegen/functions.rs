//! Operation function generation.
//!
//! Each [`OperationFn`] becomes a free function that builds a
//! `RestRequest<Response>` without performing any I/O. The body is assembled
//! from fixed steps, in order:
//!
//! 1. `urlpath` - the URL template with every path argument substituted
//! 2. `query_params` - `name=value&` pairs for present query arguments
//! 3. `body_json` - the body argument, verbatim for strings, JSON otherwise
//! 4. `authentication` - Basic or Bearer from the leading arguments
//! 5. `method` - the HTTP method
//!
//! ## Example
//!
//! ```ignore
//! /// Fetch a user's friends.
//! pub fn list_friends(
//!     bearer_token: &str,
//!     user_id: &str,
//!     limit: Option<i32>,
//!     ids: &[String],
//! ) -> RestRequest<()> {
//!     let urlpath = "/v2/user/{userId}/friends".replace("{userId}", user_id);
//!     let mut query_params = String::new();
//!     if let Some(param) = limit {
//!         query_params.push_str(&format!("limit={}&", param));
//!     }
//!     for elem in ids {
//!         query_params.push_str(&format!("ids={}&", encode(elem)));
//!     }
//!     let body_json = String::new();
//!     let authentication = Authentication::Bearer {
//!         token: bearer_token.to_owned(),
//!     };
//!     let method = Method::Get;
//!     RestRequest {
//!         authentication,
//!         urlpath,
//!         query_params,
//!         body: body_json,
//!         method,
//!         _marker: PhantomData,
//!     }
//! }
//! ```

use proc_macro2::TokenStream;
use quote::quote;

use crate::codegen::types::{ident, type_tokens};
use crate::ir::{AuthKind, FnParam, OperationFn, ParamKind, QueryValue};
use crate::resolver::RustType;

/// Generates the function for one operation.
pub fn generate_function(function: &OperationFn) -> TokenStream {
    let name = ident(&function.name);
    let doc = (!function.doc.trim().is_empty()).then(|| {
        let text = format!(" {}", function.doc);
        quote! { #[doc = #text] }
    });

    let auth_args = function.auth.arg_names().iter().map(|arg| {
        let arg = ident(arg);
        quote! { #arg: &str }
    });
    let args = function.params.iter().map(generate_arg);

    let response = match &function.response {
        Some(ty) => type_tokens(ty),
        None => quote! { () },
    };

    let urlpath = generate_urlpath(function);
    let query = generate_query(function);
    let body = generate_body(function.body_param());
    let authentication = generate_authentication(function.auth);
    let method = ident(function.method.variant_name());

    quote! {
        #doc
        pub fn #name(#(#auth_args,)* #(#args),*) -> RestRequest<#response> {
            #urlpath
            #query
            #body
            #authentication
            let method = Method::#method;
            RestRequest {
                authentication,
                urlpath,
                query_params,
                body: body_json,
                method,
                _marker: PhantomData,
            }
        }
    }
}

/// Argument type as seen by callers.
///
/// Strings are borrowed everywhere; query scalars are always optional.
fn generate_arg(param: &FnParam) -> TokenStream {
    let name = ident(&param.name);
    let ty = match &param.kind {
        ParamKind::Path { ty } => borrowed(ty),
        ParamKind::Query(QueryValue::Scalar(ty)) => {
            let ty = borrowed(ty);
            quote! { Option<#ty> }
        }
        ParamKind::Query(QueryValue::Array(ty)) => {
            let ty = type_tokens(ty);
            quote! { &[#ty] }
        }
        ParamKind::Body { ty, required } => {
            let ty = borrowed(ty);
            if *required {
                ty
            } else {
                quote! { Option<#ty> }
            }
        }
    };
    quote! { #name: #ty }
}

/// `&str` for strings, the owned type otherwise.
fn borrowed(ty: &RustType) -> TokenStream {
    match ty {
        RustType::String => quote! { &str },
        other => type_tokens(other),
    }
}

/// Builds the `urlpath` binding.
///
/// Placeholders without a path argument are left in the string.
fn generate_urlpath(function: &OperationFn) -> TokenStream {
    let template = &function.url_template;
    let replacements = function.path_params().filter_map(|param| {
        let ParamKind::Path { ty } = &param.kind else {
            return None;
        };
        let placeholder = format!("{{{}}}", param.wire_name);
        let name = ident(&param.name);
        let value = match ty {
            RustType::String => quote! { #name },
            _ => quote! { &#name.to_string() },
        };
        Some(quote! { .replace(#placeholder, #value) })
    });
    let replacements: Vec<TokenStream> = replacements.collect();

    if replacements.is_empty() {
        quote! { let urlpath = #template.to_string(); }
    } else {
        quote! { let urlpath = #template #(#replacements)*; }
    }
}

/// Builds the `query_params` binding.
///
/// Keys are written under their schema name. String values are
/// URL-encoded; other scalars use their `Display` form.
fn generate_query(function: &OperationFn) -> TokenStream {
    let appends: Vec<TokenStream> = function
        .query_params()
        .filter_map(|param| {
            let ParamKind::Query(value) = &param.kind else {
                return None;
            };
            let name = ident(&param.name);
            let pattern = format!("{}={{}}&", escape_braces(&param.wire_name));

            Some(match value {
                QueryValue::Scalar(ty) => {
                    let rendered = encoded(ty, quote! { param });
                    quote! {
                        if let Some(param) = #name {
                            query_params.push_str(&format!(#pattern, #rendered));
                        }
                    }
                }
                QueryValue::Array(ty) => {
                    let rendered = encoded(ty, quote! { elem });
                    quote! {
                        for elem in #name {
                            query_params.push_str(&format!(#pattern, #rendered));
                        }
                    }
                }
            })
        })
        .collect();

    if appends.is_empty() {
        quote! { let query_params = String::new(); }
    } else {
        quote! {
            let mut query_params = String::new();
            #(#appends)*
        }
    }
}

/// Wraps string values in `encode(..)`.
fn encoded(ty: &RustType, value: TokenStream) -> TokenStream {
    match ty {
        RustType::String => quote! { encode(#value) },
        _ => value,
    }
}

/// Escapes braces so a wire name can sit inside a format string.
fn escape_braces(text: &str) -> String {
    text.replace('{', "{{").replace('}', "}}")
}

/// Builds the `body_json` binding.
fn generate_body(body: Option<&FnParam>) -> TokenStream {
    let Some(param) = body else {
        return quote! { let body_json = String::new(); };
    };
    let ParamKind::Body { ty, required } = &param.kind else {
        return quote! { let body_json = String::new(); };
    };
    let name = ident(&param.name);

    let value = match (ty, *required) {
        (RustType::String, true) => quote! { #name.to_owned() },
        (RustType::String, false) => quote! { #name.map(str::to_owned).unwrap_or_default() },
        (_, true) => quote! { serde_json::to_string(&#name).unwrap_or_default() },
        (_, false) => quote! {
            #name
                .as_ref()
                .and_then(|value| serde_json::to_string(value).ok())
                .unwrap_or_default()
        },
    };

    quote! { let body_json = #value; }
}

/// Builds the `authentication` binding from the leading arguments.
fn generate_authentication(auth: AuthKind) -> TokenStream {
    match auth {
        AuthKind::Basic => quote! {
            let authentication = Authentication::Basic {
                username: basic_auth_username.to_owned(),
                password: basic_auth_password.to_owned(),
            };
        },
        AuthKind::Bearer => quote! {
            let authentication = Authentication::Bearer {
                token: bearer_token.to_owned(),
            };
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::format_tokens;
    use swaggen_define::HttpMethod;

    fn function(params: Vec<FnParam>) -> OperationFn {
        OperationFn {
            name: "list_friends".to_string(),
            operation_id: "ListFriends".to_string(),
            doc: "List friends.".to_string(),
            method: HttpMethod::Get,
            url_template: "/v2/user/{userId}/friends".to_string(),
            auth: AuthKind::Bearer,
            params,
            response: None,
        }
    }

    fn param(name: &str, wire: &str, kind: ParamKind) -> FnParam {
        FnParam {
            name: name.to_string(),
            wire_name: wire.to_string(),
            kind,
        }
    }

    fn render(function: &OperationFn) -> String {
        format_tokens(&generate_function(function))
    }

    #[test]
    fn bearer_function_without_params() {
        let mut f = function(vec![]);
        f.url_template = "/healthcheck".to_string();
        let code = render(&f);

        assert!(code.contains("/// List friends."));
        assert!(code.contains("pub fn list_friends(bearer_token: &str) -> RestRequest<()>"));
        assert!(code.contains("let urlpath = \"/healthcheck\".to_string();"));
        assert!(code.contains("let query_params = String::new();"));
        assert!(code.contains("let body_json = String::new();"));
        assert!(code.contains("Authentication::Bearer"));
        assert!(code.contains("token: bearer_token.to_owned()"));
        assert!(code.contains("let method = Method::Get;"));
        assert!(code.contains("_marker: PhantomData"));
        assert!(!code.contains("let mut"));
    }

    #[test]
    fn basic_auth_takes_username_and_password() {
        let mut f = function(vec![]);
        f.auth = AuthKind::Basic;
        let code = render(&f);

        assert!(code.contains("basic_auth_username: &str"));
        assert!(code.contains("basic_auth_password: &str"));
        assert!(code.contains("username: basic_auth_username.to_owned()"));
        assert!(code.contains("password: basic_auth_password.to_owned()"));
    }

    #[test]
    fn path_params_replace_placeholders() {
        let mut f = function(vec![
            param("user_id", "userId", ParamKind::Path { ty: RustType::String }),
            param("page", "page", ParamKind::Path { ty: RustType::I32 }),
        ]);
        f.url_template = "/v2/user/{userId}/page/{page}".to_string();
        let code = render(&f);

        assert!(code.contains("user_id: &str"));
        assert!(code.contains("page: i32"));
        assert!(code.contains(".replace(\"{userId}\", user_id)"));
        assert!(code.contains(".replace(\"{page}\", &page.to_string())"));
    }

    #[test]
    fn query_params_append_when_present() {
        let code = render(&function(vec![
            param("limit", "limit", ParamKind::Query(QueryValue::Scalar(RustType::I32))),
            param(
                "cursor",
                "cursor",
                ParamKind::Query(QueryValue::Scalar(RustType::String)),
            ),
            param("ids", "ids", ParamKind::Query(QueryValue::Array(RustType::String))),
        ]));

        assert!(code.contains("limit: Option<i32>"));
        assert!(code.contains("cursor: Option<&str>"));
        assert!(code.contains("ids: &[String]"));
        assert!(code.contains("let mut query_params = String::new();"));
        assert!(code.contains("if let Some(param) = limit"));
        assert!(code.contains("format!(\"limit={}&\", param)"));
        assert!(code.contains("format!(\"cursor={}&\", encode(param))"));
        assert!(code.contains("for elem in ids"));
        assert!(code.contains("format!(\"ids={}&\", encode(elem))"));
    }

    #[test]
    fn query_key_keeps_wire_name() {
        let code = render(&function(vec![param(
            "user_ids",
            "userIds",
            ParamKind::Query(QueryValue::Scalar(RustType::String)),
        )]));
        assert!(code.contains("\"userIds={}&\""));
    }

    #[test]
    fn string_body_passes_through() {
        let code = render(&function(vec![param(
            "body",
            "body",
            ParamKind::Body {
                ty: RustType::String,
                required: true,
            },
        )]));
        assert!(code.contains("body: &str"));
        assert!(code.contains("let body_json = body.to_owned();"));
    }

    #[test]
    fn record_body_is_json_encoded() {
        let mut f = function(vec![param(
            "body",
            "body",
            ParamKind::Body {
                ty: RustType::Record("ApiAccount".to_string()),
                required: true,
            },
        )]);
        f.response = Some(RustType::Record("ApiSession".to_string()));
        let code = render(&f);

        assert!(code.contains("body: ApiAccount"));
        assert!(code.contains("serde_json::to_string(&body).unwrap_or_default()"));
        assert!(code.contains("-> RestRequest<ApiSession>"));
    }

    #[test]
    fn optional_body_defaults_to_empty() {
        let code = render(&function(vec![param(
            "body",
            "body",
            ParamKind::Body {
                ty: RustType::Vec(Box::new(RustType::I32)),
                required: false,
            },
        )]));
        assert!(code.contains("body: Option<Vec<i32>>"));
        assert!(code.contains("serde_json::to_string(value).ok()"));
    }

    #[test]
    fn braces_in_wire_names_are_escaped() {
        assert_eq!(escape_braces("a{b}"), "a{{b}}");
    }
}
