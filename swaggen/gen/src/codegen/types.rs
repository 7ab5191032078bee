//! Type declaration generation.
//!
//! Renders [`EnumDecl`]s as `#[repr(i32)]` enums (serialized as their integer
//! tag through `serde_repr`) and [`RecordDecl`]s as `Default` structs whose
//! fields serialize under their original property keys.

use proc_macro2::{Ident, Literal, Span, TokenStream};
use quote::quote;

use crate::ir::{Declaration, EnumDecl, RecordDecl};
use crate::resolver::{ResolvedType, RustType};

/// Creates an identifier, honoring a leading `r#` for raw identifiers.
///
/// Names come from [`crate::naming`], which only produces valid identifiers.
pub fn ident(name: &str) -> Ident {
    match name.strip_prefix("r#") {
        Some(raw) => Ident::new_raw(raw, Span::call_site()),
        None => Ident::new(name, Span::call_site()),
    }
}

/// Renders a type as tokens.
///
/// ## Examples
///
/// ```
/// use swaggen_gen::codegen::types::type_tokens;
/// use swaggen_gen::resolver::RustType;
///
/// let ty = RustType::Map(Box::new(RustType::Vec(Box::new(RustType::I32))));
/// let rendered = type_tokens(&ty).to_string().replace(' ', "");
/// assert_eq!(rendered, "HashMap<String,Vec<i32>>");
/// ```
pub fn type_tokens(ty: &RustType) -> TokenStream {
    match ty {
        RustType::I32 => quote! { i32 },
        RustType::F32 => quote! { f32 },
        RustType::Bool => quote! { bool },
        RustType::String => quote! { String },
        RustType::Vec(inner) => {
            let inner = type_tokens(inner);
            quote! { Vec<#inner> }
        }
        RustType::Map(value) => {
            let value = type_tokens(value);
            quote! { HashMap<String, #value> }
        }
        RustType::Enum(name) | RustType::Record(name) => {
            let name = ident(name);
            quote! { #name }
        }
    }
}

/// Renders a possibly optional type as tokens.
pub fn resolved_tokens(resolved: &ResolvedType) -> TokenStream {
    let ty = type_tokens(&resolved.ty);
    if resolved.optional {
        quote! { Option<#ty> }
    } else {
        ty
    }
}

/// Returns true if `ty` mentions `HashMap` anywhere.
pub fn uses_map(ty: &RustType) -> bool {
    match ty {
        RustType::Map(_) => true,
        RustType::Vec(inner) => uses_map(inner),
        _ => false,
    }
}

/// Generates the tokens for one declaration.
pub fn generate_declaration(decl: &Declaration) -> TokenStream {
    match decl {
        Declaration::Enum(e) => generate_enum(e),
        Declaration::Record(r) => generate_record(r),
    }
}

/// Doc attribute for non-empty text, with the leading space `///` expects.
fn doc_attr(text: &str) -> TokenStream {
    if text.trim().is_empty() {
        return quote! {};
    }
    let text = format!(" {text}");
    quote! { #[doc = #text] }
}

/// Generates an integer-tagged enum.
///
/// The first variant is the `Default`. Variants keep their schema spelling,
/// so `non_camel_case_types` is allowed when any of them is not CamelCase.
///
/// ## Examples
///
/// ```ignore
/// /// - ONLINE: Connected. - OFFLINE: Not connected.
/// #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
/// #[repr(i32)]
/// pub enum ApiStatus {
///     /// - ONLINE: Connected.
///     #[default]
///     ONLINE = 0,
///     /// - OFFLINE: Not connected.
///     OFFLINE = 1,
/// }
/// ```
pub fn generate_enum(decl: &EnumDecl) -> TokenStream {
    let name = ident(&decl.name);
    let doc = doc_attr(&decl.doc);

    let needs_allow = decl
        .variants
        .iter()
        .any(|v| v.name.contains('_') || v.name.starts_with(|c: char| c.is_ascii_lowercase()));
    let allow = if needs_allow {
        quote! { #[allow(non_camel_case_types)] }
    } else {
        quote! {}
    };

    let variants = decl.variants.iter().enumerate().map(|(idx, variant)| {
        let variant_name = ident(&variant.name);
        let tag = Literal::i32_unsuffixed(variant.tag);
        let variant_doc = variant.doc.as_deref().map(doc_attr).unwrap_or_default();
        let default = if idx == 0 {
            quote! { #[default] }
        } else {
            quote! {}
        };
        quote! {
            #variant_doc
            #default
            #variant_name = #tag,
        }
    });

    quote! {
        #doc
        #[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize_repr, Deserialize_repr)]
        #[repr(i32)]
        #allow
        pub enum #name {
            #(#variants)*
        }
    }
}

/// Generates a record struct.
///
/// Every field falls back to its default when missing from a payload;
/// optional fields are left out of serialized output when absent.
pub fn generate_record(decl: &RecordDecl) -> TokenStream {
    let name = ident(&decl.name);
    let doc = doc_attr(&decl.doc);

    let fields = decl.fields.iter().map(|field| {
        let field_name = ident(&field.name);
        let field_doc = doc_attr(&field.doc);
        let ty = resolved_tokens(&field.ty);

        let wire = &field.wire_name;
        let renamed = field.name.trim_start_matches("r#") != wire.as_str();
        let serde_attr = match (renamed, field.ty.optional) {
            (true, true) => {
                quote! { #[serde(rename = #wire, skip_serializing_if = "Option::is_none")] }
            }
            (true, false) => quote! { #[serde(rename = #wire)] },
            (false, true) => quote! { #[serde(skip_serializing_if = "Option::is_none")] },
            (false, false) => quote! {},
        };

        quote! {
            #field_doc
            #serde_attr
            pub #field_name: #ty,
        }
    });

    quote! {
        #doc
        #[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
        #[serde(default)]
        pub struct #name {
            #(#fields)*
        }
    }
}
