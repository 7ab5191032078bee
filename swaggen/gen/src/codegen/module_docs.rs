//! Module documentation generation for generated clients.
//!
//! This module provides the [`ModuleDocBuilder`] struct for generating the
//! `//!` documentation at the top of a generated file: an introduction from
//! the schema's `info` block, the list of crates the generated code depends
//! on, and an overview of the generated functions grouped by HTTP method.

use std::collections::BTreeMap;

use proc_macro2::TokenStream;
use quote::quote;

use crate::codegen::shared::Imports;
use crate::ir::Module;

/// Builds module-level documentation for a generated client.
///
/// ## Examples
///
/// ```
/// use swaggen_gen::codegen::ModuleDocBuilder;
/// use swaggen_gen::ir::{Module, ModuleHeader};
///
/// let module = Module {
///     header: ModuleHeader {
///         title: "Account API".to_string(),
///         ..ModuleHeader::default()
///     },
///     ..Module::default()
/// };
///
/// let docs = ModuleDocBuilder::new(&module).build().to_string();
/// assert!(docs.contains("Account API"));
/// ```
pub struct ModuleDocBuilder<'a> {
    module: &'a Module,
}

impl<'a> ModuleDocBuilder<'a> {
    /// Creates a new module documentation builder.
    pub fn new(module: &'a Module) -> Self {
        Self { module }
    }

    /// Builds the complete module documentation as `#![doc = ...]` attributes.
    ///
    /// Each line gets its own attribute so the formatted output reads as
    /// `//!` comments rather than a block comment.
    pub fn build(&self) -> TokenStream {
        let sections = [
            self.intro_paragraph(),
            self.dependencies_section(),
            self.operations_section(),
        ]
        .join("\n\n");
        let lines = sections.lines();

        quote! {
            #(#![doc = #lines])*
        }
    }

    /// Title, version, description and sub-namespace.
    fn intro_paragraph(&self) -> String {
        let header = &self.module.header;
        let title = if header.title.is_empty() {
            "the API"
        } else {
            header.title.as_str()
        };

        let mut intro = format!(" Generated client for {title}");
        if !header.version.is_empty() {
            intro.push_str(&format!(" (version {})", header.version));
        }
        intro.push('.');

        if !header.description.trim().is_empty() {
            for line in header.description.lines() {
                intro.push_str(&format!("\n {line}"));
            }
        }

        if let Some(namespace) = &header.sub_namespace {
            intro.push_str(&format!("\n\n Sub-namespace: `{namespace}`."));
        }

        intro
    }

    /// Crates the generated code needs in the consumer's `Cargo.toml`.
    fn dependencies_section(&self) -> String {
        let imports = Imports::for_module(self.module);

        let mut crates = Vec::new();
        if imports.serde {
            crates.push("`serde` (with the `derive` feature)");
        }
        if imports.serde_repr {
            crates.push("`serde_repr`");
        }
        if imports.serde_json {
            crates.push("`serde_json`");
        }
        if imports.urlencoding {
            crates.push("`urlencoding`");
        }

        if crates.is_empty() {
            return " ## Dependencies\n\n None beyond the standard library.".to_string();
        }

        let mut lines = vec![" ## Dependencies".to_string(), String::new()];
        lines.extend(crates.iter().map(|c| format!(" - {c}")));
        lines.join("\n")
    }

    /// Functions grouped by HTTP method.
    fn operations_section(&self) -> String {
        let mut by_method: BTreeMap<&str, Vec<&str>> = BTreeMap::new();
        for function in &self.module.functions {
            by_method
                .entry(function.method.variant_name())
                .or_default()
                .push(&function.name);
        }

        if by_method.is_empty() {
            return " ## Operations\n\n No operations defined.".to_string();
        }

        let mut lines = vec![" ## Operations".to_string(), String::new()];
        for (method, names) in &by_method {
            lines.push(format!(" **{}**:", method.to_uppercase()));
            for name in names {
                lines.push(format!(" - [`{name}`]"));
            }
            lines.push(String::new());
        }
        lines.join("\n")
    }
}
