//! Code generation from the intermediate representation.
//!
//! Each submodule renders one part of the generated client file. None of
//! them look at the schema; every decision has already been made by the
//! emitters and recorded in [`crate::ir`].
//!
//! ## Submodules
//!
//! - [`module_docs`] - The `//!` header built from the schema's `info` block
//! - [`shared`] - `use` preamble plus the `Authentication`, `Method` and
//!   `RestRequest` declarations
//! - [`types`] - Enum and record declarations
//! - [`functions`] - One request-building function per operation
//!
//! ## Output Format
//!
//! All generators return `proc_macro2::TokenStream`. [`crate::output`]
//! assembles them, validates the file with `syn` and formats it with
//! `prettyplease`.

pub mod functions;
pub mod module_docs;
pub mod shared;
pub mod types;

pub use functions::generate_function;
pub use module_docs::ModuleDocBuilder;
pub use shared::{Imports, generate_imports, generate_request_types};
pub use types::generate_declaration;
