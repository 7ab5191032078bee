//! Intermediate representation of a generated client module.
//!
//! The emitters in [`crate::definitions`] and [`crate::operations`] turn the
//! schema into these plain data types; [`crate::codegen`] renders them into
//! Rust tokens. Keeping every naming, typing and control-flow decision in the
//! IR means the renderer never looks at the schema.

use swaggen_define::HttpMethod;

use crate::resolver::{ResolvedType, RustType};

/// A complete generated module.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Module {
    /// Module-level documentation inputs.
    pub header: ModuleHeader,
    /// One declaration per successfully emitted definition, in schema order.
    pub declarations: Vec<Declaration>,
    /// One function per successfully emitted operation, grouped by URL
    /// template then method, in schema order.
    pub functions: Vec<OperationFn>,
}

impl Module {
    /// Iterates all enum declarations.
    pub fn enums(&self) -> impl Iterator<Item = &EnumDecl> {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Enum(e) => Some(e),
            Declaration::Record(_) => None,
        })
    }

    /// Iterates all record declarations.
    pub fn records(&self) -> impl Iterator<Item = &RecordDecl> {
        self.declarations.iter().filter_map(|decl| match decl {
            Declaration::Record(r) => Some(r),
            Declaration::Enum(_) => None,
        })
    }
}

/// Inputs for the generated module documentation.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModuleHeader {
    /// `info.title`
    pub title: String,
    /// `info.version`
    pub version: String,
    /// `info.description`
    pub description: String,
    /// Sub-namespace given on the command line.
    pub sub_namespace: Option<String>,
}

/// A generated type declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum Declaration {
    /// Integer-tagged enum.
    Enum(EnumDecl),
    /// Record struct.
    Record(RecordDecl),
}

impl Declaration {
    /// Returns the declared type name.
    pub fn name(&self) -> &str {
        match self {
            Self::Enum(e) => &e.name,
            Self::Record(r) => &r.name,
        }
    }
}

/// An enum declaration with sequential integer tags.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDecl {
    /// Rust type name.
    pub name: String,
    /// Single-line doc text.
    pub doc: String,
    /// Variants in tag order.
    pub variants: Vec<EnumVariant>,
}

/// One enum variant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumVariant {
    /// Rust variant identifier.
    pub name: String,
    /// Discriminant (0-based position).
    pub tag: i32,
    /// Doc text, when the description has a line for this variant.
    pub doc: Option<String>,
}

/// A record struct declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct RecordDecl {
    /// Rust type name.
    pub name: String,
    /// Single-line doc text.
    pub doc: String,
    /// Fields in property order.
    pub fields: Vec<FieldDecl>,
}

/// One record field.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    /// Rust field identifier.
    pub name: String,
    /// Property key in the JSON payload.
    pub wire_name: String,
    /// Field type.
    pub ty: ResolvedType,
    /// Single-line doc text.
    pub doc: String,
}

/// How a generated function authenticates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuthKind {
    /// `basic_auth_username` + `basic_auth_password` arguments.
    Basic,
    /// A single `bearer_token` argument.
    Bearer,
}

impl AuthKind {
    /// Names of the leading authentication arguments.
    pub fn arg_names(self) -> &'static [&'static str] {
        match self {
            Self::Basic => &["basic_auth_username", "basic_auth_password"],
            Self::Bearer => &["bearer_token"],
        }
    }
}

/// One generated operation function.
#[derive(Debug, Clone, PartialEq)]
pub struct OperationFn {
    /// Rust function name.
    pub name: String,
    /// Original operation id (for diagnostics).
    pub operation_id: String,
    /// Single-line doc text.
    pub doc: String,
    /// HTTP method.
    pub method: HttpMethod,
    /// URL template with `{placeholders}`.
    pub url_template: String,
    /// Authentication arguments and value.
    pub auth: AuthKind,
    /// Declared parameters, in order.
    pub params: Vec<FnParam>,
    /// Success response type; `None` renders as `()`.
    pub response: Option<RustType>,
}

impl OperationFn {
    /// Iterates path parameters.
    pub fn path_params(&self) -> impl Iterator<Item = &FnParam> {
        self.params
            .iter()
            .filter(|p| matches!(p.kind, ParamKind::Path { .. }))
    }

    /// Iterates query parameters.
    pub fn query_params(&self) -> impl Iterator<Item = &FnParam> {
        self.params
            .iter()
            .filter(|p| matches!(p.kind, ParamKind::Query(_)))
    }

    /// Returns the body parameter, if any.
    pub fn body_param(&self) -> Option<&FnParam> {
        self.params
            .iter()
            .find(|p| matches!(p.kind, ParamKind::Body { .. }))
    }
}

/// A declared function argument.
#[derive(Debug, Clone, PartialEq)]
pub struct FnParam {
    /// Rust argument identifier.
    pub name: String,
    /// Name in the URL template or query string.
    pub wire_name: String,
    /// Location-specific shape.
    pub kind: ParamKind,
}

/// Where an argument goes and how it is typed.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamKind {
    /// Substituted into the path. `String` is passed as `&str`.
    Path { ty: RustType },
    /// Appended to the query string when present.
    Query(QueryValue),
    /// Serialized into the request body. `String` is passed as `&str` and
    /// sent verbatim; anything else is JSON-encoded.
    Body { ty: RustType, required: bool },
}

/// Shape of a query parameter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryValue {
    /// `Option<T>`, one `name=value&` pair when present.
    Scalar(RustType),
    /// `&[T]`, one `name=value&` pair per element.
    Array(RustType),
}

/// Flattens multi-line schema text into a single doc line.
///
/// ## Examples
///
/// ```
/// use swaggen_gen::ir::single_line;
///
/// assert_eq!(single_line("Fetch a user.\nRequires a session."), "Fetch a user. Requires a session.");
/// ```
pub fn single_line(text: &str) -> String {
    text.replace('\n', " ")
}
