//! Identifier normalization.
//!
//! Swagger documents mix naming conventions freely: definition keys may be
//! `apiAccount` or `ApiAccount`, properties are usually camelCase, operation
//! ids are PascalCase with a service prefix. These helpers convert between
//! camelCase, PascalCase and snake_case, and turn the result into a legal
//! Rust identifier.
//!
//! All functions are total: they never fail, and inputs they cannot convert
//! unambiguously (leading underscores, digits after an underscore) are left
//! unchanged in the ambiguous segment.

/// Strict and reserved keywords that need a raw identifier.
const RUST_KEYWORDS: &[&str] = &[
    "abstract", "as", "async", "await", "become", "box", "break", "const", "continue", "do",
    "dyn", "else", "enum", "extern", "false", "final", "fn", "for", "gen", "if", "impl", "in",
    "let", "loop", "macro", "match", "mod", "move", "mut", "override", "priv", "pub", "ref",
    "return", "static", "struct", "trait", "true", "try", "type", "typeof", "unsafe", "unsized",
    "use", "virtual", "where", "while", "yield",
];

/// Keywords that cannot be raw identifiers.
const NON_RAW_KEYWORDS: &[&str] = &["crate", "self", "Self", "super"];

/// Converts a camelCase or PascalCase identifier to snake_case.
///
/// An underscore is inserted before every uppercase letter except the first
/// character, and all letters are lower-cased. Acronyms are not special-cased.
///
/// ## Examples
///
/// ```
/// use swaggen_gen::naming::camel_to_snake;
///
/// assert_eq!(camel_to_snake("UserId"), "user_id");
/// assert_eq!(camel_to_snake("id"), "id");
/// assert_eq!(camel_to_snake("HTTPStatus"), "h_t_t_p_status");
/// ```
pub fn camel_to_snake(input: &str) -> String {
    let mut output = String::with_capacity(input.len() + 4);

    for (idx, c) in input.chars().enumerate() {
        if c.is_uppercase() {
            if idx != 0 {
                output.push('_');
            }
            output.extend(c.to_lowercase());
        } else {
            output.push(c);
        }
    }

    output
}

/// Lower-cases the first character; everything else is unchanged.
///
/// ## Examples
///
/// ```
/// use swaggen_gen::naming::pascal_to_camel;
///
/// assert_eq!(pascal_to_camel("AuthenticateEmail"), "authenticateEmail");
/// assert_eq!(pascal_to_camel(""), "");
/// ```
pub fn pascal_to_camel(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Upper-cases the first character; everything else is unchanged.
///
/// ## Examples
///
/// ```
/// use swaggen_gen::naming::camel_to_pascal;
///
/// assert_eq!(camel_to_pascal("apiAccount"), "ApiAccount");
/// assert_eq!(camel_to_pascal(""), "");
/// ```
pub fn camel_to_pascal(input: &str) -> String {
    let mut chars = input.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Converts snake_case to camelCase.
///
/// ## Examples
///
/// ```
/// use swaggen_gen::naming::snake_to_camel;
///
/// assert_eq!(snake_to_camel("user_id"), "userId");
/// assert_eq!(snake_to_camel("_private"), "_private");
/// ```
pub fn snake_to_camel(input: &str) -> String {
    join_snake(input, false)
}

/// Converts snake_case to PascalCase.
///
/// ## Examples
///
/// ```
/// use swaggen_gen::naming::snake_to_pascal;
///
/// assert_eq!(snake_to_pascal("group_user_list"), "GroupUserList");
/// ```
pub fn snake_to_pascal(input: &str) -> String {
    join_snake(input, true)
}

/// Removes word-separating underscores and capitalizes the following letter.
///
/// An underscore only separates words when it is not the first character and
/// is directly followed by an ASCII letter; any other underscore is kept.
fn join_snake(input: &str, upper_first: bool) -> String {
    let chars: Vec<char> = input.chars().collect();
    let mut output = String::with_capacity(input.len());
    let mut upper_next = false;

    for (idx, &c) in chars.iter().enumerate() {
        if idx == 0 {
            if upper_first {
                output.extend(c.to_uppercase());
            } else {
                output.extend(c.to_lowercase());
            }
            continue;
        }

        if c == '_' {
            let separates = chars.get(idx + 1).is_some_and(char::is_ascii_alphabetic);
            if separates {
                upper_next = true;
            } else {
                output.push(c);
            }
            continue;
        }

        if upper_next {
            output.extend(c.to_uppercase());
            upper_next = false;
        } else {
            output.push(c);
        }
    }

    output
}

/// Removes a fixed prefix from an operation id, once.
///
/// ## Examples
///
/// ```
/// use swaggen_gen::naming::strip_operation_prefix;
///
/// assert_eq!(strip_operation_prefix("Nakama_GetAccount", Some("Nakama_")), "GetAccount");
/// assert_eq!(strip_operation_prefix("GetAccount", Some("Nakama_")), "GetAccount");
/// assert_eq!(strip_operation_prefix("Nakama_GetAccount", None), "Nakama_GetAccount");
/// ```
pub fn strip_operation_prefix<'a>(operation_id: &'a str, prefix: Option<&str>) -> &'a str {
    prefix
        .filter(|p| !p.is_empty())
        .and_then(|p| operation_id.strip_prefix(p))
        .unwrap_or(operation_id)
}

/// Turns a normalized name into a legal Rust identifier.
///
/// - characters outside `[A-Za-z0-9_]` become `_`
/// - a leading digit gets a `_` prefix
/// - keywords become raw identifiers (`type` -> `r#type`)
/// - `self`, `Self`, `super` and `crate` get a trailing `_`
///
/// ## Examples
///
/// ```
/// use swaggen_gen::naming::rust_ident;
///
/// assert_eq!(rust_ident("user_id"), "user_id");
/// assert_eq!(rust_ident("type"), "r#type");
/// assert_eq!(rust_ident("self"), "self_");
/// assert_eq!(rust_ident("2fa"), "_2fa");
/// assert_eq!(rust_ident("google.protobuf.Any"), "google_protobuf_Any");
/// ```
pub fn rust_ident(name: &str) -> String {
    let mut ident: String = name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' { c } else { '_' })
        .collect();

    if ident.is_empty() || ident == "_" {
        return "unnamed".to_string();
    }

    if ident.starts_with(|c: char| c.is_ascii_digit()) {
        ident.insert(0, '_');
    }

    if NON_RAW_KEYWORDS.contains(&ident.as_str()) {
        ident.push('_');
    } else if RUST_KEYWORDS.contains(&ident.as_str()) {
        ident.insert_str(0, "r#");
    }

    ident
}

/// Rust type name for a definition key (`apiAccount` -> `ApiAccount`).
pub fn type_name(definition_name: &str) -> String {
    rust_ident(&camel_to_pascal(definition_name))
}

/// Rust field or argument name for a property/parameter key (`userId` -> `user_id`).
pub fn field_name(key: &str) -> String {
    rust_ident(&camel_to_snake(key))
}

/// Rust function name for an operation id.
///
/// The prefix is stripped, the id is converted to camelCase and then to
/// snake_case: `Nakama_AuthenticateEmail` -> `authenticate_email`.
pub fn function_name(operation_id: &str, prefix: Option<&str>) -> String {
    let stripped = strip_operation_prefix(operation_id, prefix);
    rust_ident(&camel_to_snake(&pascal_to_camel(stripped)))
}
