//! Placeholder extraction from URL templates.
//!
//! Extracts parameter names from URL templates that use `{param}` syntax.

/// Extracts placeholder names from a URL template, in order of appearance.
///
/// Empty braces and unterminated placeholders are ignored.
///
/// ## Examples
///
/// ```
/// use swaggen_gen::parser::extract_path_params;
///
/// assert_eq!(extract_path_params("/v2/account"), vec![] as Vec<&str>);
/// assert_eq!(extract_path_params("/v2/group/{group_id}"), vec!["group_id"]);
/// assert_eq!(
///     extract_path_params("/v2/leaderboard/{leaderboardId}/owner/{ownerId}"),
///     vec!["leaderboardId", "ownerId"]
/// );
/// ```
pub fn extract_path_params(path: &str) -> Vec<&str> {
    let mut params = Vec::new();
    let mut start: Option<usize> = None;

    for (idx, c) in path.char_indices() {
        match c {
            '{' => start = Some(idx + 1),
            '}' => {
                if let Some(from) = start.take() {
                    let param = &path[from..idx];
                    if !param.is_empty() {
                        params.push(param);
                    }
                }
            }
            _ => {}
        }
    }

    params
}

/// Returns the placeholders of `path` that no name in `declared` fills.
///
/// ## Examples
///
/// ```
/// use swaggen_gen::parser::unmatched_placeholders;
///
/// assert_eq!(
///     unmatched_placeholders("/v2/user/{id}/group/{groupId}", &["id"]),
///     vec!["groupId"]
/// );
/// ```
pub fn unmatched_placeholders<'a>(path: &'a str, declared: &[&str]) -> Vec<&'a str> {
    let mut missing: Vec<&str> = Vec::new();
    for placeholder in extract_path_params(path) {
        if !declared.contains(&placeholder) && !missing.contains(&placeholder) {
            missing.push(placeholder);
        }
    }
    missing
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extract_no_params() {
        assert_eq!(extract_path_params("/healthcheck"), Vec::<&str>::new());
        assert_eq!(extract_path_params("/"), Vec::<&str>::new());
        assert_eq!(extract_path_params(""), Vec::<&str>::new());
    }

    #[test]
    fn extract_single_param() {
        assert_eq!(extract_path_params("/v2/friend/{id}"), vec!["id"]);
        assert_eq!(extract_path_params("/{id}"), vec!["id"]);
    }

    #[test]
    fn extract_multiple_params() {
        assert_eq!(
            extract_path_params("/v2/storage/{collection}/{userId}"),
            vec!["collection", "userId"]
        );
    }

    #[test]
    fn extract_consecutive_params() {
        assert_eq!(extract_path_params("/{a}{b}"), vec!["a", "b"]);
    }

    #[test]
    fn extract_ignores_empty_and_unterminated() {
        assert_eq!(extract_path_params("/x/{}/y"), Vec::<&str>::new());
        assert_eq!(extract_path_params("/x/{open"), Vec::<&str>::new());
        assert_eq!(extract_path_params("/x/close}"), Vec::<&str>::new());
    }

    #[test]
    fn unmatched_lists_each_placeholder_once() {
        assert_eq!(
            unmatched_placeholders("/{id}/{id}/{other}", &[]),
            vec!["id", "other"]
        );
        assert!(unmatched_placeholders("/{id}", &["id"]).is_empty());
    }
}
