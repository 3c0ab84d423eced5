//! Pattern normalization and segment parsing.
//!
//! Pure functions shared by the route table and the site compiler: same
//! input, same output, no side effects.

use crate::RouterError;

/// A single element of a compiled pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    /// Matches exactly this string.
    Literal(String),
    /// Matches any value, bound under this name at match time.
    Param(String),
}

/// Normalizes a pattern or request path.
///
/// Guarantees a leading `/` and strips a trailing `/`; the root pattern stays
/// `"/"`. Whitespace around the input is ignored.
pub fn normalize_pattern(pattern: &str) -> String {
    let clean = pattern.trim();
    if clean.is_empty() {
        return "/".to_string();
    }

    let mut clean = if clean.starts_with('/') {
        clean.to_string()
    } else {
        format!("/{clean}")
    };

    if clean.len() > 1 && clean.ends_with('/') {
        clean.pop();
    }
    clean
}

/// Splits a path into raw segments after normalization.
///
/// The root path yields no segments at all, which is what gives the root
/// pattern its zero-segment cardinality.
pub fn split_path(path: &str) -> Vec<String> {
    let clean = normalize_pattern(path);
    if clean == "/" {
        return Vec::new();
    }
    clean[1..].split('/').map(str::to_string).collect()
}

/// Compiles a normalized pattern into its segment sequence.
///
/// A `:name` segment becomes a parameter; `:` alone is rejected. Everything
/// else is a literal.
pub fn parse_segments(pattern: &str) -> Result<Vec<Segment>, RouterError> {
    split_path(pattern)
        .into_iter()
        .map(|raw| match raw.strip_prefix(':') {
            Some("") => Err(RouterError::EmptyParamName {
                pattern: pattern.to_string(),
            }),
            Some(name) => Ok(Segment::Param(name.to_string())),
            None => Ok(Segment::Literal(raw)),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_adds_leading_slash() {
        assert_eq!(normalize_pattern("users"), "/users");
    }

    #[test]
    fn test_normalize_strips_trailing_slash() {
        assert_eq!(normalize_pattern("/users/"), "/users");
        assert_eq!(normalize_pattern("/"), "/");
    }

    #[test]
    fn test_normalize_empty_is_root() {
        assert_eq!(normalize_pattern(""), "/");
        assert_eq!(normalize_pattern("   "), "/");
    }

    #[test]
    fn test_split_root_has_no_segments() {
        assert!(split_path("/").is_empty());
    }

    #[test]
    fn test_split_plain_path() {
        assert_eq!(split_path("/users/42"), vec!["users", "42"]);
    }

    #[test]
    fn test_parse_segments_mixed() {
        let segments = parse_segments("/users/:id").unwrap();
        assert_eq!(
            segments,
            vec![
                Segment::Literal("users".to_string()),
                Segment::Param("id".to_string()),
            ]
        );
    }

    #[test]
    fn test_parse_segments_rejects_bare_colon() {
        let err = parse_segments("/users/:").unwrap_err();
        assert!(matches!(err, RouterError::EmptyParamName { .. }));
    }
}
