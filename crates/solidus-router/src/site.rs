//! Declaration-site compilation.
//!
//! A route file's location is its route: the directory chain under the
//! routes root spells the URL, the file stem names the HTTP method. These
//! functions turn a site path into the (method, pattern) pair the route
//! table needs.

use std::path::{Component, Path};

use http::Method;

use crate::RouterError;

/// Directory-name prefix that marks a path parameter: `_id` becomes `:id`.
pub const PARAM_MARKER: char = '_';

/// Directory name that contributes no URL segment.
const INDEX_COMPONENT: &str = "index";

/// Derives the HTTP method from a route file's stem, case-insensitively.
///
/// `get.rs`, `GET.rs` and a bare `get` all map to `GET`; any stem outside
/// the fixed table is an error.
pub fn site_method(site: &Path) -> Result<Method, RouterError> {
    let stem = site
        .file_stem()
        .and_then(|stem| stem.to_str())
        .ok_or_else(|| RouterError::InvalidSite {
            site: site.display().to_string(),
        })?;

    match stem.to_ascii_lowercase().as_str() {
        "get" => Ok(Method::GET),
        "post" => Ok(Method::POST),
        "put" => Ok(Method::PUT),
        "patch" => Ok(Method::PATCH),
        "delete" => Ok(Method::DELETE),
        "options" => Ok(Method::OPTIONS),
        _ => Err(RouterError::UnrecognizedMethod {
            name: stem.to_string(),
        }),
    }
}

/// Compiles the URL pattern for a route file under `root`.
///
/// The file's directory chain relative to `root` maps to URL segments in
/// order: `index` contributes nothing, a [`PARAM_MARKER`]-prefixed component
/// contributes a parameter named by the rest of the component, anything else
/// is a literal. A site outside `root` is an error, as is a marker with
/// nothing behind it.
pub fn site_pattern(root: &Path, site: &Path) -> Result<String, RouterError> {
    let outside = || RouterError::OutsideRoot {
        site: site.display().to_string(),
        root: root.display().to_string(),
    };

    let relative = site.strip_prefix(root).map_err(|_| outside())?;
    let dir = relative.parent().unwrap_or_else(|| Path::new(""));

    let mut segments = Vec::new();
    for component in dir.components() {
        let name = match component {
            Component::Normal(name) => name.to_str().ok_or_else(|| RouterError::InvalidSite {
                site: site.display().to_string(),
            })?,
            Component::CurDir => continue,
            // `..` or a fresh root inside the relative part would escape the
            // routes root.
            _ => return Err(outside()),
        };

        if name == INDEX_COMPONENT || name.is_empty() {
            continue;
        }

        match name.strip_prefix(PARAM_MARKER) {
            Some("") => {
                return Err(RouterError::EmptyParamName {
                    pattern: relative.display().to_string(),
                })
            }
            Some(param) => segments.push(format!(":{param}")),
            None => segments.push(name.to_string()),
        }
    }

    if segments.is_empty() {
        Ok("/".to_string())
    } else {
        Ok(format!("/{}", segments.join("/")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_from_stem() {
        assert_eq!(site_method(Path::new("routes/users/get.rs")).unwrap(), Method::GET);
        assert_eq!(site_method(Path::new("routes/users/POST.rs")).unwrap(), Method::POST);
        assert_eq!(site_method(Path::new("routes/users/delete")).unwrap(), Method::DELETE);
    }

    #[test]
    fn test_method_rejects_unknown_stem() {
        let err = site_method(Path::new("routes/users/handler.rs")).unwrap_err();
        assert_eq!(
            err,
            RouterError::UnrecognizedMethod {
                name: "handler".to_string()
            }
        );
    }

    #[test]
    fn test_pattern_with_param_directory() {
        let pattern = site_pattern(Path::new("routes"), Path::new("routes/users/_id/get.rs")).unwrap();
        assert_eq!(pattern, "/users/:id");
    }

    #[test]
    fn test_pattern_index_collapses_to_root() {
        let pattern = site_pattern(Path::new("routes"), Path::new("routes/index/get.rs")).unwrap();
        assert_eq!(pattern, "/");
    }

    #[test]
    fn test_pattern_nested_index_is_elided() {
        let pattern =
            site_pattern(Path::new("routes"), Path::new("routes/users/index/get.rs")).unwrap();
        assert_eq!(pattern, "/users");
    }

    #[test]
    fn test_pattern_outside_root() {
        let err = site_pattern(Path::new("routes"), Path::new("elsewhere/get.rs")).unwrap_err();
        assert!(matches!(err, RouterError::OutsideRoot { .. }));
    }

    #[test]
    fn test_pattern_rejects_bare_marker() {
        let err = site_pattern(Path::new("routes"), Path::new("routes/users/_/get.rs")).unwrap_err();
        assert!(matches!(err, RouterError::EmptyParamName { .. }));
    }
}
