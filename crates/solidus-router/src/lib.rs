//! # Solidus Router
//!
//! The routing core of the Solidus framework: an ordered route table whose
//! entries are compiled either from explicit patterns (`/users/:id`) or from
//! route-file locations (`users/_id/get.rs`).
//!
//! Matching is deliberately simple:
//! - routes are tried in registration order, first full match wins
//! - a pattern only matches paths with exactly the same segment count
//! - literal segments compare byte-for-byte, parameter segments accept any
//!   value and are percent-decoded into the parameter map
//!
//! There are no catch-all segments, no priorities and no middleware. The
//! table is a `Vec` scanned linearly, which holds up fine for the
//! small-to-moderate route counts this framework targets.
//!
//! The crate is generic over the handler type so the matching core stays free
//! of any transport or executor choice.
//!
//! ## Example
//!
//! ```
//! use http::Method;
//! use solidus_router::Router;
//!
//! let mut router = Router::new();
//! router.add_route(Method::GET, "/users/:id", "user-handler").unwrap();
//!
//! let matched = router.match_route(&Method::GET, "/users/42").unwrap();
//! assert_eq!(*matched.handler, "user-handler");
//! assert_eq!(matched.params.get("id"), Some(&"42".to_string()));
//! ```

use std::collections::HashMap;

use http::Method;

mod error;
mod pattern;
mod site;

pub use error::RouterError;
pub use pattern::{normalize_pattern, parse_segments, split_path, Segment};
pub use site::{site_method, site_pattern, PARAM_MARKER};

/// A compiled route: method, normalized pattern, segment sequence, handler.
///
/// Routes are immutable once added; the router owns them exclusively.
#[derive(Debug, Clone)]
pub struct Route<H> {
    method: Method,
    pattern: String,
    segments: Vec<Segment>,
    handler: H,
}

impl<H> Route<H> {
    pub fn method(&self) -> &Method {
        &self.method
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Matches this route's segments against an already-split path.
    ///
    /// Exact segment-count equality is required. Parameter values are
    /// percent-decoded; a value that fails to decode rejects this candidate
    /// only, the scan moves on.
    fn capture(&self, path_segments: &[String]) -> Option<HashMap<String, String>> {
        if self.segments.len() != path_segments.len() {
            return None;
        }

        let mut params = HashMap::new();
        for (segment, raw) in self.segments.iter().zip(path_segments) {
            match segment {
                Segment::Literal(value) => {
                    if value != raw {
                        return None;
                    }
                }
                Segment::Param(name) => {
                    let value = urlencoding::decode(raw).ok()?;
                    params.insert(name.clone(), value.into_owned());
                }
            }
        }

        Some(params)
    }
}

/// Result of matching a request against the route table.
#[derive(Debug)]
pub struct RouteMatch<'a, H> {
    /// Handler of the winning route.
    pub handler: &'a H,
    /// Parameter values extracted from the path, percent-decoded.
    pub params: HashMap<String, String>,
    /// Normalized pattern of the winning route.
    pub pattern: &'a str,
}

/// Ordered route table.
///
/// `add_route` order is match order: the first registered route that fully
/// matches wins. Built once before serving starts; concurrent `match_route`
/// calls need no locking as long as nothing keeps adding routes.
#[derive(Debug)]
pub struct Router<H> {
    routes: Vec<Route<H>>,
}

impl<H> Default for Router<H> {
    fn default() -> Self {
        Self::new()
    }
}

impl<H> Router<H> {
    pub fn new() -> Self {
        Self { routes: Vec::new() }
    }

    /// Appends a route to the table.
    ///
    /// The pattern is normalized (leading `/`, no trailing `/` except for the
    /// root pattern itself) before the duplicate check, so `/users/` and
    /// `/users` conflict. A duplicate (method, pattern) pair is a hard error;
    /// there is no override.
    pub fn add_route(&mut self, method: Method, pattern: &str, handler: H) -> Result<(), RouterError> {
        if pattern.trim().is_empty() {
            return Err(RouterError::EmptyPattern);
        }

        let pattern = normalize_pattern(pattern);
        if self
            .routes
            .iter()
            .any(|route| route.method == method && route.pattern == pattern)
        {
            return Err(RouterError::DuplicateRoute {
                method: method.to_string(),
                pattern,
            });
        }

        let segments = parse_segments(&pattern)?;
        self.routes.push(Route {
            method,
            pattern,
            segments,
            handler,
        });
        Ok(())
    }

    /// Finds the first route matching `method` and `path`.
    ///
    /// The path goes through the same normalization as patterns, so trailing
    /// slashes are irrelevant. Linear in route count times segment count.
    pub fn match_route(&self, method: &Method, path: &str) -> Option<RouteMatch<'_, H>> {
        let path_segments = split_path(path);

        self.routes.iter().find_map(|route| {
            if route.method != *method {
                return None;
            }
            route.capture(&path_segments).map(|params| RouteMatch {
                handler: &route.handler,
                params,
                pattern: route.pattern.as_str(),
            })
        })
    }

    /// Routes in registration order, for startup logging.
    pub fn routes(&self) -> impl Iterator<Item = &Route<H>> {
        self.routes.iter()
    }

    pub fn len(&self) -> usize {
        self.routes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.routes.is_empty()
    }
}
