use thiserror::Error;

/// Errors raised while compiling or registering routes.
///
/// All of these surface during startup; a misconfigured route tree must keep
/// the process from ever serving traffic.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum RouterError {
    #[error("route pattern is empty")]
    EmptyPattern,

    #[error("duplicate route for {method} {pattern}")]
    DuplicateRoute { method: String, pattern: String },

    #[error("empty parameter name in {pattern}")]
    EmptyParamName { pattern: String },

    #[error("route file path is not valid UTF-8: {site}")]
    InvalidSite { site: String },

    #[error("route file {site} lies outside routes root {root}")]
    OutsideRoot { site: String, root: String },

    #[error("unrecognized HTTP method file name: {name}")]
    UnrecognizedMethod { name: String },
}
