// Solidus - convention-based HTTP routing
// Directory structure encodes the URL, the file stem encodes the method.

pub mod app;
pub mod config;
pub mod context;
pub mod error;
pub mod registry;

pub use app::App;
pub use config::Config;
pub use context::Context;
pub use error::{Error, ErrorKind, Result};
pub use registry::{handler_fn, HandlerFn, HandlerFuture, Registration, Registry};

// Re-export the routing core
pub use solidus_router as router;
pub use solidus_router::{RouterError, Segment, PARAM_MARKER};

// Re-export commonly used types from dependencies
pub use axum;
pub use axum::body::Bytes;
pub use axum::http::{HeaderMap, Method, StatusCode, Uri};
