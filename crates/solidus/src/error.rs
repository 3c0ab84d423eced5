// File: src/error.rs
// Purpose: handler error types and the kind -> status table

use axum::http::StatusCode;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

/// Category of a domain failure.
///
/// Services tag failures with a kind instead of picking status codes; the
/// dispatcher maps the kind through [`ErrorKind::status`] when the error
/// reaches the client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    NotFound,
    Validation,
    Conflict,
    Internal,
}

impl ErrorKind {
    /// Fixed kind -> status table applied at the dispatch boundary.
    pub fn status(self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::Validation => StatusCode::BAD_REQUEST,
            ErrorKind::Conflict => StatusCode::CONFLICT,
            ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Error type returned by route handlers.
///
/// `Http` and `Domain` are client-facing: their message goes out verbatim in
/// the `{"error": ...}` body. Everything that lands in `Internal` is logged
/// server-side and masked to a generic 500.
#[derive(Debug, Error)]
pub enum Error {
    /// Typed HTTP error with an explicit status.
    #[error("{status} {message}")]
    Http { status: StatusCode, message: String },

    /// Tagged domain error; the kind decides the status.
    #[error("{message}")]
    Domain { kind: ErrorKind, message: String },

    /// Anything else. Never shown to the client.
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl Error {
    /// Typed HTTP error, sent to the client exactly as given.
    pub fn http(status: StatusCode, message: impl Into<String>) -> Self {
        Error::Http {
            status,
            message: message.into(),
        }
    }

    /// Tagged domain error.
    pub fn domain(kind: ErrorKind, message: impl Into<String>) -> Self {
        Error::Domain {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::domain(ErrorKind::NotFound, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::domain(ErrorKind::Validation, message)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::domain(ErrorKind::Conflict, message)
    }

    /// Opaque internal error from a plain message.
    pub fn internal(message: impl Into<String>) -> Self {
        Error::Internal(anyhow::anyhow!("{}", message.into()))
    }
}

impl From<solidus_router::RouterError> for Error {
    fn from(err: solidus_router::RouterError) -> Self {
        Error::Internal(anyhow::Error::new(err))
    }
}
