// File: src/context.rs
// Purpose: per-request state: request data, response sink, params, lazy body

use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard};

use axum::body::{Body, Bytes};
use axum::http::request::Parts;
use axum::http::{header, HeaderMap, HeaderName, HeaderValue, Method, StatusCode, Uri};
use axum::response::Response;
use serde::Serialize;

use crate::error::{Error, Result};

/// Per-request context handed to route handlers.
///
/// One context per request, never shared across requests. The request side
/// is read-only; the response side is a buffered sink with commit-once
/// semantics: once a status went out (explicitly via [`Context::json`] or
/// [`Context::set_status`], or implicitly through the first raw
/// [`Context::write`]), later status and header mutations are silently
/// ignored. That keeps a handler that errors late from corrupting a response
/// the client already started receiving.
pub struct Context {
    parts: Parts,
    params: HashMap<String, String>,
    body: Option<Body>,
    body_cache: Option<std::result::Result<Bytes, String>>,
    response: ResponseHandle,
}

impl Context {
    pub(crate) fn new(
        parts: Parts,
        body: Body,
        params: &HashMap<String, String>,
        response: ResponseHandle,
    ) -> Self {
        Self {
            parts,
            // The context owns its parameters; nothing it holds points back
            // into the route table.
            params: params.clone(),
            body: Some(body),
            body_cache: None,
            response,
        }
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn uri(&self) -> &Uri {
        &self.parts.uri
    }

    pub fn path(&self) -> &str {
        self.parts.uri.path()
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.parts.headers
    }

    /// Request header value, if present and valid UTF-8.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.parts.headers.get(name)?.to_str().ok()
    }

    /// Path parameter bound at match time. Absent names yield `""`.
    pub fn param(&self, name: &str) -> &str {
        self.params.get(name).map(String::as_str).unwrap_or("")
    }

    pub fn params(&self) -> &HashMap<String, String> {
        &self.params
    }

    /// Query parameters, percent-decoded. Later duplicates win.
    pub fn query(&self) -> HashMap<String, String> {
        let Some(raw) = self.parts.uri.query() else {
            return HashMap::new();
        };

        raw.split('&')
            .filter(|pair| !pair.is_empty())
            .map(|pair| {
                let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
                (decode_query(key), decode_query(value))
            })
            .collect()
    }

    /// Single query parameter, percent-decoded.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.query().remove(name)
    }

    /// Full request payload.
    ///
    /// The first call drains the body into memory (no size cap) and caches
    /// the outcome; every later call returns the cached bytes, or the cached
    /// read error, without touching the transport again.
    pub async fn body(&mut self) -> Result<Bytes> {
        if self.body_cache.is_none() {
            let body = self.body.take().unwrap_or_default();
            let outcome = axum::body::to_bytes(body, usize::MAX)
                .await
                .map_err(|err| err.to_string());
            self.body_cache = Some(outcome);
        }

        match self.body_cache.get_or_insert_with(|| Ok(Bytes::new())) {
            Ok(bytes) => Ok(bytes.clone()),
            Err(message) => Err(Error::internal(format!(
                "failed to read request body: {message}"
            ))),
        }
    }

    /// Sets a response header. Silently ignored once the response committed.
    pub fn set_header(&self, name: &str, value: &str) -> Result<()> {
        let name = HeaderName::try_from(name)
            .map_err(|_| Error::internal(format!("invalid header name: {name}")))?;
        let value = HeaderValue::try_from(value)
            .map_err(|_| Error::internal(format!("invalid header value for {name}")))?;

        let mut state = self.response.lock();
        if state.committed {
            return Ok(());
        }
        state.headers.insert(name, value);
        Ok(())
    }

    /// Commits the response with `status` and no body of its own.
    ///
    /// A second call, or any call after the response committed, is ignored.
    pub fn set_status(&self, status: StatusCode) {
        let mut state = self.response.lock();
        if state.committed {
            return;
        }
        state.committed = true;
        state.status = Some(status);
    }

    /// Commits `status` and writes `data` as the JSON response body.
    ///
    /// A no-op if the response already committed. The commit happens before
    /// serialization, so a serialization failure propagates to the caller
    /// with the status already fixed.
    pub fn json<T: Serialize + ?Sized>(&self, status: StatusCode, data: &T) -> Result<()> {
        let mut state = self.response.lock();
        if state.committed {
            return Ok(());
        }

        state.headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        state.committed = true;
        state.status = Some(status);

        let payload = serde_json::to_vec(data)
            .map_err(|err| Error::internal(format!("failed to encode response body: {err}")))?;
        state.body.extend_from_slice(&payload);
        Ok(())
    }

    /// Raw body write.
    ///
    /// The first write without a prior explicit status commits the response
    /// as a 200. Writes always append; only status and headers freeze at
    /// commit time.
    pub fn write(&self, bytes: &[u8]) {
        let mut state = self.response.lock();
        if !state.committed {
            state.committed = true;
            state.status = Some(StatusCode::OK);
        }
        state.body.extend_from_slice(bytes);
    }
}

impl fmt::Debug for Context {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Context")
            .field("method", &self.parts.method)
            .field("path", &self.parts.uri.path())
            .field("params", &self.params)
            .finish()
    }
}

fn decode_query(raw: &str) -> String {
    urlencoding::decode(raw)
        .map(Cow::into_owned)
        .unwrap_or_else(|_| raw.to_string())
}

/// Buffered response state shared between a [`Context`] and the dispatcher.
#[derive(Debug, Default)]
struct ResponseState {
    status: Option<StatusCode>,
    headers: HeaderMap,
    body: Vec<u8>,
    committed: bool,
}

/// Cloneable handle to the response buffer; the dispatcher keeps one to
/// finalize the response after the handler returns.
#[derive(Clone, Debug, Default)]
pub(crate) struct ResponseHandle {
    state: Arc<Mutex<ResponseState>>,
}

impl ResponseHandle {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn committed(&self) -> bool {
        self.lock().committed
    }

    fn lock(&self) -> MutexGuard<'_, ResponseState> {
        self.state.lock().expect("response state poisoned")
    }

    /// Builds the transport response. A response that never committed goes
    /// out as an empty 200.
    pub(crate) fn into_response(self) -> Response {
        let state = std::mem::take(&mut *self.lock());
        let mut response = Response::new(Body::from(state.body));
        *response.status_mut() = state.status.unwrap_or(StatusCode::OK);
        *response.headers_mut() = state.headers;
        response
    }
}
