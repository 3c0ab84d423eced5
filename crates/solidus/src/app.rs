// File: src/app.rs
// Purpose: route discovery at startup, request dispatch at runtime

use std::path::{Path, PathBuf};
use std::sync::Arc;

use axum::body::Body;
use axum::extract::{Request, State};
use axum::http::{header, HeaderValue, StatusCode};
use axum::response::Response;
use solidus_router::{site_pattern, Router};
use tracing::{debug, error, info};

use crate::context::{Context, ResponseHandle};
use crate::error::{Error, Result};
use crate::registry::{HandlerFn, Registry};

/// Convention-routing application.
///
/// Startup: [`App::load_routes`] compiles every registration under the
/// routes root into the route table. Serving: [`App::listen`] (or the
/// service from [`App::into_service`]) funnels every request through
/// [`App::serve`]. The table is read-only once loaded, so concurrent
/// requests match without locking.
pub struct App {
    router: Router<HandlerFn>,
    routes_dir: Option<PathBuf>,
}

impl Default for App {
    fn default() -> Self {
        Self::new()
    }
}

impl App {
    pub fn new() -> Self {
        Self {
            router: Router::new(),
            routes_dir: None,
        }
    }

    /// Compiles every registration under `root` into the route table.
    ///
    /// All-or-nothing: the first compile error or route conflict aborts the
    /// whole load, and a load that matches no registrations at all is an
    /// error too. A misconfigured tree must never half-serve.
    pub fn load_routes(&mut self, registry: &Registry, root: impl AsRef<Path>) -> Result<()> {
        let root = root.as_ref();
        if root.as_os_str().is_empty() {
            return Err(Error::internal("routes directory is empty"));
        }
        let root = absolute(root)?;

        let registrations = registry.registrations();
        if registrations.is_empty() {
            return Err(Error::internal(
                "no routes registered; wire the route modules into the registry before load_routes",
            ));
        }

        let mut loaded = 0usize;
        for registration in registrations {
            let site = absolute(&registration.site)?;
            if !site.starts_with(&root) {
                continue;
            }

            let pattern = site_pattern(&root, &site)?;
            let method = registration.method.clone();
            self.router
                .add_route(registration.method, &pattern, registration.handler)?;
            info!(%method, %pattern, "route loaded");
            loaded += 1;
        }

        if loaded == 0 {
            return Err(Error::internal(format!(
                "no route handlers found under {}",
                root.display()
            )));
        }

        self.routes_dir = Some(root);
        Ok(())
    }

    /// Directory the current route table was loaded from.
    pub fn routes_dir(&self) -> Option<&Path> {
        self.routes_dir.as_deref()
    }

    pub fn route_count(&self) -> usize {
        self.router.len()
    }

    /// Dispatches one request through the route table.
    ///
    /// A miss is a 404 `route_not_found`. On a hit the handler runs exactly
    /// once against a fresh [`Context`]; a handler error only reaches the
    /// client while the response is still uncommitted, and only typed errors
    /// keep their message. Everything else becomes a generic 500.
    pub async fn serve(&self, request: Request) -> Response {
        let (parts, body) = request.into_parts();

        let Some(matched) = self.router.match_route(&parts.method, parts.uri.path()) else {
            return json_error(StatusCode::NOT_FOUND, "route_not_found");
        };
        let handler = matched.handler.clone();

        let response = ResponseHandle::new();
        let ctx = Context::new(parts, body, &matched.params, response.clone());

        match handler(ctx).await {
            Ok(()) => response.into_response(),
            Err(err) if response.committed() => {
                // The client already has the status line; nothing can be
                // corrected anymore.
                debug!(error = %err, "handler failed after response commit, dropping error");
                response.into_response()
            }
            Err(Error::Http { status, message }) => json_error(status, &message),
            Err(Error::Domain { kind, message }) => json_error(kind.status(), &message),
            Err(Error::Internal(err)) => {
                error!(error = ?err, "handler failed");
                json_error(StatusCode::INTERNAL_SERVER_ERROR, "internal_error")
            }
        }
    }

    /// Wraps the app into an axum service; every request, whatever its
    /// path, goes through the convention router.
    pub fn into_service(self) -> axum::Router {
        let app = Arc::new(self);
        axum::Router::new().fallback(dispatch).with_state(app)
    }

    /// Binds `addr` and runs the serve loop until the process ends.
    pub async fn listen(self, addr: &str) -> Result<()> {
        let listener = tokio::net::TcpListener::bind(addr)
            .await
            .map_err(|err| Error::internal(format!("failed to bind {addr}: {err}")))?;
        info!(%addr, "listening");
        axum::serve(listener, self.into_service())
            .await
            .map_err(|err| Error::internal(format!("server error: {err}")))?;
        Ok(())
    }
}

async fn dispatch(State(app): State<Arc<App>>, request: Request) -> Response {
    app.serve(request).await
}

/// Structured JSON error body, the only error shape clients ever see.
fn json_error(status: StatusCode, message: &str) -> Response {
    let body = serde_json::json!({ "error": message }).to_string();
    let mut response = Response::new(Body::from(body));
    *response.status_mut() = status;
    response.headers_mut().insert(
        header::CONTENT_TYPE,
        HeaderValue::from_static("application/json"),
    );
    response
}

fn absolute(path: &Path) -> Result<PathBuf> {
    if path.is_absolute() {
        return Ok(path.to_path_buf());
    }
    let cwd = std::env::current_dir()
        .map_err(|err| Error::internal(format!("cannot resolve working directory: {err}")))?;
    Ok(cwd.join(path))
}
