// File: src/registry.rs
// Purpose: explicit registration of route handlers with their declaration site

use std::fmt;
use std::future::Future;
use std::path::{Path, PathBuf};
use std::pin::Pin;
use std::sync::{Arc, Mutex};

use axum::http::Method;
use solidus_router::site_method;

use crate::context::Context;
use crate::error::Result;

/// Boxed future returned by route handlers.
pub type HandlerFuture = Pin<Box<dyn Future<Output = Result<()>> + Send>>;

/// Shared, callable route handler. Invoked at most once per matched request.
pub type HandlerFn = Arc<dyn Fn(Context) -> HandlerFuture + Send + Sync>;

/// Wraps a plain `async fn(Context) -> Result<()>` into a [`HandlerFn`].
pub fn handler_fn<F, Fut>(handler: F) -> HandlerFn
where
    F: Fn(Context) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = Result<()>> + Send + 'static,
{
    Arc::new(move |ctx| Box::pin(handler(ctx)))
}

/// Registers the enclosing file as a route handler.
///
/// Expands to a [`Registry::register`] call with the file's compile-time
/// path as the declaration site, so a route module states where it lives
/// without any runtime introspection:
///
/// ```no_run
/// use solidus::{route, Context, Registry, Result, StatusCode};
///
/// async fn handler(ctx: Context) -> Result<()> {
///     ctx.json(StatusCode::OK, &serde_json::json!({ "ok": true }))
/// }
///
/// fn register(registry: &Registry) -> Result<()> {
///     route!(registry, handler)
/// }
/// ```
#[macro_export]
macro_rules! route {
    ($registry:expr, $handler:expr) => {
        $registry.register(::std::path::Path::new(file!()), $crate::handler_fn($handler))
    };
}

/// A handler captured together with its declaration site.
#[derive(Clone)]
pub struct Registration {
    /// Route file that declared the handler, as captured by `file!()`.
    pub site: PathBuf,
    /// Method derived from the site's file stem at registration time.
    pub method: Method,
    pub handler: HandlerFn,
}

impl fmt::Debug for Registration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registration")
            .field("site", &self.site)
            .field("method", &self.method)
            .finish()
    }
}

/// Order-preserving store of route registrations.
///
/// Built explicitly at startup and handed to [`crate::App::load_routes`].
/// The lock covers reads and writes, so registration can be driven from
/// several startup threads; route order stays the order of `register` calls,
/// which keeps match precedence reproducible.
#[derive(Debug, Default)]
pub struct Registry {
    entries: Mutex<Vec<Registration>>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `handler` for the route file at `site`.
    ///
    /// The HTTP method comes from the site's file stem (`get.rs` -> GET); an
    /// unrecognized stem is an error. Registering the same site again
    /// replaces the earlier entry without moving it.
    pub fn register(&self, site: impl AsRef<Path>, handler: HandlerFn) -> Result<()> {
        let site = site.as_ref().to_path_buf();
        let method = site_method(&site)?;
        let registration = Registration {
            site,
            method,
            handler,
        };

        let mut entries = self.entries.lock().expect("registry lock poisoned");
        if let Some(existing) = entries
            .iter_mut()
            .find(|entry| entry.site == registration.site)
        {
            *existing = registration;
        } else {
            entries.push(registration);
        }
        Ok(())
    }

    /// Snapshot of all registrations, in registration order.
    pub fn registrations(&self) -> Vec<Registration> {
        self.entries.lock().expect("registry lock poisoned").clone()
    }

    pub fn len(&self) -> usize {
        self.entries.lock().expect("registry lock poisoned").len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
