// Route modules mirror the URL namespace: the directory tree under
// src/routes/ is the route table. Directories spell URL segments, a
// `_`-prefixed directory is a path parameter, and the file stem is the
// HTTP method.

pub mod index;
pub mod users;

use solidus::{Registry, Result};

/// Wires every route module into the registry, in declaration order.
pub fn register_all(registry: &Registry) -> Result<()> {
    index::get::register(registry)?;
    users::get::register(registry)?;
    users::post::register(registry)?;
    users::_id::get::register(registry)?;
    users::_id::put::register(registry)?;
    users::_id::delete::register(registry)?;
    Ok(())
}
