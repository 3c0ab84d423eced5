pub mod delete;
pub mod get;
pub mod put;

use solidus::{Context, Error, Result};

/// The `:id` parameter as a numeric user id.
pub(crate) fn parse_id(ctx: &Context) -> Result<i64> {
    ctx.param("id")
        .parse()
        .map_err(|_| Error::validation("invalid user id"))
}
