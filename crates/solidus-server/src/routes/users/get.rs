// GET /users

use solidus::{route, Context, Registry, Result, StatusCode};

use crate::services::users::UserStore;

pub fn register(registry: &Registry) -> Result<()> {
    route!(registry, handler)
}

async fn handler(ctx: Context) -> Result<()> {
    let store = UserStore::open_default();
    let users = store.list()?;
    ctx.json(StatusCode::OK, &users)
}
