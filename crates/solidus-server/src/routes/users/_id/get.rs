// GET /users/:id

use solidus::{route, Context, Registry, Result, StatusCode};

use super::parse_id;
use crate::services::users::UserStore;

pub fn register(registry: &Registry) -> Result<()> {
    route!(registry, handler)
}

async fn handler(ctx: Context) -> Result<()> {
    let id = parse_id(&ctx)?;
    let store = UserStore::open_default();
    let user = store.find(id)?;
    ctx.json(StatusCode::OK, &user)
}
