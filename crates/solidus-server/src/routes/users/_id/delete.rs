// DELETE /users/:id

use serde_json::json;
use solidus::{route, Context, Registry, Result, StatusCode};

use super::parse_id;
use crate::services::users::UserStore;

pub fn register(registry: &Registry) -> Result<()> {
    route!(registry, handler)
}

async fn handler(ctx: Context) -> Result<()> {
    let id = parse_id(&ctx)?;
    let store = UserStore::open_default();
    store.delete(id)?;
    ctx.json(StatusCode::OK, &json!({ "message": "user deleted" }))
}
