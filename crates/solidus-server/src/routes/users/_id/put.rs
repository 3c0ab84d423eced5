// PUT /users/:id

use solidus::{route, Context, Error, Registry, Result, StatusCode};

use super::parse_id;
use crate::services::users::{UserDraft, UserStore};

pub fn register(registry: &Registry) -> Result<()> {
    route!(registry, handler)
}

async fn handler(mut ctx: Context) -> Result<()> {
    let id = parse_id(&ctx)?;
    let body = ctx
        .body()
        .await
        .map_err(|_| Error::validation("could not read request body"))?;
    let draft: UserDraft =
        serde_json::from_slice(&body).map_err(|_| Error::validation("invalid user payload"))?;

    let store = UserStore::open_default();
    let user = store.update(id, draft)?;
    ctx.json(StatusCode::OK, &user)
}
