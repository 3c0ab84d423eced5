// GET /

use serde_json::json;
use solidus::{route, Context, Registry, Result, StatusCode};

pub fn register(registry: &Registry) -> Result<()> {
    route!(registry, handler)
}

async fn handler(ctx: Context) -> Result<()> {
    ctx.json(StatusCode::OK, &json!({ "message": "hello from example route" }))
}
