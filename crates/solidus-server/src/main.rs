use anyhow::Context as _;
use solidus::{App, Config, Registry};
use solidus_server::routes;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    let config = Config::load_default().context("loading solidus.toml")?;

    let registry = Registry::new();
    routes::register_all(&registry).context("registering route modules")?;

    let mut app = App::new();
    app.load_routes(&registry, &config.routing.routes_dir)
        .context("loading routes")?;
    info!(
        routes = app.route_count(),
        dir = %config.routing.routes_dir,
        "routes loaded"
    );

    app.listen(&config.addr()).await?;
    Ok(())
}
