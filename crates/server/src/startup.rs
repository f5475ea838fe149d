use std::net::SocketAddr;

use axum::Router;
use configs::{AppConfig, ServerConfig};
use migration::MigratorTrait;
use tower_http::cors::CorsLayer;
use tracing::info;

use crate::{routes, state::AppState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> anyhow::Result<SocketAddr> {
    Ok(format!("{}:{}", server.host, server.port).parse()?)
}

/// Connect, migrate when configured, and assemble the router.
pub async fn build_app(cfg: &AppConfig) -> anyhow::Result<Router> {
    let db = models::db::connect_with_config(&cfg.database).await?;
    if cfg.database.run_migrations {
        migration::Migrator::up(&db, None).await?;
        info!("database migrations applied");
    }
    let state = AppState::new(db, cfg.selection.clone());
    Ok(routes::build_router(state, build_cors()))
}

/// Build the app from `cfg` and run the HTTP server. Logging is set up by
/// the caller.
pub async fn serve(cfg: AppConfig) -> anyhow::Result<()> {
    let app = build_app(&cfg).await?;

    let addr = bind_addr(&cfg.server)?;
    info!(%addr, "starting marina server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
