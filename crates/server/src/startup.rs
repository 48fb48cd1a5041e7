use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tracing::info;

use configs::{AppConfig, ServerConfig};
use service::news_item::repo::seaorm::SeaOrmNewsItemRepository;
use service::news_item::NewsItemRepository;

use crate::errors::StartupError;
use crate::routes::{self, ServerState};

fn build_cors() -> CorsLayer {
    CorsLayer::very_permissive()
}

fn bind_addr(server: &ServerConfig) -> Result<SocketAddr, StartupError> {
    format!("{}:{}", server.host, server.port)
        .parse()
        .map_err(|e| StartupError::InvalidConfig(format!("bind address {}:{}: {e}", server.host, server.port)))
}

/// Router over `state` with CORS and request tracing.
pub fn build_app(state: ServerState) -> Router {
    routes::build_router(state, build_cors())
}

/// Migrate the database named by `cfg` and serve until the listener fails.
pub async fn run(cfg: AppConfig) -> anyhow::Result<()> {
    let addr = bind_addr(&cfg.server)?;

    let db = models::db::connect_and_migrate(&cfg.database).await?;
    let repo: Arc<dyn NewsItemRepository> = Arc::new(SeaOrmNewsItemRepository::new(db));
    let state = ServerState::new(repo, &cfg.news)?;
    let app = build_app(state);

    info!(%addr, per_page = cfg.news.per_page, mobile_subdomain = %cfg.news.mobile_subdomain, "starting news server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;
    Ok(())
}
