use std::sync::Arc;

use axum::{
    response::Redirect,
    routing::get,
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnFailure, DefaultOnRequest, DefaultOnResponse, TraceLayer},
};
use tracing::Level;

use common::types::Health;
use service::news_item::{AdminNewsService, NewsItemRepository, PublicNewsService};

use crate::errors::StartupError;
use crate::views::Views;

pub mod admin;
pub mod news;

/// Shared handler state. Services are built once over a single repository.
#[derive(Clone)]
pub struct ServerState {
    pub public_news: Arc<PublicNewsService<dyn NewsItemRepository>>,
    pub admin_news: Arc<AdminNewsService<dyn NewsItemRepository>>,
    pub views: Arc<Views>,
    pub mobile_subdomain: Arc<str>,
}

impl ServerState {
    pub fn new(repo: Arc<dyn NewsItemRepository>, news: &configs::NewsConfig) -> Result<Self, StartupError> {
        let views = Views::new().map_err(|e| StartupError::Templates(format!("{e:?}")))?;
        Ok(Self {
            public_news: Arc::new(PublicNewsService::new(repo.clone(), news.per_page)),
            admin_news: Arc::new(AdminNewsService::new(repo)),
            views: Arc::new(views),
            mobile_subdomain: Arc::from(news.mobile_subdomain.as_str()),
        })
    }
}

#[utoipa::path(get, path = "/health", tag = "health", responses((status = 200, description = "OK", body = crate::openapi::HealthResponse)))]
pub async fn health() -> Json<Health> {
    Json(Health { status: "ok" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    use utoipa::OpenApi;
    Json(crate::openapi::ApiDoc::openapi())
}

/// Build the full application router: public news, admin and ambient endpoints
pub fn build_router(state: ServerState, cors: CorsLayer) -> Router {
    let public = Router::new()
        .route("/", get(|| async { Redirect::to("/news") }))
        .route("/health", get(health))
        .route("/api-docs/openapi.json", get(openapi_json))
        .route("/news", get(news::index))
        .route("/news.json", get(news::index_json))
        .route("/news.xml", get(news::index_xml))
        .route("/news.html", get(news::index_html))
        .route("/news/:id", get(news::show));

    let admin_routes = Router::new()
        .route("/admin/news_items", get(admin::index).post(admin::create))
        .route("/admin/news_items/new", get(admin::new))
        .route(
            "/admin/news_items/:id",
            get(admin::show).put(admin::update).patch(admin::update).post(admin::update),
        )
        .route("/admin/news_items/:id/edit", get(admin::edit));

    public
        .merge(admin_routes)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO).include_headers(false))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO).include_headers(false))
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}
