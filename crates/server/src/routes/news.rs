//! Public news listing and detail.

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{Html, IntoResponse, Response},
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use models::news_item::Model;
use service::news_item::format::split_format_suffix;
use service::news_item::{NewsListing, ResponseFormat};

use crate::errors::AppError;
use crate::negotiation::Negotiation;
use crate::routes::ServerState;
use crate::xml;

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct ListParams {
    /// 1-based page number; anything else means the first page
    pub page: Option<String>,
}

pub async fn index(State(state): State<ServerState>, neg: Negotiation, Query(params): Query<ListParams>) -> Result<Response, AppError> {
    list(&state, neg.format(None), params).await
}

#[utoipa::path(
    get,
    path = "/news.json",
    tag = "news",
    params(ListParams),
    responses((status = 200, description = "Newest-first page of news items", body = [crate::openapi::NewsItemDoc]))
)]
pub async fn index_json(State(state): State<ServerState>, neg: Negotiation, Query(params): Query<ListParams>) -> Result<Response, AppError> {
    list(&state, neg.format(Some("json")), params).await
}

pub async fn index_xml(State(state): State<ServerState>, neg: Negotiation, Query(params): Query<ListParams>) -> Result<Response, AppError> {
    list(&state, neg.format(Some("xml")), params).await
}

pub async fn index_html(State(state): State<ServerState>, neg: Negotiation, Query(params): Query<ListParams>) -> Result<Response, AppError> {
    list(&state, neg.format(Some("html")), params).await
}

async fn list(state: &ServerState, format: ResponseFormat, params: ListParams) -> Result<Response, AppError> {
    let listing = state
        .public_news
        .list_news(params.page.as_deref(), format)
        .await
        .map_err(|e| AppError::from_service(e, format))?;
    render_listing(state, &listing)
}

fn render_listing(state: &ServerState, listing: &NewsListing) -> Result<Response, AppError> {
    Ok(match listing.format {
        ResponseFormat::Json => Json(&listing.page.items).into_response(),
        ResponseFormat::Xml => xml_response(xml::render_list(&listing.page.items)?),
        ResponseFormat::Html | ResponseFormat::Mobile => Html(state.views.news_index(listing)?).into_response(),
    })
}

#[utoipa::path(
    get,
    path = "/news/{id}",
    tag = "news",
    params(("id" = String, Path, description = "News item id, optionally suffixed with .json, .xml or .html")),
    responses(
        (status = 200, description = "News item", body = crate::openapi::NewsItemDoc),
        (status = 404, description = "No such news item", body = crate::errors::JsonApiError)
    )
)]
pub async fn show(State(state): State<ServerState>, neg: Negotiation, Path(raw): Path<String>) -> Result<Response, AppError> {
    let (id, suffix) = split_format_suffix(&raw);
    let format = neg.format(suffix);
    let id: i32 = id.parse().map_err(|_| AppError::NotFound(format))?;
    let item = state
        .public_news
        .show_news(id)
        .await
        .map_err(|e| AppError::from_service(e, format))?;
    render_item(&state, &item, format)
}

fn render_item(state: &ServerState, item: &Model, format: ResponseFormat) -> Result<Response, AppError> {
    Ok(match format {
        ResponseFormat::Json => Json(item).into_response(),
        ResponseFormat::Xml => xml_response(xml::render_one(item)?),
        ResponseFormat::Html | ResponseFormat::Mobile => Html(state.views.news_show(item, format)?).into_response(),
    })
}

pub(crate) fn xml_response(body: String) -> Response {
    ([(header::CONTENT_TYPE, ResponseFormat::Xml.content_type())], body).into_response()
}
