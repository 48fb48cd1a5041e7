//! Admin management of news items.
//!
//! Browsers submit url-encoded forms and get redirects or re-rendered forms;
//! JSON clients get the record or a 422 with the field errors.

use axum::{
    async_trait,
    extract::{FromRequest, Path, Request, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Redirect, Response},
    Form, Json,
};
use axum_extra::extract::cookie::CookieJar;
use serde_json::json;

use service::news_item::format::split_format_suffix;
use service::news_item::{NewsItem, NewsItemInput, ResponseFormat, SubmitOutcome};

use crate::errors::AppError;
use crate::flash;
use crate::negotiation::Negotiation;
use crate::routes::news::xml_response;
use crate::routes::ServerState;
use crate::xml;

pub const INDEX_PATH: &str = "/admin/news_items";

/// Submitted `name`/`body`, from either a form or a JSON body.
#[derive(Debug)]
pub struct Submission {
    pub input: NewsItemInput,
    pub json: bool,
}

#[async_trait]
impl<S: Send + Sync> FromRequest<S> for Submission {
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let json = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .is_some_and(|ct| ct.starts_with("application/json"));
        let input = if json {
            let Json(input) = Json::<NewsItemInput>::from_request(req, state).await.map_err(IntoResponse::into_response)?;
            input
        } else {
            let Form(input) = Form::<NewsItemInput>::from_request(req, state).await.map_err(IntoResponse::into_response)?;
            input
        };
        Ok(Self { input, json })
    }
}

fn parse_id(raw: &str, neg: &Negotiation) -> Result<(i32, ResponseFormat), AppError> {
    let (id, suffix) = split_format_suffix(raw);
    let format = neg.format(suffix);
    let id = id.parse().map_err(|_| AppError::NotFound(format))?;
    Ok((id, format))
}

pub async fn index(State(state): State<ServerState>, neg: Negotiation, jar: CookieJar) -> Result<Response, AppError> {
    let format = neg.format(None);
    let items = state.admin_news.list_all().await.map_err(|e| AppError::from_service(e, format))?;
    Ok(match format {
        ResponseFormat::Json => Json(items).into_response(),
        ResponseFormat::Xml => xml_response(xml::render_list(&items)?),
        ResponseFormat::Html | ResponseFormat::Mobile => {
            let (jar, notice) = flash::take_notice(jar);
            (jar, Html(state.views.admin_index(&items, notice)?)).into_response()
        }
    })
}

pub async fn new(State(state): State<ServerState>) -> Result<Html<String>, AppError> {
    Ok(Html(state.views.admin_form(&state.admin_news.new_form())?))
}

pub async fn show(State(state): State<ServerState>, neg: Negotiation, Path(raw): Path<String>) -> Result<Response, AppError> {
    let (id, format) = parse_id(&raw, &neg)?;
    let item = state.admin_news.show_one(id).await.map_err(|e| AppError::from_service(e, format))?;
    Ok(match format {
        ResponseFormat::Json => Json(item.to_record()).into_response(),
        ResponseFormat::Xml => match item.to_record() {
            Some(record) => xml_response(xml::render_one(&record)?),
            None => return Err(AppError::NotFound(format)),
        },
        ResponseFormat::Html | ResponseFormat::Mobile => Html(state.views.admin_show(&item)?).into_response(),
    })
}

pub async fn edit(State(state): State<ServerState>, neg: Negotiation, Path(raw): Path<String>) -> Result<Html<String>, AppError> {
    let (id, format) = parse_id(&raw, &neg)?;
    let item = state.admin_news.edit_form(id).await.map_err(|e| AppError::from_service(e, format))?;
    Ok(Html(state.views.admin_form(&item)?))
}

#[utoipa::path(
    post,
    path = "/admin/news_items",
    tag = "admin",
    request_body = crate::openapi::NewsItemInputDoc,
    responses(
        (status = 201, description = "Created", body = crate::openapi::NewsItemDoc),
        (status = 303, description = "Created; redirect to the listing (form posts)"),
        (status = 422, description = "Validation failed", body = crate::openapi::ValidationErrorsDoc)
    )
)]
pub async fn create(State(state): State<ServerState>, neg: Negotiation, jar: CookieJar, submission: Submission) -> Result<Response, AppError> {
    let format = if submission.json { ResponseFormat::Json } else { neg.format(None) };
    let outcome = state
        .admin_news
        .create(submission.input)
        .await
        .map_err(|e| AppError::from_service(e, format))?;
    respond(&state, jar, outcome, submission.json, StatusCode::CREATED)
}

#[utoipa::path(
    put,
    path = "/admin/news_items/{id}",
    tag = "admin",
    params(("id" = i32, Path, description = "News item id")),
    request_body = crate::openapi::NewsItemInputDoc,
    responses(
        (status = 200, description = "Saved", body = crate::openapi::NewsItemDoc),
        (status = 303, description = "Saved; redirect to the listing (form posts)"),
        (status = 404, description = "No such news item", body = crate::errors::JsonApiError),
        (status = 422, description = "Validation failed", body = crate::openapi::ValidationErrorsDoc)
    )
)]
pub async fn update(
    State(state): State<ServerState>,
    neg: Negotiation,
    jar: CookieJar,
    Path(raw): Path<String>,
    submission: Submission,
) -> Result<Response, AppError> {
    let (id, format) = parse_id(&raw, &neg)?;
    let format = if submission.json { ResponseFormat::Json } else { format };
    let outcome = state
        .admin_news
        .update(id, submission.input)
        .await
        .map_err(|e| AppError::from_service(e, format))?;
    respond(&state, jar, outcome, submission.json, StatusCode::OK)
}

fn respond(state: &ServerState, jar: CookieJar, outcome: SubmitOutcome, json: bool, saved: StatusCode) -> Result<Response, AppError> {
    Ok(match outcome {
        SubmitOutcome::Saved { item, .. } if json => (saved, Json(item.to_record())).into_response(),
        SubmitOutcome::Saved { notice, .. } => (flash::set_notice(jar, notice), Redirect::to(INDEX_PATH)).into_response(),
        SubmitOutcome::Invalid(item) if json => invalid_json(&item),
        SubmitOutcome::Invalid(item) => {
            (StatusCode::UNPROCESSABLE_ENTITY, Html(state.views.admin_form(&item)?)).into_response()
        }
    })
}

fn invalid_json(item: &NewsItem) -> Response {
    (StatusCode::UNPROCESSABLE_ENTITY, Json(json!({ "errors": item.errors() }))).into_response()
}
