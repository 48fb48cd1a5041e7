use axum::http::{header, StatusCode};
use axum::response::{Html, IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;

use service::errors::ServiceError;
use service::news_item::ResponseFormat;

/// JSON error body.
#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct JsonApiError {
    pub status: u16,
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, error: impl Into<String>) -> Self {
        Self { status: status.as_u16(), error: error.into(), detail: None }
    }
}

/// Request failure, rendered in the format the client negotiated.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("not found")]
    NotFound(ResponseFormat),
    #[error("service error: {0}")]
    Service(#[source] ServiceError, ResponseFormat),
    #[error("render error: {0}")]
    Render(String),
}

impl AppError {
    pub fn from_service(err: ServiceError, format: ResponseFormat) -> Self {
        if err.is_not_found() {
            Self::NotFound(format)
        } else {
            Self::Service(err, format)
        }
    }

    fn format(&self) -> ResponseFormat {
        match self {
            Self::NotFound(f) | Self::Service(_, f) => *f,
            Self::Render(_) => ResponseFormat::Html,
        }
    }

    fn status(&self) -> StatusCode {
        match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Service(..) | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<tera::Error> for AppError {
    fn from(e: tera::Error) -> Self {
        Self::Render(format!("{e:?}"))
    }
}

impl From<quick_xml::Error> for AppError {
    fn from(e: quick_xml::Error) -> Self {
        Self::Render(e.to_string())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            error!(error = %self, "request failed");
        }
        // 5xx bodies stay generic
        let message = match status {
            StatusCode::NOT_FOUND => "not found",
            _ => "internal server error",
        };
        match self.format() {
            ResponseFormat::Json => (status, Json(JsonApiError::new(status, message))).into_response(),
            ResponseFormat::Xml => (
                status,
                [(header::CONTENT_TYPE, ResponseFormat::Xml.content_type())],
                format!("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<error>{message}</error>\n"),
            )
                .into_response(),
            ResponseFormat::Html | ResponseFormat::Mobile => {
                let title = if status == StatusCode::NOT_FOUND { "Not Found" } else { "Server Error" };
                let page = format!(
                    "<!DOCTYPE html>\n<html><head><title>{title}</title></head><body><h1>{title}</h1><p>The requested {message}.</p></body></html>\n"
                );
                (status, Html(page)).into_response()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
    #[error("template setup failed: {0}")]
    Templates(String),
    #[error(transparent)]
    Any(#[from] anyhow::Error),
}
