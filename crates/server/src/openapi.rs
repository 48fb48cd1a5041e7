use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset};
use utoipa::OpenApi;
use utoipa::ToSchema;

#[derive(ToSchema)]
pub struct HealthResponse { pub status: String }

/// Stored news item as returned by the JSON endpoints.
#[derive(ToSchema)]
pub struct NewsItemDoc {
    pub id: i32,
    pub name: String,
    pub body: String,
    pub created_at: DateTime<FixedOffset>,
    pub updated_at: DateTime<FixedOffset>,
}

#[derive(ToSchema)]
pub struct NewsItemInputDoc { pub name: String, pub body: String }

/// Field name to messages, e.g. `{"errors": {"name": ["can't be blank"]}}`.
#[derive(ToSchema)]
pub struct ValidationErrorsDoc { pub errors: BTreeMap<String, Vec<String>> }

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::routes::health,
        crate::routes::news::index_json,
        crate::routes::news::show,
        crate::routes::admin::create,
        crate::routes::admin::update,
    ),
    components(
        schemas(
            HealthResponse,
            NewsItemDoc,
            NewsItemInputDoc,
            ValidationErrorsDoc,
            crate::errors::JsonApiError,
        )
    ),
    tags(
        (name = "health"),
        (name = "news"),
        (name = "admin")
    )
)]
pub struct ApiDoc;
