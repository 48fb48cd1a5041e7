//! Per-request format and device detection.

use std::convert::Infallible;

use axum::async_trait;
use axum::extract::{FromRequestParts, Query};
use axum::http::{header, request::Parts};
use serde::Deserialize;

use service::news_item::ResponseFormat;

use crate::routes::ServerState;

#[derive(Debug, Default, Deserialize)]
struct FormatQuery {
    format: Option<String>,
}

/// What the client asked for: `Accept`, `?format=` and whether the request
/// came in on the mobile subdomain. The path suffix is supplied by the
/// handler since only it knows where the suffix lives.
#[derive(Debug, Clone, Default)]
pub struct Negotiation {
    pub accept: Option<String>,
    pub format_param: Option<String>,
    pub is_mobile: bool,
}

impl Negotiation {
    /// Resolve the response format; a path suffix beats `?format=`.
    pub fn format(&self, suffix: Option<&str>) -> ResponseFormat {
        let explicit = suffix.or(self.format_param.as_deref());
        ResponseFormat::negotiate(explicit, self.accept.as_deref(), self.is_mobile)
    }
}

/// Labels that make up the registered domain, e.g. `example.com`.
const DOMAIN_LABELS: usize = 2;

/// True when the first subdomain label is `subdomain`, e.g. `mobile.example.com`.
///
/// Hosts with no labels left of the registered domain (`mobile.localhost`)
/// have no subdomain at all.
pub fn is_mobile_host(host: &str, subdomain: &str) -> bool {
    if subdomain.is_empty() {
        return false;
    }
    let name = host.split(':').next().unwrap_or_default();
    let labels: Vec<&str> = name.split('.').collect();
    labels.len() > DOMAIN_LABELS && labels[0].eq_ignore_ascii_case(subdomain)
}

#[async_trait]
impl FromRequestParts<ServerState> for Negotiation {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &ServerState) -> Result<Self, Self::Rejection> {
        let accept = parts
            .headers
            .get(header::ACCEPT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        let format_param = Query::<FormatQuery>::try_from_uri(&parts.uri)
            .ok()
            .and_then(|Query(q)| q.format)
            .filter(|f| !f.is_empty());
        let host = parts
            .headers
            .get(header::HOST)
            .and_then(|v| v.to_str().ok())
            .or_else(|| parts.uri.host());
        let is_mobile = host.is_some_and(|h| is_mobile_host(h, &state.mobile_subdomain));
        Ok(Self { accept, format_param, is_mobile })
    }
}
