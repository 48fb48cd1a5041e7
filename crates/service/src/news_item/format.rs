//! Response format negotiation
//!
//! An explicit format (path suffix or `format` query value) wins over the
//! `Accept` header; HTML is the fallback. Requests classified as mobile get
//! the mobile HTML views, while JSON and XML are left alone.

use std::fmt;
use std::str::FromStr;

use common::CoreError;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseFormat {
    #[default]
    Html,
    Mobile,
    Json,
    Xml,
}

impl ResponseFormat {
    pub fn negotiate(explicit: Option<&str>, accept: Option<&str>, is_mobile: bool) -> Self {
        let base = match explicit {
            Some(ext) => ext.parse().unwrap_or_default(),
            None => accept.map(Self::from_accept).unwrap_or_default(),
        };
        base.for_device(is_mobile)
    }

    /// Swap HTML for the mobile variant on mobile requests.
    pub fn for_device(self, is_mobile: bool) -> Self {
        match self {
            Self::Html if is_mobile => Self::Mobile,
            other => other,
        }
    }

    /// Highest-quality media range we can serve; HTML when nothing matches.
    pub fn from_accept(accept: &str) -> Self {
        let mut ranges: Vec<(f32, &str)> = accept
            .split(',')
            .filter_map(|part| {
                let mut params = part.split(';');
                let media = params.next()?.trim();
                if media.is_empty() {
                    return None;
                }
                let q = params
                    .filter_map(|p| p.trim().strip_prefix("q="))
                    .find_map(|v| v.trim().parse::<f32>().ok())
                    .unwrap_or(1.0);
                Some((q, media))
            })
            .collect();
        // stable: ties keep header order
        ranges.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));
        ranges
            .into_iter()
            .filter(|(q, _)| *q > 0.0)
            .find_map(|(_, media)| Self::from_media_type(media))
            .unwrap_or_default()
    }

    fn from_media_type(media: &str) -> Option<Self> {
        match media.to_ascii_lowercase().as_str() {
            "application/json" => Some(Self::Json),
            "application/xml" | "text/xml" => Some(Self::Xml),
            "text/html" | "application/xhtml+xml" | "text/*" | "*/*" => Some(Self::Html),
            _ => None,
        }
    }

    pub fn content_type(&self) -> &'static str {
        match self {
            Self::Html | Self::Mobile => "text/html; charset=utf-8",
            Self::Json => "application/json",
            Self::Xml => "application/xml; charset=utf-8",
        }
    }

    pub fn is_html(&self) -> bool {
        matches!(self, Self::Html | Self::Mobile)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Html => "html",
            Self::Mobile => "mobile",
            Self::Json => "json",
            Self::Xml => "xml",
        }
    }
}

impl FromStr for ResponseFormat {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "html" | "htm" => Ok(Self::Html),
            "mobile" => Ok(Self::Mobile),
            "json" => Ok(Self::Json),
            "xml" => Ok(Self::Xml),
            other => Err(CoreError::Format(other.to_string())),
        }
    }
}

impl fmt::Display for ResponseFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Split a recognized format suffix off a path segment.
///
/// ```
/// use service::news_item::format::split_format_suffix;
///
/// assert_eq!(split_format_suffix("12.json"), ("12", Some("json")));
/// assert_eq!(split_format_suffix("12"), ("12", None));
/// assert_eq!(split_format_suffix("12.tar"), ("12.tar", None));
/// ```
pub fn split_format_suffix(segment: &str) -> (&str, Option<&str>) {
    if let Some((stem, ext)) = segment.rsplit_once('.') {
        if ext.parse::<ResponseFormat>().is_ok() {
            return (stem, Some(ext));
        }
    }
    (segment, None)
}
