//! Pagination utilities shared by the service and HTTP layers
//!
//! Page numbers are 1-based. Anything that does not parse to a positive
//! integer is treated as the first page.

use crate::CoreError;

/// Upper bound for a configured page size.
pub const MAX_PER_PAGE: u64 = 100;

/// Largest offset a SQL backend accepts (bound as a signed 64-bit value).
pub const MAX_OFFSET: u64 = i64::MAX as u64;

/// Pagination parameters
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pagination {
    /// 1-based page index
    pub page: u64,
    /// items per page
    pub per_page: u64,
}

impl Pagination {
    pub fn new(page: u64, per_page: u64) -> Self {
        Self { page, per_page }.normalized()
    }

    /// Build from the raw `page` query value, defaulting to the first page.
    pub fn from_query(raw: Option<&str>, per_page: u64) -> Self {
        let page = raw.map(parse_page).and_then(Result::ok).unwrap_or(1);
        Self::new(page, per_page)
    }

    fn normalized(self) -> Self {
        let page = if self.page == 0 { 1 } else { self.page };
        let per_page = self.per_page.clamp(1, MAX_PER_PAGE);
        Self { page, per_page }
    }

    /// Row offset of the first item on this page, capped at `MAX_OFFSET`.
    pub fn offset(&self) -> u64 {
        (self.page - 1).saturating_mul(self.per_page).min(MAX_OFFSET)
    }

    /// True when this page starts past the last of `total` rows.
    pub fn is_past_end(&self, total: u64) -> bool {
        self.page > self.total_pages(total)
    }

    pub fn limit(&self) -> u64 {
        self.per_page
    }

    /// Number of pages needed for `total` rows; at least one.
    pub fn total_pages(&self, total: u64) -> u64 {
        total.div_ceil(self.per_page).max(1)
    }
}

impl Default for Pagination {
    fn default() -> Self { Self { page: 1, per_page: 25 } }
}

/// Parse a 1-based page number.
pub fn parse_page(raw: &str) -> Result<u64, CoreError> {
    match raw.trim().parse::<u64>() {
        Ok(0) => Err(CoreError::Parse("page must be >= 1".into())),
        Ok(n) => Ok(n),
        Err(e) => Err(CoreError::Parse(format!("page {raw:?}: {e}"))),
    }
}
