//! Read-only news listing and detail for site visitors.

use std::sync::Arc;

use common::pagination::Pagination;
use models::news_item::Model;
use serde::Serialize;
use tracing::debug;

use crate::errors::ServiceError;
use super::format::ResponseFormat;
use super::repository::NewsItemRepository;

/// Default page size for the public listing.
pub const DEFAULT_PER_PAGE: u64 = 25;

/// One page of the newest-first listing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsPage {
    pub items: Vec<Model>,
    pub page: u64,
    pub per_page: u64,
    pub total: u64,
    pub total_pages: u64,
}

impl NewsPage {
    pub fn prev_page(&self) -> Option<u64> {
        (self.page > 1).then(|| self.page - 1)
    }

    pub fn next_page(&self) -> Option<u64> {
        (self.page < self.total_pages).then(|| self.page + 1)
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewsListing {
    pub page: NewsPage,
    pub format: ResponseFormat,
}

pub struct PublicNewsService<R: NewsItemRepository + ?Sized> {
    repo: Arc<R>,
    per_page: u64,
}

impl<R: NewsItemRepository + ?Sized> PublicNewsService<R> {
    pub fn new(repo: Arc<R>, per_page: u64) -> Self {
        let per_page = Pagination::new(1, per_page).per_page;
        Self { repo, per_page }
    }

    pub fn per_page(&self) -> u64 {
        self.per_page
    }

    /// Newest-first page for the raw `page` query value.
    ///
    /// Unparseable or zero pages mean page 1; a page past the end is empty.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use service::news_item::{PublicNewsService, ResponseFormat, NewsItemRepository};
    /// use service::news_item::repository::mock::InMemoryNewsItemRepository;
    ///
    /// tokio_test::block_on(async {
    ///     let repo = Arc::new(InMemoryNewsItemRepository::new());
    ///     repo.insert("Hello", "World").await.unwrap();
    ///     let svc = PublicNewsService::new(repo, 25);
    ///     let listing = svc.list_news(Some("abc"), ResponseFormat::Json).await.unwrap();
    ///     assert_eq!(listing.page.page, 1);
    ///     assert_eq!(listing.page.items[0].name, "Hello");
    /// });
    /// ```
    pub async fn list_news(&self, page: Option<&str>, format: ResponseFormat) -> Result<NewsListing, ServiceError> {
        let p = Pagination::from_query(page, self.per_page);
        let total = self.repo.count().await?;
        let items = if p.is_past_end(total) {
            Vec::new()
        } else {
            self.repo.find_page(p.offset(), p.limit()).await?
        };
        debug!(page = p.page, per_page = p.per_page, total, returned = items.len(), "news_page_loaded");
        Ok(NewsListing {
            page: NewsPage {
                items,
                page: p.page,
                per_page: p.per_page,
                total,
                total_pages: p.total_pages(total),
            },
            format,
        })
    }

    pub async fn show_news(&self, id: i32) -> Result<Model, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .ok_or_else(|| ServiceError::not_found("news_item"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news_item::repository::mock::InMemoryNewsItemRepository;

    async fn seeded(names: &[&str]) -> Arc<InMemoryNewsItemRepository> {
        let repo = Arc::new(InMemoryNewsItemRepository::new());
        for name in names {
            repo.insert(name, "body").await.unwrap();
        }
        repo
    }

    fn names(page: &NewsPage) -> Vec<&str> {
        page.items.iter().map(|m| m.name.as_str()).collect()
    }

    #[tokio::test]
    async fn lists_newest_first() {
        let svc = PublicNewsService::new(seeded(&["A", "B", "C"]).await, 25);
        let listing = svc.list_news(None, ResponseFormat::Html).await.unwrap();
        assert_eq!(names(&listing.page), vec!["C", "B", "A"]);
        assert_eq!(listing.page.total, 3);
        assert_eq!(listing.page.total_pages, 1);
        assert_eq!(listing.format, ResponseFormat::Html);
    }

    #[tokio::test]
    async fn pages_are_fixed_size() {
        let svc = PublicNewsService::new(seeded(&["A", "B", "C", "D", "E"]).await, 2);
        let first = svc.list_news(Some("1"), ResponseFormat::Json).await.unwrap().page;
        assert_eq!(names(&first), vec!["E", "D"]);
        assert_eq!(first.prev_page(), None);
        assert_eq!(first.next_page(), Some(2));

        let last = svc.list_news(Some("3"), ResponseFormat::Json).await.unwrap().page;
        assert_eq!(names(&last), vec!["A"]);
        assert_eq!(last.total_pages, 3);
        assert_eq!(last.prev_page(), Some(2));
        assert_eq!(last.next_page(), None);
    }

    #[tokio::test]
    async fn page_past_the_end_is_empty() {
        let svc = PublicNewsService::new(seeded(&["A"]).await, 25);
        let listing = svc.list_news(Some("9"), ResponseFormat::Html).await.unwrap();
        assert!(listing.page.is_empty());
        assert_eq!(listing.page.page, 9);
        assert_eq!(listing.page.total, 1);
    }

    #[tokio::test]
    async fn huge_page_skips_the_page_query() {
        let repo = seeded(&["A"]).await;
        let svc = PublicNewsService::new(repo, 25);
        let listing = svc.list_news(Some("400000000000000000"), ResponseFormat::Json).await.unwrap();
        assert!(listing.page.is_empty());
        assert_eq!(listing.page.page, 400_000_000_000_000_000);
        assert_eq!(listing.page.next_page(), None);
    }

    #[tokio::test]
    async fn bad_page_values_mean_first_page() {
        let svc = PublicNewsService::new(seeded(&["A", "B"]).await, 1);
        for raw in ["abc", "0", "-3", ""] {
            let page = svc.list_news(Some(raw), ResponseFormat::Html).await.unwrap().page;
            assert_eq!(page.page, 1, "raw {raw:?}");
            assert_eq!(names(&page), vec!["B"]);
        }
    }

    #[tokio::test]
    async fn empty_store_has_one_empty_page() {
        let svc = PublicNewsService::new(seeded(&[]).await, 25);
        let page = svc.list_news(None, ResponseFormat::Xml).await.unwrap().page;
        assert!(page.is_empty());
        assert_eq!(page.total_pages, 1);
    }

    #[tokio::test]
    async fn show_finds_or_reports_missing() {
        let svc = PublicNewsService::new(seeded(&["A"]).await, 25);
        assert_eq!(svc.show_news(1).await.unwrap().name, "A");
        assert!(svc.show_news(2).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn storage_failure_propagates() {
        let repo = seeded(&["A"]).await;
        repo.set_unavailable(true);
        let svc = PublicNewsService::new(repo, 25);
        assert!(matches!(svc.list_news(None, ResponseFormat::Html).await, Err(ServiceError::Db(_))));
        assert!(matches!(svc.show_news(1).await, Err(ServiceError::Db(_))));
    }

    #[test]
    fn page_size_is_clamped() {
        let repo = Arc::new(InMemoryNewsItemRepository::new());
        assert_eq!(PublicNewsService::new(repo.clone(), 0).per_page(), 1);
        assert_eq!(PublicNewsService::new(repo, 1_000).per_page(), 100);
    }
}
