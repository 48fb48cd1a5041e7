//! Admin create/edit/list for news items.
//!
//! Validation failure is an outcome, not an error: the caller re-displays the
//! form with `SubmitOutcome::Invalid`. Missing ids and storage failures are
//! `ServiceError`s.

use std::sync::Arc;

use models::news_item::Model;
use tracing::{info, instrument, warn};

use crate::errors::ServiceError;
use super::domain::{NewsItem, NewsItemInput};
use super::repository::NewsItemRepository;

pub const CREATED_NOTICE: &str = "Created successfully.";
pub const SAVED_NOTICE: &str = "Saved successfully.";

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Persisted; redirect to the listing with `notice`.
    Saved { item: NewsItem, notice: &'static str },
    /// Submitted values plus their validation errors.
    Invalid(NewsItem),
}

impl SubmitOutcome {
    pub fn is_saved(&self) -> bool {
        matches!(self, Self::Saved { .. })
    }

    pub fn item(&self) -> &NewsItem {
        match self {
            Self::Saved { item, .. } | Self::Invalid(item) => item,
        }
    }
}

pub struct AdminNewsService<R: NewsItemRepository + ?Sized> {
    repo: Arc<R>,
}

impl<R: NewsItemRepository + ?Sized> AdminNewsService<R> {
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// Every item in storage order, unpaginated.
    pub async fn list_all(&self) -> Result<Vec<Model>, ServiceError> {
        self.repo.find_all().await
    }

    pub fn new_form(&self) -> NewsItem {
        NewsItem::default()
    }

    pub async fn show_one(&self, id: i32) -> Result<NewsItem, ServiceError> {
        self.load(id).await
    }

    pub async fn edit_form(&self, id: i32) -> Result<NewsItem, ServiceError> {
        self.load(id).await
    }

    async fn load(&self, id: i32) -> Result<NewsItem, ServiceError> {
        self.repo
            .find_by_id(id)
            .await?
            .map(NewsItem::from_record)
            .ok_or_else(|| ServiceError::not_found("news_item"))
    }

    /// Validate and insert a new item.
    ///
    /// ```
    /// use std::sync::Arc;
    /// use service::news_item::{AdminNewsService, NewsItemInput, SubmitOutcome};
    /// use service::news_item::repository::mock::InMemoryNewsItemRepository;
    ///
    /// tokio_test::block_on(async {
    ///     let svc = AdminNewsService::new(Arc::new(InMemoryNewsItemRepository::new()));
    ///     let out = svc.create(NewsItemInput::new("Test", "test")).await.unwrap();
    ///     assert!(matches!(out, SubmitOutcome::Saved { notice: "Created successfully.", .. }));
    ///     let out = svc.create(NewsItemInput::default()).await.unwrap();
    ///     assert!(!out.is_saved());
    /// });
    /// ```
    #[instrument(skip(self, input))]
    pub async fn create(&self, input: NewsItemInput) -> Result<SubmitOutcome, ServiceError> {
        let mut item = NewsItem::new(input);
        if !item.save(self.repo.as_ref()).await? {
            warn!(errors = %item.errors(), "news_item_invalid");
            return Ok(SubmitOutcome::Invalid(item));
        }
        info!(id = ?item.id, "news_item_created");
        Ok(SubmitOutcome::Saved { item, notice: CREATED_NOTICE })
    }

    /// Load, assign, validate and save. The stored row is untouched when
    /// validation fails.
    #[instrument(skip(self, input))]
    pub async fn update(&self, id: i32, input: NewsItemInput) -> Result<SubmitOutcome, ServiceError> {
        let mut item = self.load(id).await?;
        item.assign(input);
        if !item.save(self.repo.as_ref()).await? {
            warn!(id, errors = %item.errors(), "news_item_invalid");
            return Ok(SubmitOutcome::Invalid(item));
        }
        info!(id, "news_item_updated");
        Ok(SubmitOutcome::Saved { item, notice: SAVED_NOTICE })
    }
}
