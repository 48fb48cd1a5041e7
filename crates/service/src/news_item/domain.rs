use models::errors::FieldErrors;
use models::news_item::{self, Model};
use sea_orm::prelude::DateTimeWithTimeZone;
use serde::{Deserialize, Serialize};

use crate::errors::ServiceError;
use super::repository::NewsItemRepository;

/// Fields a caller may set on a news item.
///
/// Anything else in a submitted form (ids, timestamps) is ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewsItemInput {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub body: String,
}

impl NewsItemInput {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Self { name: name.into(), body: body.into() }
    }
}

/// A news item as seen by one request: either unsaved (no `id`) or a loaded
/// copy of a stored row, plus the errors from the last validation.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NewsItem {
    pub id: Option<i32>,
    pub name: String,
    pub body: String,
    pub created_at: Option<DateTimeWithTimeZone>,
    pub updated_at: Option<DateTimeWithTimeZone>,
    errors: FieldErrors,
}

impl NewsItem {
    /// Unsaved item; nothing is validated until `validate` or `save`.
    pub fn new(input: NewsItemInput) -> Self {
        Self { name: input.name, body: input.body, ..Self::default() }
    }

    pub fn from_record(record: Model) -> Self {
        Self {
            id: Some(record.id),
            name: record.name,
            body: record.body,
            created_at: Some(record.created_at),
            updated_at: Some(record.updated_at),
            errors: FieldErrors::new(),
        }
    }

    /// Replace the editable fields in memory.
    pub fn assign(&mut self, input: NewsItemInput) {
        self.name = input.name;
        self.body = input.body;
    }

    pub fn is_new_record(&self) -> bool {
        self.id.is_none()
    }

    /// Run both required-field checks, replacing the previous error set.
    pub fn validate(&mut self) -> bool {
        self.errors = news_item::validate(&self.name, &self.body).err().unwrap_or_default();
        self.errors.is_empty()
    }

    pub fn errors(&self) -> &FieldErrors {
        &self.errors
    }

    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// Validate, then insert or update through `repo`.
    ///
    /// Returns `Ok(false)` when validation fails; storage is not touched and
    /// `errors()` explains why. Storage failures come back as `Err`.
    pub async fn save<R>(&mut self, repo: &R) -> Result<bool, ServiceError>
    where
        R: NewsItemRepository + ?Sized,
    {
        if !self.validate() {
            return Ok(false);
        }
        let stored = match self.id {
            None => repo.insert(&self.name, &self.body).await?,
            Some(id) => repo.update(id, &self.name, &self.body).await?,
        };
        *self = Self::from_record(stored);
        Ok(true)
    }

    /// Stored row view, once the item has been saved or loaded.
    pub fn to_record(&self) -> Option<Model> {
        Some(Model {
            id: self.id?,
            name: self.name.clone(),
            body: self.body.clone(),
            created_at: self.created_at?,
            updated_at: self.updated_at?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::news_item::repository::mock::InMemoryNewsItemRepository;
    use models::news_item::BLANK;

    #[test]
    fn requires_name() {
        let mut n = NewsItem::default();
        n.validate();
        assert!(n.errors().contains("name", BLANK));
    }

    #[test]
    fn requires_body() {
        let mut n = NewsItem::default();
        n.validate();
        assert!(n.errors().contains("body", BLANK));
    }

    #[test]
    fn name_and_body_checks_are_independent() {
        let mut n = NewsItem::new(NewsItemInput::new("", "text"));
        assert!(!n.validate());
        assert!(n.errors().contains("name", BLANK));
        assert!(n.errors().get("body").is_empty());

        let mut n = NewsItem::new(NewsItemInput::new("Title", ""));
        assert!(!n.validate());
        assert!(n.errors().get("name").is_empty());
        assert!(n.errors().contains("body", BLANK));
    }

    #[test]
    fn revalidation_clears_old_errors() {
        let mut n = NewsItem::default();
        assert!(!n.validate());
        n.assign(NewsItemInput::new("Title", "text"));
        assert!(n.validate());
        assert!(n.errors().is_empty());
    }

    #[test]
    fn input_ignores_unknown_fields() {
        let input: NewsItemInput = serde_json::from_value(serde_json::json!({
            "name": "Hello", "id": 99, "created_at": "2011-11-06T00:00:00Z"
        })).unwrap();
        assert_eq!(input, NewsItemInput::new("Hello", ""));
    }

    #[tokio::test]
    async fn failed_save_keeps_values_and_errors() {
        let repo = InMemoryNewsItemRepository::default();
        let mut n = NewsItem::new(NewsItemInput::new("Only a name", " "));
        assert!(!n.save(&repo).await.unwrap());
        assert!(!n.is_valid());
        assert!(n.is_new_record());
        assert_eq!(n.name, "Only a name");
        assert!(n.errors().contains("body", BLANK));
        assert_eq!(repo.len(), 0);
    }

    #[tokio::test]
    async fn save_inserts_then_updates() {
        let repo = InMemoryNewsItemRepository::default();
        let mut n = NewsItem::new(NewsItemInput::new("Title", "text"));
        assert!(n.save(&repo).await.unwrap());
        let id = n.id.expect("id assigned");
        let created_at = n.created_at;

        n.assign(NewsItemInput::new("Renamed", "text"));
        assert!(n.save(&repo).await.unwrap());
        assert_eq!(n.id, Some(id));
        assert_eq!(n.created_at, created_at);
        assert!(n.updated_at >= created_at);
        assert_eq!(repo.len(), 1);
        assert_eq!(n.to_record().unwrap().name, "Renamed");
    }

    #[test]
    fn unsaved_item_has_no_record() {
        assert!(NewsItem::new(NewsItemInput::new("a", "b")).to_record().is_none());
    }
}
