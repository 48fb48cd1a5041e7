use async_trait::async_trait;
use models::news_item::Model;

use crate::errors::ServiceError;

/// Persistence seam for news items.
///
/// Implementations own identity assignment and timestamps. Callers validate
/// before `insert`/`update`.
#[async_trait]
pub trait NewsItemRepository: Send + Sync {
    async fn find_by_id(&self, id: i32) -> Result<Option<Model>, ServiceError>;
    /// Every row in storage order.
    async fn find_all(&self) -> Result<Vec<Model>, ServiceError>;
    /// Newest first, skipping `offset` rows.
    async fn find_page(&self, offset: u64, limit: u64) -> Result<Vec<Model>, ServiceError>;
    async fn insert(&self, name: &str, body: &str) -> Result<Model, ServiceError>;
    /// Fails with `NotFound` when `id` does not exist.
    async fn update(&self, id: i32, name: &str, body: &str) -> Result<Model, ServiceError>;
    async fn count(&self) -> Result<u64, ServiceError>;
}

/// In-memory repository for tests, benches and doc examples
pub mod mock {
    use super::*;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::sync::{Mutex, MutexGuard};

    use chrono::{Duration, Utc};
    use sea_orm::prelude::DateTimeWithTimeZone;

    #[derive(Default)]
    struct Rows {
        items: Vec<Model>,
        last_id: i32,
    }

    #[derive(Default)]
    pub struct InMemoryNewsItemRepository {
        rows: Mutex<Rows>,
        unavailable: AtomicBool,
    }

    impl InMemoryNewsItemRepository {
        pub fn new() -> Self { Self::default() }

        /// Make every call fail as if the database were down.
        pub fn set_unavailable(&self, down: bool) {
            self.unavailable.store(down, Ordering::SeqCst);
        }

        pub fn len(&self) -> usize {
            self.rows.lock().map(|r| r.items.len()).unwrap_or(0)
        }

        pub fn is_empty(&self) -> bool {
            self.len() == 0
        }

        fn lock(&self) -> Result<MutexGuard<'_, Rows>, ServiceError> {
            if self.unavailable.load(Ordering::SeqCst) {
                return Err(ServiceError::Db("connection refused".into()));
            }
            self.rows.lock().map_err(|e| ServiceError::Db(e.to_string()))
        }
    }

    /// Strictly after every existing `created_at`, so insertion order is listing order.
    fn next_timestamp(rows: &Rows) -> DateTimeWithTimeZone {
        let now: DateTimeWithTimeZone = Utc::now().into();
        match rows.items.iter().map(|m| m.created_at).max() {
            Some(last) if now <= last => last + Duration::microseconds(1),
            _ => now,
        }
    }

    #[async_trait]
    impl NewsItemRepository for InMemoryNewsItemRepository {
        async fn find_by_id(&self, id: i32) -> Result<Option<Model>, ServiceError> {
            let rows = self.lock()?;
            Ok(rows.items.iter().find(|m| m.id == id).cloned())
        }

        async fn find_all(&self) -> Result<Vec<Model>, ServiceError> {
            Ok(self.lock()?.items.clone())
        }

        async fn find_page(&self, offset: u64, limit: u64) -> Result<Vec<Model>, ServiceError> {
            let rows = self.lock()?;
            let mut sorted = rows.items.clone();
            sorted.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));
            Ok(sorted
                .into_iter()
                .skip(usize::try_from(offset).unwrap_or(usize::MAX))
                .take(usize::try_from(limit).unwrap_or(usize::MAX))
                .collect())
        }

        async fn insert(&self, name: &str, body: &str) -> Result<Model, ServiceError> {
            let mut rows = self.lock()?;
            let now = next_timestamp(&rows);
            rows.last_id += 1;
            let m = Model { id: rows.last_id, name: name.to_string(), body: body.to_string(), created_at: now, updated_at: now };
            rows.items.push(m.clone());
            Ok(m)
        }

        async fn update(&self, id: i32, name: &str, body: &str) -> Result<Model, ServiceError> {
            let mut rows = self.lock()?;
            let now: DateTimeWithTimeZone = Utc::now().into();
            let Some(m) = rows.items.iter_mut().find(|m| m.id == id) else {
                return Err(ServiceError::not_found("news_item"));
            };
            m.name = name.to_string();
            m.body = body.to_string();
            m.updated_at = now.max(m.created_at);
            Ok(m.clone())
        }

        async fn count(&self) -> Result<u64, ServiceError> {
            Ok(self.lock()?.items.len() as u64)
        }
    }

}
