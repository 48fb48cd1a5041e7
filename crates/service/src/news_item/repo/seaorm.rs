use async_trait::async_trait;
use models::news_item::{self, Model};
use sea_orm::{DatabaseConnection, EntityTrait};

use crate::errors::ServiceError;
use crate::news_item::repository::NewsItemRepository;

/// SeaORM-backed repository implementation.
pub struct SeaOrmNewsItemRepository {
    pub db: DatabaseConnection,
}

impl SeaOrmNewsItemRepository {
    pub fn new(db: DatabaseConnection) -> Self { Self { db } }
}

#[async_trait]
impl NewsItemRepository for SeaOrmNewsItemRepository {
    async fn find_by_id(&self, id: i32) -> Result<Option<Model>, ServiceError> {
        news_item::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_all(&self) -> Result<Vec<Model>, ServiceError> {
        news_item::Entity::find()
            .all(&self.db)
            .await
            .map_err(|e| ServiceError::Db(e.to_string()))
    }

    async fn find_page(&self, offset: u64, limit: u64) -> Result<Vec<Model>, ServiceError> {
        Ok(news_item::find_page(&self.db, offset, limit).await?)
    }

    async fn insert(&self, name: &str, body: &str) -> Result<Model, ServiceError> {
        Ok(news_item::create(&self.db, name, body).await?)
    }

    async fn update(&self, id: i32, name: &str, body: &str) -> Result<Model, ServiceError> {
        news_item::update(&self.db, id, name, body)
            .await?
            .ok_or_else(|| ServiceError::not_found("news_item"))
    }

    async fn count(&self) -> Result<u64, ServiceError> {
        Ok(news_item::count(&self.db).await?)
    }
}
