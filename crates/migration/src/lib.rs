//! Migrator for the news schema.
pub use sea_orm_migration::prelude::*;

mod m20111106_003632_create_news_items;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![Box::new(m20111106_003632_create_news_items::Migration)]
    }
}
