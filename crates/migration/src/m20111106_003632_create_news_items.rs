//! Create `news_items` table.
//!
//! Listing reads newest first, so `created_at` is indexed.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(NewsItems::Table)
                    .if_not_exists()
                    .col(pk_auto(NewsItems::Id))
                    .col(string(NewsItems::Name).not_null())
                    .col(text(NewsItems::Body).not_null())
                    .col(timestamp_with_time_zone(NewsItems::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(NewsItems::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_news_items_created_at")
                    .table(NewsItems::Table)
                    .col(NewsItems::CreatedAt)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(NewsItems::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum NewsItems { Table, Id, Name, Body, CreatedAt, UpdatedAt }
