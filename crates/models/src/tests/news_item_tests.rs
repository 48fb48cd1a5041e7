use anyhow::Result;
use sea_orm::EntityTrait;

use crate::db::connect_in_memory;
use crate::errors::ModelError;
use crate::news_item::{self, BLANK};

#[tokio::test]
async fn test_create_and_find() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let db = connect_in_memory().await?;

    let created = news_item::create(&db, "Opening day", "Doors open at nine.").await?;
    assert!(created.id > 0);
    assert_eq!(created.created_at, created.updated_at);

    let found = news_item::Entity::find_by_id(created.id).one(&db).await?;
    let found = found.expect("row exists");
    assert_eq!(found.name, "Opening day");
    assert_eq!(found.body, "Doors open at nine.");
    Ok(())
}

#[tokio::test]
async fn test_create_rejects_blank_fields() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let db = connect_in_memory().await?;

    match news_item::create(&db, " ", "").await {
        Err(ModelError::Validation(errs)) => {
            assert!(errs.contains("name", BLANK));
            assert!(errs.contains("body", BLANK));
        }
        other => panic!("expected validation error, got {:?}", other),
    }
    assert_eq!(news_item::count(&db).await?, 0);
    Ok(())
}

#[tokio::test]
async fn test_update_bumps_updated_at_only() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let db = connect_in_memory().await?;

    let created = news_item::create(&db, "Draft", "first").await?;
    tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    let updated = news_item::update(&db, created.id, "Final", "second").await?.expect("row exists");
    assert_eq!(updated.id, created.id);
    assert_eq!(updated.name, "Final");
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    let missing = news_item::update(&db, created.id + 100, "x", "y").await?;
    assert!(missing.is_none());
    Ok(())
}

#[tokio::test]
async fn test_find_page_orders_newest_first() -> Result<()> {
    if std::env::var("SKIP_DB_TESTS").is_ok() { return Ok(()); }
    let db = connect_in_memory().await?;

    for name in ["A", "B", "C"] {
        news_item::create(&db, name, "body").await?;
    }
    let names = |rows: Vec<news_item::Model>| rows.into_iter().map(|m| m.name).collect::<Vec<_>>();

    let newest = news_item::find_page(&db, 0, 10).await?;
    assert_eq!(names(newest), vec!["C", "B", "A"]);

    let second = news_item::find_page(&db, 2, 2).await?;
    assert_eq!(names(second), vec!["A"]);

    let beyond = news_item::find_page(&db, 30, 10).await?;
    assert!(beyond.is_empty());

    assert_eq!(news_item::count(&db).await?, 3);
    Ok(())
}
