#![cfg(test)]
use sea_orm::DatabaseConnection;

/// Fresh migrated database for one test.
///
/// Each call gets its own in-memory SQLite instance, so tests never see each
/// other's rows.
pub async fn get_db() -> Result<DatabaseConnection, anyhow::Error> {
    models::db::connect_in_memory().await
}
