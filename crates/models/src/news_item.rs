use sea_orm::{entity::prelude::*, DatabaseConnection, QueryOrder, QuerySelect, Set};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::errors::{FieldErrors, ModelError};

pub const BLANK: &str = "can't be blank";

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "news_items")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub name: String,
    #[sea_orm(column_type = "Text")]
    pub body: String,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

pub fn is_blank(s: &str) -> bool {
    s.trim().is_empty()
}

/// Check both required fields; every violation is reported.
pub fn validate(name: &str, body: &str) -> Result<(), FieldErrors> {
    let mut errors = FieldErrors::new();
    if is_blank(name) { errors.add("name", BLANK); }
    if is_blank(body) { errors.add("body", BLANK); }
    if errors.is_empty() { Ok(()) } else { Err(errors) }
}

pub async fn create(db: &DatabaseConnection, name: &str, body: &str) -> Result<Model, ModelError> {
    validate(name, body).map_err(ModelError::Validation)?;
    let now: DateTimeWithTimeZone = Utc::now().into();
    let am = ActiveModel {
        name: Set(name.to_string()),
        body: Set(body.to_string()),
        created_at: Set(now),
        updated_at: Set(now),
        ..Default::default()
    };
    am.insert(db).await.map_err(|e| ModelError::Db(e.to_string()))
}

/// Overwrite `name` and `body`; `Ok(None)` when the row does not exist.
pub async fn update(db: &DatabaseConnection, id: i32, name: &str, body: &str) -> Result<Option<Model>, ModelError> {
    validate(name, body).map_err(ModelError::Validation)?;
    let Some(found) = Entity::find_by_id(id)
        .one(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))?
    else {
        return Ok(None);
    };
    let mut am: ActiveModel = found.into();
    am.name = Set(name.to_string());
    am.body = Set(body.to_string());
    am.updated_at = Set(Utc::now().into());
    let updated = am.update(db).await.map_err(|e| ModelError::Db(e.to_string()))?;
    Ok(Some(updated))
}

/// Newest first; ties on `created_at` break on the higher id.
pub async fn find_page(db: &DatabaseConnection, offset: u64, limit: u64) -> Result<Vec<Model>, ModelError> {
    Entity::find()
        .order_by_desc(Column::CreatedAt)
        .order_by_desc(Column::Id)
        .offset(offset)
        .limit(limit)
        .all(db)
        .await
        .map_err(|e| ModelError::Db(e.to_string()))
}

pub async fn count(db: &DatabaseConnection) -> Result<u64, ModelError> {
    Entity::find().count(db).await.map_err(|e| ModelError::Db(e.to_string()))
}
