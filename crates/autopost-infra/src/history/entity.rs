//! Post history entity for SeaORM.

use sea_orm::entity::prelude::*;

use autopost_core::domain::HistoryRecord;

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    pub keywords: String,
    pub image_url: Option<String>,
    pub wordpress_id: Option<i64>,
    pub created_at: DateTimeUtc,
    #[sea_orm(default_value = "published")]
    pub status: String,
    pub template_used: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}

impl From<Model> for HistoryRecord {
    fn from(model: Model) -> Self {
        Self {
            id: i64::from(model.id),
            title: model.title,
            content: model.content,
            keywords: model.keywords,
            image_url: model.image_url,
            wordpress_post_id: model.wordpress_id,
            created_at: model.created_at,
            status: model.status,
            template_used: model.template_used,
        }
    }
}
