use sea_orm::entity::prelude::*;
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Author details captured at write time. A value snapshot, not a live
/// reference to the users table.
#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct AuthorSnapshot {
    pub id: i32,
    pub name: String,
    pub avatar: String,
    pub join_date: String,
    pub post_count: i32,
}

impl AuthorSnapshot {
    /// Placeholder stamped on threads created without a session token.
    /// Id 0 is a sentinel no real account can hold; store-assigned user
    /// ids start at 1.
    pub fn guest() -> Self {
        Self {
            id: 0,
            name: "John Doe".to_string(),
            avatar: "https://i.pravatar.cc/150?img=1".to_string(),
            join_date: chrono::Utc::now().to_rfc3339(),
            post_count: 10,
        }
    }
}

#[derive(
    Clone, Debug, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
#[serde(rename_all = "camelCase")]
pub struct Reply {
    pub content: String,
    pub author: AuthorSnapshot,
    pub created_at: String,
    pub likes: i32,
    pub is_liked_by_user: bool,
}

#[derive(
    Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
#[serde(transparent)]
pub struct ReplyList(pub Vec<Reply>);

#[derive(
    Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, FromJsonQueryResult, ToSchema,
)]
#[serde(transparent)]
pub struct TagList(pub Vec<String>);

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize, ToSchema)]
#[sea_orm(table_name = "threads")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub category_id: i32,
    pub title: String,
    #[sea_orm(column_type = "Text")]
    pub content: String,
    #[sea_orm(column_type = "JsonBinary")]
    pub author: AuthorSnapshot,
    pub likes: i32,
    pub views: i32,
    #[sea_orm(column_type = "JsonBinary")]
    pub replies: ReplyList,
    #[sea_orm(column_type = "JsonBinary")]
    pub tags: TagList,
    pub created_at: DateTime,
    pub updated_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::category::Entity",
        from = "Column::CategoryId",
        to = "super::category::Column::Id"
    )]
    Category,
}

impl Related<super::category::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Category.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
