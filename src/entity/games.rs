//! 游戏实体
//!
//! average_rating 与 review_count 是派生字段，由评分聚合逻辑重算，
//! 不允许被其他写入路径随意修改。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::ModerationStatus;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "games")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    #[sea_orm(column_type = "Text")]
    pub title: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub description: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub genre: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub release_date: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub cover_url: Option<String>,

    // === 审核与评分聚合 ===
    pub status: ModerationStatus,
    #[sea_orm(column_type = "Double")]
    pub average_rating: f64,
    pub review_count: i64,

    // === 关联 ===
    pub company_id: Option<i64>,
    pub created_by: i64,

    // === 时间戳 ===
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::companies::Entity",
        from = "Column::CompanyId",
        to = "super::companies::Column::Id"
    )]
    Company,
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::CreatedBy",
        to = "super::users::Column::Id"
    )]
    Creator,
    #[sea_orm(has_many = "super::reviews::Entity")]
    Reviews,
    #[sea_orm(has_many = "super::game_tags::Entity")]
    GameTags,
}

impl Related<super::companies::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Company.def()
    }
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Creator.def()
    }
}

impl Related<super::reviews::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Reviews.def()
    }
}

impl Related<super::game_tags::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::GameTags.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
