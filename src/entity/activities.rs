//! 动态记录实体
//!
//! 仪表盘"最近动态"数据，只写不改。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::ActivityKind;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "activities")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,

    pub kind: ActivityKind,
    #[sea_orm(column_type = "Text")]
    pub title: String,
    pub user_id: Option<i64>,

    pub created_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
