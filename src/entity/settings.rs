//! 运行配置实体（ID 固定为 1 的单行表）

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use super::enums::RatingPolicy;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "settings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: i64,

    /// 游戏提交后直接置为 approved（0/1）
    pub auto_approve_games: i32,
    /// 评论提交后直接置为 approved（0/1）
    pub auto_approve_reviews: i32,
    /// 评分聚合口径
    pub rating_policy: RatingPolicy,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
