//! 动态记录数据仓库

use crate::entity::activities;
use crate::entity::enums::ActivityKind;
use crate::entity::prelude::*;
use sea_orm::*;

/// 动态记录数据仓库
pub struct ActivitiesRepository;

impl ActivitiesRepository {
    /// 写入一条动态
    pub async fn record(
        db: &DatabaseConnection,
        kind: ActivityKind,
        title: &str,
        user_id: Option<i64>,
    ) -> Result<activities::Model, DbErr> {
        let activity = activities::ActiveModel {
            id: NotSet,
            kind: Set(kind),
            title: Set(title.to_string()),
            user_id: Set(user_id),
            created_at: Set(chrono::Utc::now().timestamp()),
        };

        activity.insert(db).await
    }

    /// 最近 N 条动态（时间倒序）
    pub async fn recent(
        db: &DatabaseConnection,
        limit: u64,
    ) -> Result<Vec<activities::Model>, DbErr> {
        Activities::find()
            .order_by_desc(activities::Column::CreatedAt)
            .order_by_desc(activities::Column::Id)
            .limit(limit)
            .all(db)
            .await
    }
}
