//! 运行配置数据仓库
//!
//! settings 表只有一行（ID 固定为 1），读取时不存在则先写入默认值。

use crate::database::dto::UpdateSettingsInput;
use crate::entity::enums::RatingPolicy;
use crate::entity::prelude::*;
use crate::entity::settings;
use sea_orm::*;

const SETTINGS_ROW_ID: i64 = 1;

/// 运行配置数据仓库
pub struct SettingsRepository;

impl SettingsRepository {
    /// 读取配置，行不存在则创建默认行
    pub async fn get(db: &DatabaseConnection) -> Result<settings::Model, DbErr> {
        if let Some(existing) = Settings::find_by_id(SETTINGS_ROW_ID).one(db).await? {
            return Ok(existing);
        }

        let defaults = settings::ActiveModel {
            id: Set(SETTINGS_ROW_ID),
            auto_approve_games: Set(0),
            auto_approve_reviews: Set(0),
            rating_policy: Set(RatingPolicy::ApprovedOnly),
        };
        defaults.insert(db).await
    }

    /// 部分更新配置
    pub async fn update(
        db: &DatabaseConnection,
        updates: &UpdateSettingsInput,
    ) -> Result<settings::Model, DbErr> {
        // 保证行存在
        Self::get(db).await?;

        let settings_active = settings::ActiveModel {
            id: Set(SETTINGS_ROW_ID),
            auto_approve_games: updates
                .auto_approve_games
                .map_or(NotSet, |v| Set(v as i32)),
            auto_approve_reviews: updates
                .auto_approve_reviews
                .map_or(NotSet, |v| Set(v as i32)),
            rating_policy: updates.rating_policy.map_or(NotSet, Set),
        };

        settings_active.update(db).await
    }
}
