//! 游戏数据仓库
//!
//! 除常规 CRUD 外，还承担评分聚合字段的重算：
//! average_rating / review_count 永远从当前评论集推导，不做增量加减。

use crate::database::dto::{GameFilter, GameSortOption, NewGameInput, SortOrder, UpdateGameInput};
use crate::entity::enums::{ModerationStatus, RatingPolicy};
use crate::entity::prelude::*;
use crate::entity::{games, reviews};
use sea_orm::*;

/// 游戏数据仓库
pub struct GamesRepository;

impl GamesRepository {
    // ==================== 游戏 CRUD 操作 ====================

    /// 插入游戏（初始审核状态由调用方决定）
    pub async fn insert(
        db: &DatabaseConnection,
        input: &NewGameInput,
        creator_id: i64,
        status: ModerationStatus,
    ) -> Result<games::Model, DbErr> {
        let now = chrono::Utc::now().timestamp();

        let game = games::ActiveModel {
            id: NotSet,
            title: Set(input.title.trim().to_string()),
            description: Set(input.description.clone()),
            genre: Set(Some(input.genre.clone())),
            release_date: Set(input.release_date.clone()),
            cover_url: Set(input.cover_url.clone()),
            status: Set(status),
            average_rating: Set(0.0),
            review_count: Set(0),
            company_id: Set(input.company_id),
            created_by: Set(creator_id),
            created_at: Set(now),
            updated_at: Set(now),
        };

        game.insert(db).await
    }

    /// 部分更新游戏（不含标签，标签由 TagsRepository 处理）
    pub async fn update(
        db: &DatabaseConnection,
        game_id: i64,
        updates: &UpdateGameInput,
    ) -> Result<games::Model, DbErr> {
        let now = chrono::Utc::now().timestamp();

        let game_active = games::ActiveModel {
            id: Set(game_id),
            title: updates.title.clone().map_or(NotSet, Set),
            description: updates.description.clone().map_or(NotSet, Set),
            genre: updates.genre.clone().map_or(NotSet, |g| Set(Some(g))),
            release_date: updates.release_date.clone().map_or(NotSet, Set),
            cover_url: updates.cover_url.clone().map_or(NotSet, Set),
            company_id: updates.company_id.map_or(NotSet, Set),
            updated_at: Set(now),
            ..Default::default()
        };

        game_active.update(db).await
    }

    /// 根据 ID 查询游戏
    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i64,
    ) -> Result<Option<games::Model>, DbErr> {
        Games::find_by_id(id).one(db).await
    }

    /// 条件查询游戏列表
    ///
    /// status 过滤由服务层按调用者角色决定，此处照单执行。
    pub async fn find_filtered(
        db: &DatabaseConnection,
        filter: &GameFilter,
    ) -> Result<Vec<games::Model>, DbErr> {
        let mut query = Games::find();

        if let Some(status) = filter.status {
            query = query.filter(games::Column::Status.eq(status));
        }
        if let Some(genre) = &filter.genre {
            query = query.filter(games::Column::Genre.eq(genre));
        }
        if let Some(company_id) = filter.company_id {
            query = query.filter(games::Column::CompanyId.eq(company_id));
        }
        if let Some(search) = &filter.search {
            query = query.filter(games::Column::Title.contains(search));
        }

        let order = match filter.sort_order {
            SortOrder::Asc => Order::Asc,
            SortOrder::Desc => Order::Desc,
        };
        query = match filter.sort_by {
            GameSortOption::Added => query.order_by(games::Column::Id, order),
            GameSortOption::Title => query.order_by(games::Column::Title, order),
            GameSortOption::Rating => query
                .order_by(games::Column::AverageRating, order)
                .order_by_desc(games::Column::ReviewCount),
            GameSortOption::Release => query.order_by(games::Column::ReleaseDate, order),
        };

        query.limit(filter.limit).offset(filter.offset).all(db).await
    }

    /// 删除游戏（评论与标签关联由外键级联删除）
    pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<DeleteResult, DbErr> {
        Games::delete_by_id(id).exec(db).await
    }

    /// 获取游戏总数
    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Games::find().count(db).await
    }

    /// 全部游戏 ID（评分口径切换后的全量重算用）
    pub async fn all_ids(db: &DatabaseConnection) -> Result<Vec<i64>, DbErr> {
        Games::find()
            .select_only()
            .column(games::Column::Id)
            .into_tuple()
            .all(db)
            .await
    }

    /// 按审核状态统计数量
    pub async fn count_by_status(
        db: &DatabaseConnection,
        status: ModerationStatus,
    ) -> Result<u64, DbErr> {
        Games::find()
            .filter(games::Column::Status.eq(status))
            .count(db)
            .await
    }

    // ==================== 审核状态 ====================

    /// 切换审核状态
    ///
    /// 不限制当前状态：管理员可以把 rejected 的内容重新置为 approved。
    pub async fn set_status(
        db: &DatabaseConnection,
        game_id: i64,
        status: ModerationStatus,
    ) -> Result<games::Model, DbErr> {
        let game = Games::find_by_id(game_id)
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound("Game not found".to_string()))?;

        let mut active: games::ActiveModel = game.into();
        active.status = Set(status);
        active.updated_at = Set(chrono::Utc::now().timestamp());

        active.update(db).await
    }

    // ==================== 评分聚合 ====================

    /// 从当前评论集重算评分聚合字段
    ///
    /// 返回 false 表示游戏已不存在（由调用方决定是否告警）。
    /// 空集合写回 (0.0, 0)，其余写回均值（保留 1 位小数）与条数。
    pub async fn recompute_rating(
        db: &DatabaseConnection,
        game_id: i64,
        policy: RatingPolicy,
    ) -> Result<bool, DbErr> {
        let Some(game) = Games::find_by_id(game_id).one(db).await? else {
            return Ok(false);
        };

        let mut query = Reviews::find().filter(reviews::Column::GameId.eq(game_id));
        if policy == RatingPolicy::ApprovedOnly {
            query = query.filter(reviews::Column::Status.eq(ModerationStatus::Approved));
        }

        let ratings: Vec<i32> = query
            .select_only()
            .column(reviews::Column::Rating)
            .into_tuple()
            .all(db)
            .await?;

        let (average, count) = if ratings.is_empty() {
            (0.0, 0)
        } else {
            let sum: i64 = ratings.iter().map(|r| *r as i64).sum();
            let mean = sum as f64 / ratings.len() as f64;
            (round_one_decimal(mean), ratings.len() as i64)
        };

        let mut active: games::ActiveModel = game.into();
        active.average_rating = Set(average);
        active.review_count = Set(count);
        active.update(db).await?;

        Ok(true)
    }
}

/// 四舍五入到 1 位小数
pub fn round_one_decimal(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rounding_keeps_one_decimal() {
        assert_eq!(round_one_decimal(4.5), 4.5);
        assert_eq!(round_one_decimal(11.0 / 3.0), 3.7);
        assert_eq!(round_one_decimal(4.0), 4.0);
        assert_eq!(round_one_decimal(4.25), 4.3);
    }
}
