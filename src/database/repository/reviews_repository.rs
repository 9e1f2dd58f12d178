//! 评论数据仓库

use crate::database::dto::{NewReviewInput, ReviewFilter, UpdateReviewInput};
use crate::entity::enums::ModerationStatus;
use crate::entity::prelude::*;
use crate::entity::reviews;
use sea_orm::*;

/// 评论数据仓库
pub struct ReviewsRepository;

impl ReviewsRepository {
    // ==================== 评论 CRUD 操作 ====================

    /// 插入评论（初始审核状态由调用方决定）
    pub async fn insert(
        db: &DatabaseConnection,
        input: &NewReviewInput,
        author_id: i64,
        status: ModerationStatus,
    ) -> Result<reviews::Model, DbErr> {
        let now = chrono::Utc::now().timestamp();

        let review = reviews::ActiveModel {
            id: NotSet,
            game_id: Set(input.game_id),
            user_id: Set(author_id),
            rating: Set(input.rating),
            comment: Set(input.comment.trim().to_string()),
            status: Set(status),
            created_at: Set(now),
            updated_at: Set(now),
        };

        review.insert(db).await
    }

    /// 部分更新评论内容
    pub async fn update(
        db: &DatabaseConnection,
        review_id: i64,
        updates: &UpdateReviewInput,
    ) -> Result<reviews::Model, DbErr> {
        let review_active = reviews::ActiveModel {
            id: Set(review_id),
            rating: updates.rating.map_or(NotSet, Set),
            comment: updates
                .comment
                .clone()
                .map_or(NotSet, |c| Set(c.trim().to_string())),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        review_active.update(db).await
    }

    /// 根据 ID 查询评论
    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i64,
    ) -> Result<Option<reviews::Model>, DbErr> {
        Reviews::find_by_id(id).one(db).await
    }

    /// 查询某用户对某游戏的评论（一人一游戏一条的查重入口）
    pub async fn find_by_user_and_game(
        db: &DatabaseConnection,
        user_id: i64,
        game_id: i64,
    ) -> Result<Option<reviews::Model>, DbErr> {
        Reviews::find()
            .filter(
                reviews::Column::UserId
                    .eq(user_id)
                    .and(reviews::Column::GameId.eq(game_id)),
            )
            .one(db)
            .await
    }

    /// 条件查询评论列表（创建时间倒序）
    pub async fn find_filtered(
        db: &DatabaseConnection,
        filter: &ReviewFilter,
    ) -> Result<Vec<reviews::Model>, DbErr> {
        let mut query = Reviews::find();

        if let Some(game_id) = filter.game_id {
            query = query.filter(reviews::Column::GameId.eq(game_id));
        }
        if let Some(user_id) = filter.user_id {
            query = query.filter(reviews::Column::UserId.eq(user_id));
        }
        if let Some(status) = filter.status {
            query = query.filter(reviews::Column::Status.eq(status));
        }

        query
            .order_by_desc(reviews::Column::CreatedAt)
            .order_by_desc(reviews::Column::Id)
            .limit(filter.limit)
            .offset(filter.offset)
            .all(db)
            .await
    }

    /// 删除评论
    pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<DeleteResult, DbErr> {
        Reviews::delete_by_id(id).exec(db).await
    }

    /// 获取评论总数
    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Reviews::find().count(db).await
    }

    /// 按审核状态统计数量
    pub async fn count_by_status(
        db: &DatabaseConnection,
        status: ModerationStatus,
    ) -> Result<u64, DbErr> {
        Reviews::find()
            .filter(reviews::Column::Status.eq(status))
            .count(db)
            .await
    }

    /// 某用户评论过的全部游戏 ID（删除用户前采集，用于级联后的重算）
    pub async fn game_ids_reviewed_by(
        db: &DatabaseConnection,
        user_id: i64,
    ) -> Result<Vec<i64>, DbErr> {
        Reviews::find()
            .filter(reviews::Column::UserId.eq(user_id))
            .select_only()
            .column(reviews::Column::GameId)
            .into_tuple()
            .all(db)
            .await
    }

    // ==================== 审核状态 ====================

    /// 切换审核状态（不限制当前状态）
    pub async fn set_status(
        db: &DatabaseConnection,
        review_id: i64,
        status: ModerationStatus,
    ) -> Result<reviews::Model, DbErr> {
        let review = Reviews::find_by_id(review_id)
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound("Review not found".to_string()))?;

        let mut active: reviews::ActiveModel = review.into();
        active.status = Set(status);
        active.updated_at = Set(chrono::Utc::now().timestamp());

        active.update(db).await
    }

    // ==================== 统计 ====================

    /// 已通过审核的评论按评分分组计数（稀疏，缺失评分不出现）
    pub async fn approved_rating_counts(db: &DatabaseConnection) -> Result<Vec<(i32, i64)>, DbErr> {
        Reviews::find()
            .select_only()
            .column(reviews::Column::Rating)
            .column_as(reviews::Column::Id.count(), "count")
            .filter(reviews::Column::Status.eq(ModerationStatus::Approved))
            .group_by(reviews::Column::Rating)
            .into_tuple()
            .all(db)
            .await
    }
}
