//! 管理统计数据仓库
//!
//! 时间序列在应用侧分桶：SQLite 自带的日期函数对 unix 秒不够直观，
//! 且各范围的桶标签（日 / ISO 周 / 月）用 chrono 推导更可靠。
//! 序列是稀疏的，没有数据的桶不会出现在结果里。

use crate::entity::enums::ModerationStatus;
use crate::entity::prelude::*;
use crate::entity::{activities, games, reviews, users};
use chrono::{DateTime, Datelike, Utc};
use sea_orm::*;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// 时间序列统计的对象
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsEntity {
    Users,
    Games,
    Reviews,
}

/// 时间序列的分桶粒度
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsRange {
    Daily,
    Weekly,
    Monthly,
}

/// 时间序列中的一个桶
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeBucket {
    /// 桶标签：daily "2023-01-15" / weekly "2023-W02" / monthly "2023-01"
    pub bucket: String,
    pub count: i64,
}

/// 题材分布中的一项
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GenreCount {
    pub genre: String,
    pub count: i64,
}

/// 评分分布中的一档（1-5 全量输出，缺失档计 0）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RatingBucket {
    pub rating: i32,
    pub count: i64,
}

/// 仪表盘概览
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_users: u64,
    pub total_games: u64,
    pub total_reviews: u64,
    pub pending_games: u64,
    pub pending_reviews: u64,
    pub recent_activities: Vec<activities::Model>,
}

/// 管理统计数据仓库
pub struct StatsRepository;

impl StatsRepository {
    /// 某类对象在 [start, end] 内按创建时间分桶的数量序列
    pub async fn time_series(
        db: &DatabaseConnection,
        entity: StatsEntity,
        range: StatsRange,
        start: i64,
        end: i64,
    ) -> Result<Vec<TimeBucket>, DbErr> {
        let timestamps: Vec<i64> = match entity {
            StatsEntity::Users => {
                Users::find()
                    .filter(users::Column::CreatedAt.between(start, end))
                    .select_only()
                    .column(users::Column::CreatedAt)
                    .into_tuple()
                    .all(db)
                    .await?
            }
            StatsEntity::Games => {
                Games::find()
                    .filter(games::Column::CreatedAt.between(start, end))
                    .select_only()
                    .column(games::Column::CreatedAt)
                    .into_tuple()
                    .all(db)
                    .await?
            }
            StatsEntity::Reviews => {
                Reviews::find()
                    .filter(reviews::Column::CreatedAt.between(start, end))
                    .select_only()
                    .column(reviews::Column::CreatedAt)
                    .into_tuple()
                    .all(db)
                    .await?
            }
        };

        // BTreeMap 保证桶按标签升序输出，标签格式本身可按字典序排
        let mut buckets: BTreeMap<String, i64> = BTreeMap::new();
        for ts in timestamps {
            if let Some(label) = bucket_label(ts, range) {
                *buckets.entry(label).or_insert(0) += 1;
            }
        }

        Ok(buckets
            .into_iter()
            .map(|(bucket, count)| TimeBucket { bucket, count })
            .collect())
    }

    /// 全部游戏按题材分布（数量倒序，同数按名字升序）
    ///
    /// 仪表盘口径与 summary 一致：待审与已驳回的游戏也计入。
    /// genre 为空的游戏归入 "Uncategorized"。
    pub async fn genre_distribution(db: &DatabaseConnection) -> Result<Vec<GenreCount>, DbErr> {
        let rows: Vec<(Option<String>, i64)> = Games::find()
            .select_only()
            .column(games::Column::Genre)
            .column_as(games::Column::Id.count(), "count")
            .group_by(games::Column::Genre)
            .into_tuple()
            .all(db)
            .await?;

        let mut merged: BTreeMap<String, i64> = BTreeMap::new();
        for (genre, count) in rows {
            let name = genre.unwrap_or_else(|| "Uncategorized".to_string());
            *merged.entry(name).or_insert(0) += count;
        }

        let mut result: Vec<GenreCount> = merged
            .into_iter()
            .map(|(genre, count)| GenreCount { genre, count })
            .collect();
        result.sort_by(|a, b| b.count.cmp(&a.count).then(a.genre.cmp(&b.genre)));

        Ok(result)
    }

    /// 已审核通过的评论按评分分布（1-5 稠密输出）
    pub async fn rating_distribution(db: &DatabaseConnection) -> Result<Vec<RatingBucket>, DbErr> {
        let counts =
            super::reviews_repository::ReviewsRepository::approved_rating_counts(db).await?;

        Ok((1..=5)
            .map(|rating| RatingBucket {
                rating,
                count: counts
                    .iter()
                    .find(|(r, _)| *r == rating)
                    .map_or(0, |(_, c)| *c),
            })
            .collect())
    }

    /// 仪表盘概览：总量、待审数与最近动态
    pub async fn summary(db: &DatabaseConnection) -> Result<DashboardSummary, DbErr> {
        use super::games_repository::GamesRepository;
        use super::reviews_repository::ReviewsRepository;
        use super::users_repository::UsersRepository;

        Ok(DashboardSummary {
            total_users: UsersRepository::count(db).await?,
            total_games: GamesRepository::count(db).await?,
            total_reviews: ReviewsRepository::count(db).await?,
            pending_games: GamesRepository::count_by_status(db, ModerationStatus::Pending).await?,
            pending_reviews: ReviewsRepository::count_by_status(db, ModerationStatus::Pending)
                .await?,
            recent_activities: super::activities_repository::ActivitiesRepository::recent(db, 10)
                .await?,
        })
    }
}

/// unix 秒对应的桶标签；时间戳超出 chrono 可表示范围时返回 None
pub fn bucket_label(ts: i64, range: StatsRange) -> Option<String> {
    let dt: DateTime<Utc> = DateTime::from_timestamp(ts, 0)?;
    let label = match range {
        StatsRange::Daily => dt.format("%Y-%m-%d").to_string(),
        StatsRange::Monthly => dt.format("%Y-%m").to_string(),
        StatsRange::Weekly => {
            // ISO 8601 周：跨年的周归属 ISO 年份而非日历年份
            let week = dt.iso_week();
            format!("{}-W{:02}", week.year(), week.week())
        }
    };
    Some(label)
}

/// 未显式给出窗口时的默认回溯区间 [start, end]
pub fn default_window(range: StatsRange, now: i64) -> (i64, i64) {
    const DAY: i64 = 86_400;
    let span = match range {
        StatsRange::Daily => 30 * DAY,
        StatsRange::Weekly => 84 * DAY,
        StatsRange::Monthly => 365 * DAY,
    };
    (now - span, now)
}

#[cfg(test)]
mod tests {
    use super::*;

    // 2023-01-15 00:00:00 UTC
    const JAN_15_2023: i64 = 1_673_740_800;

    #[test]
    fn daily_and_monthly_labels() {
        assert_eq!(
            bucket_label(JAN_15_2023, StatsRange::Daily).unwrap(),
            "2023-01-15"
        );
        assert_eq!(
            bucket_label(JAN_15_2023, StatsRange::Monthly).unwrap(),
            "2023-01"
        );
    }

    #[test]
    fn weekly_labels_follow_iso_weeks() {
        assert_eq!(
            bucket_label(JAN_15_2023, StatsRange::Weekly).unwrap(),
            "2023-W02"
        );
        // 2024-12-30 是周一，已属于 2025 年第 1 个 ISO 周
        assert_eq!(
            bucket_label(1_735_516_800, StatsRange::Weekly).unwrap(),
            "2025-W01"
        );
        // 2023-01-01 是周日，仍属于 2022 年最后一个 ISO 周
        assert_eq!(
            bucket_label(1_672_531_200, StatsRange::Weekly).unwrap(),
            "2022-W52"
        );
    }

    #[test]
    fn default_windows_scale_with_range() {
        let now = JAN_15_2023;
        assert_eq!(default_window(StatsRange::Daily, now), (now - 30 * 86_400, now));
        assert_eq!(default_window(StatsRange::Weekly, now), (now - 84 * 86_400, now));
        assert_eq!(
            default_window(StatsRange::Monthly, now),
            (now - 365 * 86_400, now)
        );
    }
}
