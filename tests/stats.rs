//! 管理统计：时间序列分桶、分布与仪表盘概览

mod common;

use review_board::database::repository::stats_repository::{StatsEntity, StatsRange};
use review_board::database::{self, dto};
use review_board::entity::enums::UserRole;
use review_board::entity::users;
use sea_orm::{ActiveModelTrait, NotSet, Set};

// 2023-01-01 / 2023-01-15 / 2023-03-01 / 2023-04-01 各自 00:00:00 UTC
const JAN_1: i64 = 1_672_531_200;
const JAN_15: i64 = 1_673_740_800;
const MAR_1: i64 = 1_677_628_800;
const APR_1: i64 = 1_680_307_200;

async fn seed_user(state: &review_board::AppState, name: &str, created_at: i64) {
    let user = users::ActiveModel {
        id: NotSet,
        username: Set(name.to_string()),
        email: Set(format!("{}@example.com", name)),
        password_hash: Set("$argon2id$stub".to_string()),
        role: Set(UserRole::User),
        avatar_url: Set(None),
        created_at: Set(created_at),
    };
    user.insert(&state.db).await.unwrap();
}

#[tokio::test]
async fn monthly_series_is_sparse_and_ordered() {
    let state = common::setup().await;
    let admin = common::register_admin(&state, "root").await;

    seed_user(&state, "jan_a", JAN_1).await;
    seed_user(&state, "jan_b", JAN_15).await;
    seed_user(&state, "mar_a", MAR_1).await;

    let series = database::stats_time_series(
        &state,
        &admin,
        StatsEntity::Users,
        StatsRange::Monthly,
        Some(JAN_1),
        Some(APR_1),
    )
    .await
    .unwrap();

    // 二月没有数据就没有桶
    let pairs: Vec<(&str, i64)> = series
        .iter()
        .map(|b| (b.bucket.as_str(), b.count))
        .collect();
    assert_eq!(pairs, vec![("2023-01", 2), ("2023-03", 1)]);
}

#[tokio::test]
async fn series_rejects_inverted_window_and_non_admin() {
    let state = common::setup().await;
    let admin = common::register_admin(&state, "root").await;
    let user = common::register(&state, "bob").await;

    let err = database::stats_time_series(
        &state,
        &user,
        StatsEntity::Games,
        StatsRange::Daily,
        None,
        None,
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), "forbidden");

    let err = database::stats_time_series(
        &state,
        &admin,
        StatsEntity::Games,
        StatsRange::Daily,
        Some(APR_1),
        Some(JAN_1),
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), "validation");
}

#[tokio::test]
async fn rating_distribution_is_dense() {
    let state = common::setup().await;
    let creator = common::register(&state, "alice").await;
    let admin = common::register_admin(&state, "root").await;
    let game_id = common::approved_game(&state, &creator, &admin, "Ever17").await;

    for (name, rating) in [("bob", 4), ("carol", 4), ("dave", 5)] {
        let ctx = common::register(&state, name).await;
        let review = database::submit_review(
            &state,
            &ctx,
            dto::NewReviewInput {
                game_id,
                rating,
                comment: "好".to_string(),
            },
        )
        .await
        .unwrap();
        database::approve_review(&state, &admin, review.id).await.unwrap();
    }

    let dist = database::stats_rating_distribution(&state, &admin)
        .await
        .unwrap();
    let counts: Vec<(i32, i64)> = dist.iter().map(|b| (b.rating, b.count)).collect();
    assert_eq!(counts, vec![(1, 0), (2, 0), (3, 0), (4, 2), (5, 1)]);
}

#[tokio::test]
async fn genre_distribution_counts_all_games() {
    let state = common::setup().await;
    let creator = common::register(&state, "alice").await;
    let admin = common::register_admin(&state, "root").await;

    common::approved_game(&state, &creator, &admin, "Ys VIII").await;
    common::approved_game(&state, &creator, &admin, "Trails FC").await;
    // 仪表盘口径：待审的也计入
    database::submit_game(&state, &creator, common::game_input("Draft"))
        .await
        .unwrap();

    let dist = database::stats_genre_distribution(&state, &admin)
        .await
        .unwrap();
    assert_eq!(dist.len(), 1);
    assert_eq!(dist[0].genre, "RPG");
    assert_eq!(dist[0].count, 3);
}

#[tokio::test]
async fn summary_reports_totals_pendings_and_activity() {
    let state = common::setup().await;
    let creator = common::register(&state, "alice").await;
    let admin = common::register_admin(&state, "root").await;

    common::approved_game(&state, &creator, &admin, "Aokana").await;
    database::submit_game(&state, &creator, common::game_input("Draft"))
        .await
        .unwrap();

    let reviewer = common::register(&state, "bob").await;
    let games = database::list_games(&state, None, dto::GameFilter::default())
        .await
        .unwrap();
    database::submit_review(
        &state,
        &reviewer,
        dto::NewReviewInput {
            game_id: games[0].id,
            rating: 5,
            comment: "买了".to_string(),
        },
    )
    .await
    .unwrap();

    let summary = database::stats_summary(&state, &admin).await.unwrap();
    assert_eq!(summary.total_users, 3);
    assert_eq!(summary.total_games, 2);
    assert_eq!(summary.total_reviews, 1);
    assert_eq!(summary.pending_games, 1);
    assert_eq!(summary.pending_reviews, 1);
    // 注册、提交、评论都会留下动态
    assert!(!summary.recent_activities.is_empty());
}
