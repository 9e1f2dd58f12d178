//! 评分聚合：均值重算、重复评论、口径切换

mod common;

use review_board::database::{self, dto};
use review_board::AppState;

async fn game_snapshot(state: &AppState, admin: &review_board::AuthContext, id: i64) -> (f64, i64) {
    let game = database::get_game(state, Some(admin), id).await.unwrap();
    (game.game.average_rating, game.game.review_count)
}

fn review(game_id: i64, rating: i32) -> dto::NewReviewInput {
    dto::NewReviewInput {
        game_id,
        rating,
        comment: "一周目通关".to_string(),
    }
}

#[tokio::test]
async fn average_tracks_approved_reviews() {
    let state = common::setup().await;
    let creator = common::register(&state, "alice").await;
    let admin = common::register_admin(&state, "root").await;
    let game_id = common::approved_game(&state, &creator, &admin, "Baldr Sky").await;

    let u1 = common::register(&state, "bob").await;
    let u2 = common::register(&state, "carol").await;

    let r1 = database::submit_review(&state, &u1, review(game_id, 4)).await.unwrap();
    // 待审评论不计入
    assert_eq!(game_snapshot(&state, &admin, game_id).await, (0.0, 0));

    database::approve_review(&state, &admin, r1.id).await.unwrap();
    assert_eq!(game_snapshot(&state, &admin, game_id).await, (4.0, 1));

    let r2 = database::submit_review(&state, &u2, review(game_id, 5)).await.unwrap();
    database::approve_review(&state, &admin, r2.id).await.unwrap();
    assert_eq!(game_snapshot(&state, &admin, game_id).await, (4.5, 2));

    // 驳回后回落
    database::reject_review(&state, &admin, r2.id).await.unwrap();
    assert_eq!(game_snapshot(&state, &admin, game_id).await, (4.0, 1));
}

#[tokio::test]
async fn duplicate_review_conflicts_and_leaves_aggregates() {
    let state = common::setup().await;
    let creator = common::register(&state, "alice").await;
    let admin = common::register_admin(&state, "root").await;
    let game_id = common::approved_game(&state, &creator, &admin, "Muv-Luv").await;

    let u1 = common::register(&state, "bob").await;
    let r1 = database::submit_review(&state, &u1, review(game_id, 4)).await.unwrap();
    database::approve_review(&state, &admin, r1.id).await.unwrap();

    let err = database::submit_review(&state, &u1, review(game_id, 5))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "conflict");
    assert_eq!(game_snapshot(&state, &admin, game_id).await, (4.0, 1));
}

#[tokio::test]
async fn concurrent_duplicate_reviews_conflict_instead_of_internal_error() {
    use review_board::database::repository::reviews_repository::ReviewsRepository;
    use review_board::entity::enums::ModerationStatus;
    use sea_orm::SqlErr;

    let state = common::setup().await;
    let creator = common::register(&state, "alice").await;
    let admin = common::register_admin(&state, "root").await;
    let game_id = common::approved_game(&state, &creator, &admin, "Tsukihime").await;
    let u1 = common::register(&state, "bob").await;

    // 两次提交交错执行：恰好一次成功，失败的一次必须是 409 而不是 500
    let (a, b) = tokio::join!(
        database::submit_review(&state, &u1, review(game_id, 4)),
        database::submit_review(&state, &u1, review(game_id, 5)),
    );
    let results = [a.map(|_| ()), b.map(|_| ())];
    assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
    for outcome in &results {
        if let Err(e) = outcome {
            assert_eq!(e.kind(), "conflict");
        }
    }

    // 绕过预检直接写第二条：数据库层的唯一约束就是兜底依据
    let input = review(game_id, 3);
    let err = ReviewsRepository::insert(&state.db, &input, u1.user_id, ModerationStatus::Pending)
        .await
        .unwrap_err();
    assert!(matches!(
        err.sql_err(),
        Some(SqlErr::UniqueConstraintViolation(_))
    ));
}

#[tokio::test]
async fn editing_and_deleting_recompute() {
    let state = common::setup().await;
    let creator = common::register(&state, "alice").await;
    let admin = common::register_admin(&state, "root").await;
    let game_id = common::approved_game(&state, &creator, &admin, "Umineko").await;

    let u1 = common::register(&state, "bob").await;
    let r1 = database::submit_review(&state, &u1, review(game_id, 3)).await.unwrap();
    database::approve_review(&state, &admin, r1.id).await.unwrap();

    database::update_review(
        &state,
        &u1,
        r1.id,
        dto::UpdateReviewInput {
            rating: Some(5),
            comment: None,
        },
    )
    .await
    .unwrap();
    assert_eq!(game_snapshot(&state, &admin, game_id).await, (5.0, 1));

    database::delete_review(&state, &u1, r1.id).await.unwrap();
    assert_eq!(game_snapshot(&state, &admin, game_id).await, (0.0, 0));
}

#[tokio::test]
async fn rating_policy_switch_recomputes_all_games() {
    let state = common::setup().await;
    let creator = common::register(&state, "alice").await;
    let admin = common::register_admin(&state, "root").await;
    let game_id = common::approved_game(&state, &creator, &admin, "Fata Morgana").await;

    let u1 = common::register(&state, "bob").await;
    let u2 = common::register(&state, "carol").await;
    let r1 = database::submit_review(&state, &u1, review(game_id, 4)).await.unwrap();
    database::approve_review(&state, &admin, r1.id).await.unwrap();
    // u2 的评论保持待审
    database::submit_review(&state, &u2, review(game_id, 2)).await.unwrap();

    assert_eq!(game_snapshot(&state, &admin, game_id).await, (4.0, 1));

    // 切到全量口径：待审评论也计入
    database::update_settings(
        &state,
        &admin,
        dto::UpdateSettingsInput {
            rating_policy: Some(review_board::entity::enums::RatingPolicy::All),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(game_snapshot(&state, &admin, game_id).await, (3.0, 2));

    // 切回仅通过口径
    database::update_settings(
        &state,
        &admin,
        dto::UpdateSettingsInput {
            rating_policy: Some(review_board::entity::enums::RatingPolicy::ApprovedOnly),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(game_snapshot(&state, &admin, game_id).await, (4.0, 1));
}

#[tokio::test]
async fn deleting_reviewer_recomputes_their_games() {
    let state = common::setup().await;
    let creator = common::register(&state, "alice").await;
    let admin = common::register_admin(&state, "root").await;
    let game_id = common::approved_game(&state, &creator, &admin, "Steins;Gate").await;

    let u1 = common::register(&state, "bob").await;
    let r1 = database::submit_review(&state, &u1, review(game_id, 5)).await.unwrap();
    database::approve_review(&state, &admin, r1.id).await.unwrap();
    assert_eq!(game_snapshot(&state, &admin, game_id).await, (5.0, 1));

    // 删除用户后其评论级联删除，聚合字段回落
    database::delete_user(&state, &admin, u1.user_id).await.unwrap();
    assert_eq!(game_snapshot(&state, &admin, game_id).await, (0.0, 0));
}
