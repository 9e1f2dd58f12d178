//! 目录维护：用户资料、公司、标签与游戏更新

mod common;

use review_board::database::{self, dto};

#[tokio::test]
async fn registration_rejects_duplicates() {
    let state = common::setup().await;
    common::register(&state, "alice").await;

    let err = database::register_user(
        &state,
        dto::RegisterUserInput {
            username: "alice".to_string(),
            email: "other@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            avatar_url: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), "conflict");

    let err = database::register_user(
        &state,
        dto::RegisterUserInput {
            username: "alice2".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$stub".to_string(),
            avatar_url: None,
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), "conflict");
}

#[tokio::test]
async fn profile_update_is_owner_or_admin_only() {
    let state = common::setup().await;
    let alice = common::register(&state, "alice").await;
    let bob = common::register(&state, "bob").await;
    let admin = common::register_admin(&state, "root").await;

    let err = database::update_profile(
        &state,
        &bob,
        alice.user_id,
        dto::UpdateUserInput {
            email: Some("hijack@example.com".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap_err();
    assert_eq!(err.kind(), "forbidden");

    let updated = database::update_profile(
        &state,
        &admin,
        alice.user_id,
        dto::UpdateUserInput {
            email: Some("alice+new@example.com".to_string()),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert_eq!(updated.email, "alice+new@example.com");
}

#[tokio::test]
async fn companies_are_admin_managed_and_publicly_listed() {
    let state = common::setup().await;
    let user = common::register(&state, "alice").await;
    let admin = common::register_admin(&state, "root").await;

    let input = dto::NewCompanyInput {
        name: "Falcom".to_string(),
        description: None,
        founded_year: Some(1981),
        website: Some("https://www.falcom.co.jp".to_string()),
        logo_url: None,
    };

    let err = database::create_company(&state, &user, input.clone())
        .await
        .unwrap_err();
    assert_eq!(err.kind(), "forbidden");

    let company = database::create_company(&state, &admin, input.clone())
        .await
        .unwrap();
    let err = database::create_company(&state, &admin, input).await.unwrap_err();
    assert_eq!(err.kind(), "conflict");

    let listed = database::list_companies(&state, 50, 0).await.unwrap();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].id, company.id);
}

#[tokio::test]
async fn game_update_replaces_tags_as_a_set() {
    let state = common::setup().await;
    let creator = common::register(&state, "alice").await;
    let admin = common::register_admin(&state, "root").await;

    let mut input = common::game_input("Gurumin");
    input.tags = vec!["action".to_string(), "cute".to_string()];
    let game = database::submit_game(&state, &creator, input).await.unwrap();
    let names: Vec<&str> = game.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["action", "cute"]);

    // 整体替换：保留 action、去掉 cute、新增 3d（重复与空白被忽略）
    let updated = database::update_game(
        &state,
        &admin,
        game.game.id,
        dto::UpdateGameInput {
            tags: Some(vec![
                "action".to_string(),
                "3d".to_string(),
                " 3d ".to_string(),
                "  ".to_string(),
            ]),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let names: Vec<&str> = updated.tags.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["3d", "action"]);

    // 标签表全局去重，cute 仍在全局列表里
    let all = database::list_tags(&state).await.unwrap();
    let names: Vec<&str> = all.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["3d", "action", "cute"]);
}

#[tokio::test]
async fn game_listing_filters_and_searches() {
    let state = common::setup().await;
    let creator = common::register(&state, "alice").await;
    let admin = common::register_admin(&state, "root").await;

    common::approved_game(&state, &creator, &admin, "Trails in the Sky").await;
    common::approved_game(&state, &creator, &admin, "Trails of Cold Steel").await;
    common::approved_game(&state, &creator, &admin, "Ys Origin").await;

    let found = database::list_games(
        &state,
        None,
        dto::GameFilter {
            search: Some("Trails".to_string()),
            sort_by: dto::GameSortOption::Title,
            sort_order: dto::SortOrder::Asc,
            ..Default::default()
        },
    )
    .await
    .unwrap();
    let titles: Vec<&str> = found.iter().map(|g| g.title.as_str()).collect();
    assert_eq!(titles, vec!["Trails in the Sky", "Trails of Cold Steel"]);
}

#[tokio::test]
async fn non_admin_status_filter_is_overridden() {
    let state = common::setup().await;
    let creator = common::register(&state, "alice").await;
    common::register_admin(&state, "root").await;

    database::submit_game(&state, &creator, common::game_input("Draft"))
        .await
        .unwrap();

    // 普通用户即使显式请求 pending 也只能看到 approved
    let listed = database::list_games(
        &state,
        Some(&creator),
        dto::GameFilter {
            status: Some(review_board::entity::enums::ModerationStatus::Pending),
            ..Default::default()
        },
    )
    .await
    .unwrap();
    assert!(listed.is_empty());
}
