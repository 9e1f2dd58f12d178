//! 集成测试公共脚手架：内存数据库 + 常用账号与数据的构造

use migration::{Migrator, MigratorTrait};
use review_board::database::connection::establish_connection_with_url;
use review_board::database::dto::{NewGameInput, RegisterUserInput};
use review_board::database::repository::users_repository::UsersRepository;
use review_board::database::{self, AppState};
use review_board::entity::enums::UserRole;
use review_board::AuthContext;

/// 全新的内存数据库，跑完整迁移
pub async fn setup() -> AppState {
    let db = establish_connection_with_url("sqlite::memory:")
        .await
        .expect("connect in-memory sqlite");
    Migrator::up(&db, None).await.expect("run migrations");
    AppState::new(db)
}

/// 注册一个普通用户并返回其上下文
pub async fn register(state: &AppState, name: &str) -> AuthContext {
    let user = database::register_user(
        state,
        RegisterUserInput {
            username: name.to_string(),
            email: format!("{}@example.com", name),
            password_hash: "$argon2id$stub".to_string(),
            avatar_url: None,
        },
    )
    .await
    .expect("register user");

    AuthContext::new(user.id, user.role)
}

/// 注册并提升为管理员
pub async fn register_admin(state: &AppState, name: &str) -> AuthContext {
    let ctx = register(state, name).await;
    let user = UsersRepository::set_role(&state.db, ctx.user_id, UserRole::Admin)
        .await
        .expect("promote to admin");
    AuthContext::new(user.id, user.role)
}

pub fn game_input(title: &str) -> NewGameInput {
    NewGameInput {
        title: title.to_string(),
        description: None,
        genre: "RPG".to_string(),
        release_date: Some("2020-06-01".to_string()),
        cover_url: None,
        company_id: None,
        tags: vec![],
    }
}

/// 提交并由管理员直接审核通过一个游戏，返回其 ID
pub async fn approved_game(
    state: &AppState,
    creator: &AuthContext,
    admin: &AuthContext,
    title: &str,
) -> i64 {
    let game = database::submit_game(state, creator, game_input(title))
        .await
        .expect("submit game");
    database::approve_game(state, admin, game.game.id)
        .await
        .expect("approve game");
    game.game.id
}
