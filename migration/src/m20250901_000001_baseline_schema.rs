//! 基线迁移：评论板数据库结构
//!
//! 一次性建表：users / companies / games / reviews / tags / game_tags /
//! activities / settings，以及常用查询索引。
//!
//! 约定：
//! - 时间戳统一为 unix 秒（INTEGER）
//! - 审核状态与角色以小写文本存储（pending/approved/rejected, user/admin）
//! - 评分聚合字段（average_rating/review_count）由应用层重算，带默认值

use sea_orm::{ConnectionTrait, DatabaseBackend, Statement};
use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_orm::TransactionTrait;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        // 开启事务，保证所有建表操作的原子性
        let txn = conn.begin().await?;

        create_schema(&txn).await?;
        create_indexes(&txn).await?;

        txn.commit().await?;

        log::info!("[MIGRATION] baseline review board schema created");
        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        let conn = manager.get_connection();

        // 依赖表先删
        for table in [
            "game_tags",
            "reviews",
            "activities",
            "games",
            "tags",
            "companies",
            "settings",
            "users",
        ] {
            conn.execute(Statement::from_string(
                DatabaseBackend::Sqlite,
                format!(r#"DROP TABLE IF EXISTS "{}""#, table),
            ))
            .await?;
        }
        Ok(())
    }
}

/// 创建全部数据表
async fn create_schema<C>(conn: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    // 1. 用户表
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "users" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "username" TEXT NOT NULL UNIQUE,
            "email" TEXT NOT NULL UNIQUE,
            "password_hash" TEXT NOT NULL,
            "role" TEXT NOT NULL DEFAULT 'user',
            "avatar_url" TEXT,
            "created_at" INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        )"#,
    ))
    .await?;

    // 2. 公司表
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "companies" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "name" TEXT NOT NULL,
            "description" TEXT,
            "founded_year" INTEGER,
            "website" TEXT,
            "logo_url" TEXT,
            "created_at" INTEGER NOT NULL DEFAULT (strftime('%s', 'now'))
        )"#,
    ))
    .await?;

    // 3. 游戏表（含派生的评分聚合字段）
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "games" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "title" TEXT NOT NULL,
            "description" TEXT,
            "genre" TEXT,
            "release_date" TEXT,
            "cover_url" TEXT,
            "status" TEXT NOT NULL DEFAULT 'pending',
            "average_rating" REAL NOT NULL DEFAULT 0,
            "review_count" INTEGER NOT NULL DEFAULT 0,
            "company_id" INTEGER,
            "created_by" INTEGER NOT NULL,
            "created_at" INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
            "updated_at" INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
            FOREIGN KEY("company_id") REFERENCES "companies"("id") ON DELETE SET NULL,
            FOREIGN KEY("created_by") REFERENCES "users"("id") ON DELETE CASCADE
        )"#,
    ))
    .await?;

    // 4. 评论表：同一用户对同一游戏只允许一条评论
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "reviews" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "game_id" INTEGER NOT NULL,
            "user_id" INTEGER NOT NULL,
            "rating" INTEGER NOT NULL,
            "comment" TEXT NOT NULL,
            "status" TEXT NOT NULL DEFAULT 'pending',
            "created_at" INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
            "updated_at" INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
            FOREIGN KEY("game_id") REFERENCES "games"("id") ON DELETE CASCADE,
            FOREIGN KEY("user_id") REFERENCES "users"("id") ON DELETE CASCADE,
            UNIQUE("game_id", "user_id")
        )"#,
    ))
    .await?;

    // 5. 标签表与游戏-标签关联表
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "tags" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "name" TEXT NOT NULL UNIQUE
        )"#,
    ))
    .await?;

    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "game_tags" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "game_id" INTEGER NOT NULL,
            "tag_id" INTEGER NOT NULL,
            FOREIGN KEY("game_id") REFERENCES "games"("id") ON DELETE CASCADE,
            FOREIGN KEY("tag_id") REFERENCES "tags"("id") ON DELETE CASCADE,
            UNIQUE("game_id", "tag_id")
        )"#,
    ))
    .await?;

    // 6. 动态记录表（仪表盘最近动态，只写不改）
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "activities" (
            "id" INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
            "kind" TEXT NOT NULL,
            "title" TEXT NOT NULL,
            "user_id" INTEGER,
            "created_at" INTEGER NOT NULL DEFAULT (strftime('%s', 'now')),
            FOREIGN KEY("user_id") REFERENCES "users"("id") ON DELETE SET NULL
        )"#,
    ))
    .await?;

    // 7. 设置表（ID 固定为 1 的单行配置）
    conn.execute(Statement::from_string(
        DatabaseBackend::Sqlite,
        r#"CREATE TABLE "settings" (
            "id" INTEGER PRIMARY KEY,
            "auto_approve_games" INTEGER NOT NULL DEFAULT 0,
            "auto_approve_reviews" INTEGER NOT NULL DEFAULT 0,
            "rating_policy" TEXT NOT NULL DEFAULT 'approved_only'
        )"#,
    ))
    .await?;

    Ok(())
}

/// 创建常用查询索引
async fn create_indexes<C>(conn: &C) -> Result<(), DbErr>
where
    C: ConnectionTrait,
{
    let indexes = [
        // games 表索引
        ("idx_games_status", "games", "status"),
        ("idx_games_genre", "games", "genre"),
        ("idx_games_company_id", "games", "company_id"),
        ("idx_games_created_by", "games", "created_by"),
        ("idx_games_created_at", "games", "created_at"),
        // reviews 表索引
        ("idx_reviews_game_id", "reviews", "game_id"),
        ("idx_reviews_user_id", "reviews", "user_id"),
        ("idx_reviews_status", "reviews", "status"),
        ("idx_reviews_created_at", "reviews", "created_at"),
        // 关联与动态表索引
        ("idx_game_tags_game_id", "game_tags", "game_id"),
        ("idx_game_tags_tag_id", "game_tags", "tag_id"),
        ("idx_activities_created_at", "activities", "created_at"),
        ("idx_users_created_at", "users", "created_at"),
    ];

    for (index_name, table_name, column_name) in &indexes {
        conn.execute(Statement::from_string(
            DatabaseBackend::Sqlite,
            format!(
                r#"CREATE INDEX IF NOT EXISTS "{}" ON "{}" ("{}")"#,
                index_name, table_name, column_name
            ),
        ))
        .await?;
    }

    Ok(())
}
