//! 用户数据仓库

use crate::database::dto::{RegisterUserInput, UpdateUserInput};
use crate::entity::enums::UserRole;
use crate::entity::prelude::*;
use crate::entity::users;
use sea_orm::*;

/// 用户数据仓库
pub struct UsersRepository;

impl UsersRepository {
    /// 插入用户（角色固定为 user，管理员通过 set_role 提升）
    pub async fn insert(
        db: &DatabaseConnection,
        input: &RegisterUserInput,
    ) -> Result<users::Model, DbErr> {
        let now = chrono::Utc::now().timestamp();

        let user = users::ActiveModel {
            id: NotSet,
            username: Set(input.username.trim().to_string()),
            email: Set(input.email.trim().to_string()),
            password_hash: Set(input.password_hash.clone()),
            role: Set(UserRole::User),
            avatar_url: Set(input.avatar_url.clone()),
            created_at: Set(now),
        };

        user.insert(db).await
    }

    /// 根据 ID 查询用户
    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i64,
    ) -> Result<Option<users::Model>, DbErr> {
        Users::find_by_id(id).one(db).await
    }

    /// 根据用户名查询（注册查重）
    pub async fn find_by_username(
        db: &DatabaseConnection,
        username: &str,
    ) -> Result<Option<users::Model>, DbErr> {
        Users::find()
            .filter(users::Column::Username.eq(username))
            .one(db)
            .await
    }

    /// 根据邮箱查询（注册查重）
    pub async fn find_by_email(
        db: &DatabaseConnection,
        email: &str,
    ) -> Result<Option<users::Model>, DbErr> {
        Users::find()
            .filter(users::Column::Email.eq(email))
            .one(db)
            .await
    }

    /// 用户列表（注册时间倒序）
    pub async fn find_all(
        db: &DatabaseConnection,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<users::Model>, DbErr> {
        Users::find()
            .order_by_desc(users::Column::CreatedAt)
            .order_by_desc(users::Column::Id)
            .limit(limit)
            .offset(offset)
            .all(db)
            .await
    }

    /// 部分更新用户资料
    pub async fn update(
        db: &DatabaseConnection,
        user_id: i64,
        updates: &UpdateUserInput,
    ) -> Result<users::Model, DbErr> {
        let user_active = users::ActiveModel {
            id: Set(user_id),
            email: updates.email.clone().map_or(NotSet, Set),
            password_hash: updates.password_hash.clone().map_or(NotSet, Set),
            avatar_url: updates.avatar_url.clone().map_or(NotSet, Set),
            ..Default::default()
        };

        user_active.update(db).await
    }

    /// 修改用户角色
    pub async fn set_role(
        db: &DatabaseConnection,
        user_id: i64,
        role: UserRole,
    ) -> Result<users::Model, DbErr> {
        let user = Users::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or(DbErr::RecordNotFound("User not found".to_string()))?;

        let mut active: users::ActiveModel = user.into();
        active.role = Set(role);

        active.update(db).await
    }

    /// 删除用户（评论与其提交的游戏由外键级联删除）
    pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<DeleteResult, DbErr> {
        Users::delete_by_id(id).exec(db).await
    }

    /// 获取用户总数
    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Users::find().count(db).await
    }
}
