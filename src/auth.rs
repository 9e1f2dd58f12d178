//! 认证上下文
//!
//! 令牌的签发与校验由外部认证层负责，本层只消费解析完成的
//! `{user_id, role}`，并在此基础上做角色与属主检查。

use sea_orm::DatabaseConnection;
use sea_orm::EntityTrait;
use serde::{Deserialize, Serialize};

use crate::entity::enums::UserRole;
use crate::entity::prelude::*;
use crate::error::AppError;

/// 已解析的调用者身份
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AuthContext {
    pub user_id: i64,
    pub role: UserRole,
}

impl AuthContext {
    pub fn new(user_id: i64, role: UserRole) -> Self {
        Self { user_id, role }
    }

    /// 按用户 ID 从数据库加载角色，组装上下文
    ///
    /// 用户不存在视为凭证失效（Unauthenticated），而不是 404。
    pub async fn load(db: &DatabaseConnection, user_id: i64) -> Result<Self, AppError> {
        let user = Users::find_by_id(user_id)
            .one(db)
            .await?
            .ok_or_else(|| AppError::Unauthenticated("凭证对应的用户不存在".to_string()))?;

        Ok(Self::new(user.id, user.role))
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// 要求管理员角色，否则 Forbidden
    pub fn ensure_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("需要管理员权限"))
        }
    }

    /// 要求调用者是资源属主或管理员，否则 Forbidden
    pub fn ensure_self_or_admin(&self, owner_id: i64) -> Result<(), AppError> {
        if self.user_id == owner_id || self.is_admin() {
            Ok(())
        } else {
            Err(AppError::forbidden("只有本人或管理员可以执行该操作"))
        }
    }
}
