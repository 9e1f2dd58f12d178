//! 跨实体共享的字符串枚举
//!
//! 全部以小写文本入库，序列化形式与数据库存储一致。

use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

/// 审核状态：内容创建后为 pending，管理员可切换到任意状态
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    #[sea_orm(string_value = "pending")]
    Pending,
    #[sea_orm(string_value = "approved")]
    Approved,
    #[sea_orm(string_value = "rejected")]
    Rejected,
}

/// 用户角色
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[sea_orm(string_value = "user")]
    User,
    #[sea_orm(string_value = "admin")]
    Admin,
}

/// 动态类型（仪表盘最近动态）
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    #[sea_orm(string_value = "game_added")]
    GameAdded,
    #[sea_orm(string_value = "review_added")]
    ReviewAdded,
    #[sea_orm(string_value = "user_registered")]
    UserRegistered,
}

/// 评分聚合口径
///
/// approved_only：只统计已通过审核的评论（默认，更严格）
/// all：统计全部评论，不看审核状态
#[derive(Debug, Copy, Clone, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::None)")]
#[serde(rename_all = "snake_case")]
pub enum RatingPolicy {
    #[sea_orm(string_value = "approved_only")]
    ApprovedOnly,
    #[sea_orm(string_value = "all")]
    All,
}
