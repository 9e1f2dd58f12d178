//! 游戏评论板后端核心库
//!
//! 分层与职责：
//! - `entity`：SeaORM 实体与枚举，对应数据库表结构；
//! - `database::repository`：纯数据存取，按表划分仓库；
//! - `database::service`：对外操作入口，权限、校验与编排；
//! - `auth`：已解析凭证的角色与属主检查；
//! - `cache`：公开列表的读穿缓存；
//! - `error`：统一错误类型及其 HTTP 映射。
//!
//! HTTP 路由与令牌签发由上层服务负责，本库不含网络栈。

pub mod auth;
pub mod cache;
pub mod database;
pub mod entity;
pub mod error;

pub use auth::AuthContext;
pub use database::AppState;
pub use error::AppError;
