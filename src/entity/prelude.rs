//! 预导入模块
//!
//! 提供常用类型的快捷导入。

// === SeaORM 实体 ===
pub use super::activities::Entity as Activities;
pub use super::companies::Entity as Companies;
pub use super::game_tags::Entity as GameTags;
pub use super::games::Entity as Games;
pub use super::reviews::Entity as Reviews;
pub use super::settings::Entity as Settings;
pub use super::tags::Entity as Tags;
pub use super::users::Entity as Users;

// === 共享枚举 ===
pub use super::enums::{ActivityKind, ModerationStatus, RatingPolicy, UserRole};
