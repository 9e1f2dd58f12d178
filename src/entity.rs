//! 数据实体模块
//!
//! 包含所有 SeaORM 实体定义和共享的字符串枚举。

pub mod prelude;

// === 共享枚举（以小写文本形式入库）===
pub mod enums;

// === SeaORM 实体（对应数据库表）===
pub mod activities;
pub mod companies;
pub mod game_tags;
pub mod games;
pub mod reviews;
pub mod settings;
pub mod tags;
pub mod users;
