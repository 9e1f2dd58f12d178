//! 数据传输对象 (DTO)
//!
//! 每个操作对应一个显式的请求结构体，必填/可选字段在类型上写明，
//! 校验在进入业务逻辑之前完成。部分更新使用 Option<Option<T>>
//! 区分"未提供字段"和"显式设为 null"。

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use url::Url;

use crate::entity::enums::{ModerationStatus, RatingPolicy};
use crate::entity::{games, tags};
use crate::error::AppError;

/// 固定题材列表：游戏提交时 genre 必须取自其中
pub const GENRES: &[&str] = &[
    "Action",
    "Adventure",
    "Fighting",
    "Horror",
    "Indie",
    "Platformer",
    "Puzzle",
    "RPG",
    "Racing",
    "Shooter",
    "Simulation",
    "Sports",
    "Strategy",
    "Visual Novel",
];

/// 辅助函数：支持 Option<Option<T>> 的反序列化
/// 用于区分"未提供字段"和"显式设为 null"
fn double_option<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Some(Option::deserialize(deserializer)?))
}

// ==================== 校验辅助 ====================

fn ensure_url(field: &str, value: Option<&String>) -> Result<(), AppError> {
    if let Some(s) = value {
        if Url::parse(s).is_err() {
            return Err(AppError::validation(format!("{} 不是合法的 URL", field)));
        }
    }
    Ok(())
}

fn ensure_date(field: &str, value: Option<&String>) -> Result<(), AppError> {
    if let Some(s) = value {
        if NaiveDate::parse_from_str(s, "%Y-%m-%d").is_err() {
            return Err(AppError::validation(format!(
                "{} 必须是 YYYY-MM-DD 格式",
                field
            )));
        }
    }
    Ok(())
}

fn ensure_genre(genre: &str) -> Result<(), AppError> {
    if GENRES.contains(&genre) {
        Ok(())
    } else {
        Err(AppError::validation(format!("未知的题材: {}", genre)))
    }
}

fn ensure_rating(rating: i32) -> Result<(), AppError> {
    if (1..=5).contains(&rating) {
        Ok(())
    } else {
        Err(AppError::validation("评分必须在 1-5 之间"))
    }
}

// ==================== 用户 ====================

/// 注册请求（password_hash 由外部认证层散列后传入）
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct RegisterUserInput {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub avatar_url: Option<String>,
}

impl RegisterUserInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.username.trim().is_empty() {
            return Err(AppError::validation("用户名不能为空"));
        }
        if self.username.len() > 32 {
            return Err(AppError::validation("用户名最长 32 个字符"));
        }
        if !self.email.contains('@') {
            return Err(AppError::validation("邮箱格式不正确"));
        }
        if self.password_hash.is_empty() {
            return Err(AppError::validation("密码散列不能为空"));
        }
        ensure_url("avatar_url", self.avatar_url.as_ref())
    }
}

/// 资料更新请求（本人或管理员）
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateUserInput {
    pub email: Option<String>,
    pub password_hash: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub avatar_url: Option<Option<String>>,
}

impl UpdateUserInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(email) = &self.email {
            if !email.contains('@') {
                return Err(AppError::validation("邮箱格式不正确"));
            }
        }
        if let Some(Some(url)) = &self.avatar_url {
            ensure_url("avatar_url", Some(url))?;
        }
        Ok(())
    }
}

// ==================== 游戏 ====================

/// 游戏提交请求
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewGameInput {
    pub title: String,
    pub description: Option<String>,
    pub genre: String,
    pub release_date: Option<String>,
    pub cover_url: Option<String>,
    pub company_id: Option<i64>,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl NewGameInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.title.trim().is_empty() {
            return Err(AppError::validation("游戏标题不能为空"));
        }
        ensure_genre(&self.genre)?;
        ensure_date("release_date", self.release_date.as_ref())?;
        ensure_url("cover_url", self.cover_url.as_ref())
    }
}

/// 游戏部分更新请求
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateGameInput {
    pub title: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    pub genre: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub release_date: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub cover_url: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub company_id: Option<Option<i64>>,
    /// 提供时整体替换标签集合
    pub tags: Option<Vec<String>>,
}

impl UpdateGameInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(title) = &self.title {
            if title.trim().is_empty() {
                return Err(AppError::validation("游戏标题不能为空"));
            }
        }
        if let Some(genre) = &self.genre {
            ensure_genre(genre)?;
        }
        if let Some(Some(date)) = &self.release_date {
            ensure_date("release_date", Some(date))?;
        }
        if let Some(Some(url)) = &self.cover_url {
            ensure_url("cover_url", Some(url))?;
        }
        Ok(())
    }
}

/// 游戏列表排序字段
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GameSortOption {
    Added,
    Title,
    Rating,
    Release,
}

/// 排序方向
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortOrder {
    Asc,
    Desc,
}

/// 游戏列表筛选
///
/// status 只有管理员可以自由指定；服务层对非管理员强制为 approved。
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct GameFilter {
    pub status: Option<ModerationStatus>,
    pub genre: Option<String>,
    pub company_id: Option<i64>,
    /// 标题子串匹配
    pub search: Option<String>,
    pub sort_by: GameSortOption,
    pub sort_order: SortOrder,
    pub limit: u64,
    pub offset: u64,
}

impl Default for GameFilter {
    fn default() -> Self {
        Self {
            status: None,
            genre: None,
            company_id: None,
            search: None,
            sort_by: GameSortOption::Added,
            sort_order: SortOrder::Desc,
            limit: 50,
            offset: 0,
        }
    }
}

/// 带标签的游戏详情
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GameWithTags {
    #[serde(flatten)]
    pub game: games::Model,
    pub tags: Vec<tags::Model>,
}

// ==================== 评论 ====================

/// 评论提交请求
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewReviewInput {
    pub game_id: i64,
    pub rating: i32,
    pub comment: String,
}

impl NewReviewInput {
    pub fn validate(&self) -> Result<(), AppError> {
        ensure_rating(self.rating)?;
        if self.comment.trim().is_empty() {
            return Err(AppError::validation("评论内容不能为空"));
        }
        Ok(())
    }
}

/// 评论部分更新请求
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateReviewInput {
    pub rating: Option<i32>,
    pub comment: Option<String>,
}

impl UpdateReviewInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(rating) = self.rating {
            ensure_rating(rating)?;
        }
        if let Some(comment) = &self.comment {
            if comment.trim().is_empty() {
                return Err(AppError::validation("评论内容不能为空"));
            }
        }
        Ok(())
    }
}

/// 评论列表筛选
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(default)]
pub struct ReviewFilter {
    pub game_id: Option<i64>,
    pub user_id: Option<i64>,
    pub status: Option<ModerationStatus>,
    pub limit: u64,
    pub offset: u64,
}

impl Default for ReviewFilter {
    fn default() -> Self {
        Self {
            game_id: None,
            user_id: None,
            status: None,
            limit: 50,
            offset: 0,
        }
    }
}

// ==================== 公司 ====================

/// 公司创建请求（仅管理员）
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NewCompanyInput {
    pub name: String,
    pub description: Option<String>,
    pub founded_year: Option<i32>,
    pub website: Option<String>,
    pub logo_url: Option<String>,
}

impl NewCompanyInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if self.name.trim().is_empty() {
            return Err(AppError::validation("公司名称不能为空"));
        }
        if let Some(year) = self.founded_year {
            if !(1800..=2100).contains(&year) {
                return Err(AppError::validation("成立年份不合理"));
            }
        }
        ensure_url("website", self.website.as_ref())?;
        ensure_url("logo_url", self.logo_url.as_ref())
    }
}

/// 公司部分更新请求
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateCompanyInput {
    pub name: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub founded_year: Option<Option<i32>>,
    #[serde(default, deserialize_with = "double_option")]
    pub website: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    pub logo_url: Option<Option<String>>,
}

impl UpdateCompanyInput {
    pub fn validate(&self) -> Result<(), AppError> {
        if let Some(name) = &self.name {
            if name.trim().is_empty() {
                return Err(AppError::validation("公司名称不能为空"));
            }
        }
        if let Some(Some(year)) = self.founded_year {
            if !(1800..=2100).contains(&year) {
                return Err(AppError::validation("成立年份不合理"));
            }
        }
        if let Some(Some(url)) = &self.website {
            ensure_url("website", Some(url))?;
        }
        if let Some(Some(url)) = &self.logo_url {
            ensure_url("logo_url", Some(url))?;
        }
        Ok(())
    }
}

// ==================== 设置与批量操作 ====================

/// 运行配置更新请求（仅管理员）
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct UpdateSettingsInput {
    pub auto_approve_games: Option<bool>,
    pub auto_approve_reviews: Option<bool>,
    pub rating_policy: Option<RatingPolicy>,
}

/// 批量审核中单个 ID 的失败记录
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BatchFailure {
    pub id: i64,
    pub error: String,
    pub message: String,
}

/// 批量审核结果：逐个 ID 独立执行，互不回滚
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BatchResult {
    pub succeeded: Vec<i64>,
    pub failed: Vec<BatchFailure>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn review(rating: i32, comment: &str) -> NewReviewInput {
        NewReviewInput {
            game_id: 1,
            rating,
            comment: comment.to_string(),
        }
    }

    #[test]
    fn review_rating_bounds() {
        assert!(review(1, "好玩").validate().is_ok());
        assert!(review(5, "好玩").validate().is_ok());
        assert_eq!(review(0, "好玩").validate().unwrap_err().kind(), "validation");
        assert_eq!(review(6, "好玩").validate().unwrap_err().kind(), "validation");
    }

    #[test]
    fn review_comment_floor_is_one_char() {
        assert!(review(3, "好").validate().is_ok());
        assert!(review(3, "   ").validate().is_err());
        assert!(review(3, "").validate().is_err());
    }

    #[test]
    fn game_requires_known_genre() {
        let mut input = NewGameInput {
            title: "Clannad".to_string(),
            description: None,
            genre: "Visual Novel".to_string(),
            release_date: Some("2004-04-28".to_string()),
            cover_url: None,
            company_id: None,
            tags: vec![],
        };
        assert!(input.validate().is_ok());

        input.genre = "Galge".to_string();
        assert!(input.validate().is_err());

        input.genre = "RPG".to_string();
        input.release_date = Some("04/28/2004".to_string());
        assert!(input.validate().is_err());
    }

    #[test]
    fn urls_are_checked_when_present() {
        let input = NewCompanyInput {
            name: "Key".to_string(),
            description: None,
            founded_year: Some(1998),
            website: Some("not a url".to_string()),
            logo_url: None,
        };
        assert_eq!(input.validate().unwrap_err().kind(), "validation");
    }

    #[test]
    fn partial_update_distinguishes_missing_from_null() {
        // 未提供字段
        let input: UpdateGameInput = serde_json::from_str(r#"{"title": "New"}"#).unwrap();
        assert!(input.description.is_none());

        // 显式置空
        let input: UpdateGameInput = serde_json::from_str(r#"{"description": null}"#).unwrap();
        assert_eq!(input.description, Some(None));
    }
}
