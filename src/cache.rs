//! 列表缓存
//!
//! 取代前端散落的模块级可变数组：一个显式的读穿缓存对象，
//! 由单一持有方（会话/应用状态）管理。失效契约只有一条：
//! **任何写操作成功后调用 `invalidate()`**。
//!
//! 缓存只是建议性的加速层，正确性永远以数据库为准。

use parking_lot::Mutex;
use sea_orm::DatabaseConnection;

use crate::database::dto::{GameFilter, GENRES};
use crate::database::repository::games_repository::GamesRepository;
use crate::entity::enums::ModerationStatus;
use crate::entity::games;
use crate::error::AppError;

#[derive(Default)]
struct CacheInner {
    genres: Option<Vec<String>>,
    approved_games: Option<Vec<games::Model>>,
}

/// 公共列表的读穿缓存
pub struct ListingCache {
    inner: Mutex<CacheInner>,
}

impl ListingCache {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(CacheInner::default()),
        }
    }

    /// 固定题材列表（首次访问后缓存）
    pub fn genres(&self) -> Vec<String> {
        let mut cache = self.inner.lock();
        cache
            .genres
            .get_or_insert_with(|| GENRES.iter().map(|g| g.to_string()).collect())
            .clone()
    }

    /// 已审核通过的游戏列表（缓存未命中时查库）
    pub async fn approved_games(
        &self,
        db: &DatabaseConnection,
    ) -> Result<Vec<games::Model>, AppError> {
        // 不跨 await 持锁
        {
            let cache = self.inner.lock();
            if let Some(games) = &cache.approved_games {
                return Ok(games.clone());
            }
        }

        let filter = GameFilter {
            status: Some(ModerationStatus::Approved),
            ..GameFilter::default()
        };
        let games = GamesRepository::find_filtered(db, &filter).await?;

        let mut cache = self.inner.lock();
        cache.approved_games = Some(games.clone());
        Ok(games)
    }

    /// 写操作后的统一失效入口
    pub fn invalidate(&self) {
        let mut cache = self.inner.lock();
        cache.approved_games = None;
    }
}

impl Default for ListingCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn genres_are_cached_and_stable() {
        let cache = ListingCache::new();
        let first = cache.genres();
        let second = cache.genres();
        assert_eq!(first, second);
        assert!(first.iter().any(|g| g == "RPG"));
    }
}
