//! 标签数据仓库
//!
//! 标签按名字全局去重，游戏与标签的关联走 game_tags 连接表。
//! 整体替换采用差量更新：只插入新增、删除移除，未变动的关联不动。

use crate::entity::prelude::*;
use crate::entity::{game_tags, tags};
use sea_orm::*;
use std::collections::HashSet;

/// 标签数据仓库
pub struct TagsRepository;

impl TagsRepository {
    /// 全部标签（名字升序）
    pub async fn find_all(db: &DatabaseConnection) -> Result<Vec<tags::Model>, DbErr> {
        Tags::find().order_by_asc(tags::Column::Name).all(db).await
    }

    /// 按名字查找，不存在则创建
    pub async fn find_or_create<C: ConnectionTrait>(
        conn: &C,
        name: &str,
    ) -> Result<tags::Model, DbErr> {
        let name = name.trim();

        if let Some(existing) = Tags::find()
            .filter(tags::Column::Name.eq(name))
            .one(conn)
            .await?
        {
            return Ok(existing);
        }

        let tag = tags::ActiveModel {
            id: NotSet,
            name: Set(name.to_string()),
        };
        tag.insert(conn).await
    }

    /// 某游戏的标签列表（名字升序）
    pub async fn tags_for_game(
        db: &DatabaseConnection,
        game_id: i64,
    ) -> Result<Vec<tags::Model>, DbErr> {
        Tags::find()
            .inner_join(GameTags)
            .filter(game_tags::Column::GameId.eq(game_id))
            .order_by_asc(tags::Column::Name)
            .all(db)
            .await
    }

    /// 整体替换某游戏的标签集合
    ///
    /// 空列表表示清空。在事务内差量更新关联表，返回替换后的标签列表。
    pub async fn set_game_tags(
        db: &DatabaseConnection,
        game_id: i64,
        names: &[String],
    ) -> Result<Vec<tags::Model>, DbErr> {
        let txn = db.begin().await?;

        // 目标标签 ID 集合（忽略空白与重复名字）
        let mut desired: Vec<i64> = Vec::new();
        let mut seen: HashSet<String> = HashSet::new();
        for name in names {
            let trimmed = name.trim();
            if trimmed.is_empty() || !seen.insert(trimmed.to_lowercase()) {
                continue;
            }
            let tag = Self::find_or_create(&txn, trimmed).await?;
            desired.push(tag.id);
        }
        let desired_set: HashSet<i64> = desired.iter().copied().collect();

        // 现有关联
        let current: Vec<game_tags::Model> = GameTags::find()
            .filter(game_tags::Column::GameId.eq(game_id))
            .all(&txn)
            .await?;
        let current_set: HashSet<i64> = current.iter().map(|link| link.tag_id).collect();

        // 删除不再需要的关联
        let to_remove: Vec<i64> = current_set.difference(&desired_set).copied().collect();
        if !to_remove.is_empty() {
            GameTags::delete_many()
                .filter(
                    game_tags::Column::GameId
                        .eq(game_id)
                        .and(game_tags::Column::TagId.is_in(to_remove)),
                )
                .exec(&txn)
                .await?;
        }

        // 插入新增的关联
        for tag_id in desired_set.difference(&current_set) {
            let link = game_tags::ActiveModel {
                id: NotSet,
                game_id: Set(game_id),
                tag_id: Set(*tag_id),
            };
            link.insert(&txn).await?;
        }

        txn.commit().await?;

        Self::tags_for_game(db, game_id).await
    }
}
