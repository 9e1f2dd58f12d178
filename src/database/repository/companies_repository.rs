//! 公司数据仓库

use crate::database::dto::{NewCompanyInput, UpdateCompanyInput};
use crate::entity::companies;
use crate::entity::prelude::*;
use sea_orm::*;

/// 公司数据仓库
pub struct CompaniesRepository;

impl CompaniesRepository {
    /// 插入公司
    pub async fn insert(
        db: &DatabaseConnection,
        input: &NewCompanyInput,
    ) -> Result<companies::Model, DbErr> {
        let company = companies::ActiveModel {
            id: NotSet,
            name: Set(input.name.trim().to_string()),
            description: Set(input.description.clone()),
            founded_year: Set(input.founded_year),
            website: Set(input.website.clone()),
            logo_url: Set(input.logo_url.clone()),
            created_at: Set(chrono::Utc::now().timestamp()),
        };

        company.insert(db).await
    }

    /// 部分更新公司
    pub async fn update(
        db: &DatabaseConnection,
        company_id: i64,
        updates: &UpdateCompanyInput,
    ) -> Result<companies::Model, DbErr> {
        let company_active = companies::ActiveModel {
            id: Set(company_id),
            name: updates.name.clone().map_or(NotSet, |n| Set(n.trim().to_string())),
            description: updates.description.clone().map_or(NotSet, Set),
            founded_year: updates.founded_year.map_or(NotSet, Set),
            website: updates.website.clone().map_or(NotSet, Set),
            logo_url: updates.logo_url.clone().map_or(NotSet, Set),
            ..Default::default()
        };

        company_active.update(db).await
    }

    /// 根据 ID 查询公司
    pub async fn find_by_id(
        db: &DatabaseConnection,
        id: i64,
    ) -> Result<Option<companies::Model>, DbErr> {
        Companies::find_by_id(id).one(db).await
    }

    /// 根据名字查询（创建查重）
    pub async fn find_by_name(
        db: &DatabaseConnection,
        name: &str,
    ) -> Result<Option<companies::Model>, DbErr> {
        Companies::find()
            .filter(companies::Column::Name.eq(name))
            .one(db)
            .await
    }

    /// 公司列表（名字升序）
    pub async fn find_all(
        db: &DatabaseConnection,
        limit: u64,
        offset: u64,
    ) -> Result<Vec<companies::Model>, DbErr> {
        Companies::find()
            .order_by_asc(companies::Column::Name)
            .limit(limit)
            .offset(offset)
            .all(db)
            .await
    }

    /// 删除公司（关联游戏的 company_id 由外键置空）
    pub async fn delete(db: &DatabaseConnection, id: i64) -> Result<DeleteResult, DbErr> {
        Companies::delete_by_id(id).exec(db).await
    }

    /// 获取公司总数
    pub async fn count(db: &DatabaseConnection) -> Result<u64, DbErr> {
        Companies::find().count(db).await
    }
}
