//! 业务服务层
//!
//! 所有对外操作的入口：权限检查、输入校验、跨仓库编排都在这一层完成。
//! 仓库层只管数据存取，HTTP 路由层只管把请求翻译成这里的调用。
//!
//! 约定：
//! - 需要登录的操作接收 `&AuthContext`，公开读取接收 `Option<&AuthContext>`；
//! - 管理员专属操作先做角色检查再查数据，避免用 404/403 差异泄露资源是否存在；
//! - 任何会影响公开列表的写操作成功后使缓存失效。

use sea_orm::{DatabaseConnection, DbErr, SqlErr};

use crate::auth::AuthContext;
use crate::cache::ListingCache;
use crate::database::dto::{
    BatchFailure, BatchResult, GameFilter, GameWithTags, NewCompanyInput, NewGameInput,
    NewReviewInput, RegisterUserInput, ReviewFilter, UpdateCompanyInput, UpdateGameInput,
    UpdateReviewInput, UpdateSettingsInput, UpdateUserInput,
};
use crate::database::repository::{
    activities_repository::ActivitiesRepository,
    companies_repository::CompaniesRepository,
    games_repository::GamesRepository,
    reviews_repository::ReviewsRepository,
    settings_repository::SettingsRepository,
    stats_repository::{
        DashboardSummary, GenreCount, RatingBucket, StatsEntity, StatsRange, StatsRepository,
        TimeBucket,
    },
    tags_repository::TagsRepository,
    users_repository::UsersRepository,
};
use crate::entity::enums::{ActivityKind, ModerationStatus, UserRole};
use crate::entity::{companies, games, reviews, settings, tags, users};
use crate::error::AppError;

/// 应用状态：连接与缓存的单一持有方
pub struct AppState {
    pub db: DatabaseConnection,
    pub cache: ListingCache,
}

impl AppState {
    pub fn new(db: DatabaseConnection) -> Self {
        Self {
            db,
            cache: ListingCache::new(),
        }
    }
}

/// 行不存在的 DbErr 映射为 404，其余照旧走 500
fn map_missing(err: DbErr, msg: &str) -> AppError {
    match err {
        DbErr::RecordNotFound(_) => AppError::not_found(msg),
        other => AppError::Database(other),
    }
}

/// 写入动态失败只记日志，不影响主流程
async fn record_activity(db: &DatabaseConnection, kind: ActivityKind, title: String, user_id: i64) {
    if let Err(e) = ActivitiesRepository::record(db, kind, &title, Some(user_id)).await {
        log::warn!("记录动态失败: {}", e);
    }
}

// ==================== 用户 ====================

/// 注册用户
pub async fn register_user(
    state: &AppState,
    input: RegisterUserInput,
) -> Result<users::Model, AppError> {
    input.validate()?;

    let username = input.username.trim();
    if UsersRepository::find_by_username(&state.db, username)
        .await?
        .is_some()
    {
        return Err(AppError::conflict("用户名已被使用"));
    }
    if UsersRepository::find_by_email(&state.db, input.email.trim())
        .await?
        .is_some()
    {
        return Err(AppError::conflict("邮箱已被注册"));
    }

    let user = UsersRepository::insert(&state.db, &input).await?;
    record_activity(
        &state.db,
        ActivityKind::UserRegistered,
        format!("新用户 {} 注册", user.username),
        user.id,
    )
    .await;

    Ok(user)
}

/// 查询用户资料
pub async fn get_user(state: &AppState, user_id: i64) -> Result<users::Model, AppError> {
    UsersRepository::find_by_id(&state.db, user_id)
        .await?
        .ok_or_else(|| AppError::not_found("用户不存在"))
}

/// 用户列表（仅管理员）
pub async fn list_users(
    state: &AppState,
    ctx: &AuthContext,
    limit: u64,
    offset: u64,
) -> Result<Vec<users::Model>, AppError> {
    ctx.ensure_admin()?;
    Ok(UsersRepository::find_all(&state.db, limit, offset).await?)
}

/// 更新资料（本人或管理员）
pub async fn update_profile(
    state: &AppState,
    ctx: &AuthContext,
    user_id: i64,
    updates: UpdateUserInput,
) -> Result<users::Model, AppError> {
    ctx.ensure_self_or_admin(user_id)?;
    updates.validate()?;

    if let Some(email) = &updates.email {
        if let Some(existing) = UsersRepository::find_by_email(&state.db, email.trim()).await? {
            if existing.id != user_id {
                return Err(AppError::conflict("邮箱已被注册"));
            }
        }
    }

    UsersRepository::update(&state.db, user_id, &updates)
        .await
        .map_err(|e| map_missing(e, "用户不存在"))
}

/// 修改用户角色（仅管理员）
pub async fn set_user_role(
    state: &AppState,
    ctx: &AuthContext,
    user_id: i64,
    role: UserRole,
) -> Result<users::Model, AppError> {
    ctx.ensure_admin()?;

    UsersRepository::set_role(&state.db, user_id, role)
        .await
        .map_err(|e| map_missing(e, "用户不存在"))
}

/// 删除用户（本人或管理员）
///
/// 其评论与其提交的游戏被级联删除后，评论过的游戏需要重算评分。
pub async fn delete_user(state: &AppState, ctx: &AuthContext, user_id: i64) -> Result<(), AppError> {
    ctx.ensure_self_or_admin(user_id)?;

    if UsersRepository::find_by_id(&state.db, user_id)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("用户不存在"));
    }

    let mut affected = ReviewsRepository::game_ids_reviewed_by(&state.db, user_id).await?;
    affected.sort_unstable();
    affected.dedup();

    UsersRepository::delete(&state.db, user_id).await?;
    state.cache.invalidate();

    // 被级联删除的游戏在重算时已不存在，refresh 内部会跳过
    for game_id in affected {
        refresh_game_rating(state, game_id).await;
    }

    Ok(())
}

// ==================== 游戏 ====================

async fn attach_tags(db: &DatabaseConnection, game: games::Model) -> Result<GameWithTags, DbErr> {
    let tags = TagsRepository::tags_for_game(db, game.id).await?;
    Ok(GameWithTags { game, tags })
}

async fn ensure_company_exists(db: &DatabaseConnection, company_id: i64) -> Result<(), AppError> {
    if CompaniesRepository::find_by_id(db, company_id)
        .await?
        .is_none()
    {
        return Err(AppError::validation("指定的公司不存在"));
    }
    Ok(())
}

/// 提交游戏
///
/// 初始状态由 auto_approve_games 决定：开启则直接 approved，否则 pending 待审。
pub async fn submit_game(
    state: &AppState,
    ctx: &AuthContext,
    input: NewGameInput,
) -> Result<GameWithTags, AppError> {
    input.validate()?;
    if let Some(company_id) = input.company_id {
        ensure_company_exists(&state.db, company_id).await?;
    }

    let settings = SettingsRepository::get(&state.db).await?;
    let status = if settings.auto_approve_games != 0 {
        ModerationStatus::Approved
    } else {
        ModerationStatus::Pending
    };

    let game = GamesRepository::insert(&state.db, &input, ctx.user_id, status).await?;
    let tags = if input.tags.is_empty() {
        Vec::new()
    } else {
        TagsRepository::set_game_tags(&state.db, game.id, &input.tags).await?
    };

    record_activity(
        &state.db,
        ActivityKind::GameAdded,
        format!("新游戏 {} 提交", game.title),
        ctx.user_id,
    )
    .await;
    state.cache.invalidate();

    Ok(GameWithTags { game, tags })
}

/// 查询游戏详情
///
/// 未通过审核的游戏只有提交者与管理员可见，其余调用者得到 404 而非 403，
/// 不暴露该 ID 是否存在。
pub async fn get_game(
    state: &AppState,
    ctx: Option<&AuthContext>,
    game_id: i64,
) -> Result<GameWithTags, AppError> {
    let game = GamesRepository::find_by_id(&state.db, game_id)
        .await?
        .ok_or_else(|| AppError::not_found("游戏不存在"))?;

    if game.status != ModerationStatus::Approved {
        let visible = ctx.is_some_and(|c| c.is_admin() || c.user_id == game.created_by);
        if !visible {
            return Err(AppError::not_found("游戏不存在"));
        }
    }

    Ok(attach_tags(&state.db, game).await?)
}

/// 游戏列表
///
/// 非管理员无论请求什么 status 都强制为 approved。
pub async fn list_games(
    state: &AppState,
    ctx: Option<&AuthContext>,
    mut filter: GameFilter,
) -> Result<Vec<games::Model>, AppError> {
    if !ctx.is_some_and(|c| c.is_admin()) {
        filter.status = Some(ModerationStatus::Approved);
    }
    Ok(GamesRepository::find_filtered(&state.db, &filter).await?)
}

/// 已审核通过的游戏列表（走缓存的公开浏览入口）
pub async fn browse_approved_games(state: &AppState) -> Result<Vec<games::Model>, AppError> {
    state.cache.approved_games(&state.db).await
}

/// 固定题材列表
pub fn list_genres(state: &AppState) -> Vec<String> {
    state.cache.genres()
}

/// 更新游戏（提交者或管理员）
pub async fn update_game(
    state: &AppState,
    ctx: &AuthContext,
    game_id: i64,
    updates: UpdateGameInput,
) -> Result<GameWithTags, AppError> {
    updates.validate()?;

    let game = GamesRepository::find_by_id(&state.db, game_id)
        .await?
        .ok_or_else(|| AppError::not_found("游戏不存在"))?;
    ctx.ensure_self_or_admin(game.created_by)?;

    if let Some(Some(company_id)) = updates.company_id {
        ensure_company_exists(&state.db, company_id).await?;
    }

    let game = GamesRepository::update(&state.db, game_id, &updates)
        .await
        .map_err(|e| map_missing(e, "游戏不存在"))?;

    let tags = match &updates.tags {
        Some(names) => TagsRepository::set_game_tags(&state.db, game_id, names).await?,
        None => TagsRepository::tags_for_game(&state.db, game_id).await?,
    };

    state.cache.invalidate();
    Ok(GameWithTags { game, tags })
}

/// 删除游戏（仅管理员，提交者撤回走驳回流程）
pub async fn delete_game(state: &AppState, ctx: &AuthContext, game_id: i64) -> Result<(), AppError> {
    ctx.ensure_admin()?;

    if GamesRepository::find_by_id(&state.db, game_id)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("游戏不存在"));
    }

    GamesRepository::delete(&state.db, game_id).await?;
    state.cache.invalidate();
    Ok(())
}

// ==================== 游戏审核 ====================

async fn set_game_status(
    state: &AppState,
    ctx: &AuthContext,
    game_id: i64,
    status: ModerationStatus,
) -> Result<games::Model, AppError> {
    // 先查角色再查数据
    ctx.ensure_admin()?;

    let game = GamesRepository::set_status(&state.db, game_id, status)
        .await
        .map_err(|e| map_missing(e, "游戏不存在"))?;
    state.cache.invalidate();
    Ok(game)
}

/// 审核通过游戏（仅管理员，不限制当前状态）
pub async fn approve_game(
    state: &AppState,
    ctx: &AuthContext,
    game_id: i64,
) -> Result<games::Model, AppError> {
    set_game_status(state, ctx, game_id, ModerationStatus::Approved).await
}

/// 驳回游戏（仅管理员，不限制当前状态）
pub async fn reject_game(
    state: &AppState,
    ctx: &AuthContext,
    game_id: i64,
) -> Result<games::Model, AppError> {
    set_game_status(state, ctx, game_id, ModerationStatus::Rejected).await
}

async fn moderate_games_batch(
    state: &AppState,
    ctx: &AuthContext,
    ids: &[i64],
    status: ModerationStatus,
) -> Result<BatchResult, AppError> {
    ctx.ensure_admin()?;

    let outcomes = futures::future::join_all(
        ids.iter()
            .map(|id| GamesRepository::set_status(&state.db, *id, status)),
    )
    .await;

    let mut result = BatchResult::default();
    for (id, outcome) in ids.iter().zip(outcomes) {
        match outcome {
            Ok(_) => result.succeeded.push(*id),
            Err(e) => {
                let err = map_missing(e, "游戏不存在");
                result.failed.push(BatchFailure {
                    id: *id,
                    error: err.kind().to_string(),
                    message: err.to_string(),
                });
            }
        }
    }

    if !result.succeeded.is_empty() {
        state.cache.invalidate();
    }
    Ok(result)
}

/// 批量审核通过游戏：逐个执行，失败的 ID 不影响其余
pub async fn approve_games(
    state: &AppState,
    ctx: &AuthContext,
    ids: &[i64],
) -> Result<BatchResult, AppError> {
    moderate_games_batch(state, ctx, ids, ModerationStatus::Approved).await
}

/// 批量驳回游戏
pub async fn reject_games(
    state: &AppState,
    ctx: &AuthContext,
    ids: &[i64],
) -> Result<BatchResult, AppError> {
    moderate_games_batch(state, ctx, ids, ModerationStatus::Rejected).await
}

// ==================== 评论 ====================

/// 评分聚合重算
///
/// 写路径完成后调用。失败只记日志不向上传播：聚合字段永远可以
/// 由下一次成功的重算纠正，不值得让已完成的写操作报错。
pub async fn refresh_game_rating(state: &AppState, game_id: i64) {
    let policy = match SettingsRepository::get(&state.db).await {
        Ok(settings) => settings.rating_policy,
        Err(e) => {
            log::error!("读取评分口径失败，跳过游戏 {} 的重算: {}", game_id, e);
            return;
        }
    };

    match GamesRepository::recompute_rating(&state.db, game_id, policy).await {
        Ok(true) => state.cache.invalidate(),
        Ok(false) => log::warn!("重算评分时游戏 {} 已不存在", game_id),
        Err(e) => log::error!("重算游戏 {} 的评分失败: {}", game_id, e),
    }
}

/// 提交评论
///
/// 一个用户对一个游戏只能有一条评论，重复提交返回 409。
pub async fn submit_review(
    state: &AppState,
    ctx: &AuthContext,
    input: NewReviewInput,
) -> Result<reviews::Model, AppError> {
    input.validate()?;

    let game = GamesRepository::find_by_id(&state.db, input.game_id)
        .await?
        .ok_or_else(|| AppError::not_found("游戏不存在"))?;

    if ReviewsRepository::find_by_user_and_game(&state.db, ctx.user_id, input.game_id)
        .await?
        .is_some()
    {
        return Err(AppError::conflict("已经评论过该游戏"));
    }

    let settings = SettingsRepository::get(&state.db).await?;
    let status = if settings.auto_approve_reviews != 0 {
        ModerationStatus::Approved
    } else {
        ModerationStatus::Pending
    };

    // 预检与插入之间被并发写入同一 (user, game) 时，由唯一约束兜底
    let review = match ReviewsRepository::insert(&state.db, &input, ctx.user_id, status).await {
        Ok(review) => review,
        Err(e) => {
            return Err(match e.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(_)) => {
                    AppError::conflict("已经评论过该游戏")
                }
                _ => AppError::Database(e),
            });
        }
    };

    record_activity(
        &state.db,
        ActivityKind::ReviewAdded,
        format!("游戏 {} 收到新评论", game.title),
        ctx.user_id,
    )
    .await;
    refresh_game_rating(state, input.game_id).await;

    Ok(review)
}

/// 查询单条评论
///
/// 与游戏详情同一条可见性规则：未通过审核的只有作者与管理员可见。
pub async fn get_review(
    state: &AppState,
    ctx: Option<&AuthContext>,
    review_id: i64,
) -> Result<reviews::Model, AppError> {
    let review = ReviewsRepository::find_by_id(&state.db, review_id)
        .await?
        .ok_or_else(|| AppError::not_found("评论不存在"))?;

    if review.status != ModerationStatus::Approved {
        let visible = ctx.is_some_and(|c| c.is_admin() || c.user_id == review.user_id);
        if !visible {
            return Err(AppError::not_found("评论不存在"));
        }
    }

    Ok(review)
}

/// 评论列表
///
/// 非管理员无论请求什么 status 都强制为 approved，包括作者查自己的
/// 评论；未过审的单条走 get_review 入口。
pub async fn list_reviews(
    state: &AppState,
    ctx: Option<&AuthContext>,
    mut filter: ReviewFilter,
) -> Result<Vec<reviews::Model>, AppError> {
    if !ctx.is_some_and(|c| c.is_admin()) {
        filter.status = Some(ModerationStatus::Approved);
    }
    Ok(ReviewsRepository::find_filtered(&state.db, &filter).await?)
}

/// 更新评论（作者或管理员）
pub async fn update_review(
    state: &AppState,
    ctx: &AuthContext,
    review_id: i64,
    updates: UpdateReviewInput,
) -> Result<reviews::Model, AppError> {
    updates.validate()?;

    let review = ReviewsRepository::find_by_id(&state.db, review_id)
        .await?
        .ok_or_else(|| AppError::not_found("评论不存在"))?;
    ctx.ensure_self_or_admin(review.user_id)?;

    let review = ReviewsRepository::update(&state.db, review_id, &updates)
        .await
        .map_err(|e| map_missing(e, "评论不存在"))?;
    refresh_game_rating(state, review.game_id).await;

    Ok(review)
}

/// 删除评论（作者或管理员）
pub async fn delete_review(
    state: &AppState,
    ctx: &AuthContext,
    review_id: i64,
) -> Result<(), AppError> {
    let review = ReviewsRepository::find_by_id(&state.db, review_id)
        .await?
        .ok_or_else(|| AppError::not_found("评论不存在"))?;
    ctx.ensure_self_or_admin(review.user_id)?;

    ReviewsRepository::delete(&state.db, review_id).await?;
    refresh_game_rating(state, review.game_id).await;
    Ok(())
}

// ==================== 评论审核 ====================

async fn set_review_status(
    state: &AppState,
    ctx: &AuthContext,
    review_id: i64,
    status: ModerationStatus,
) -> Result<reviews::Model, AppError> {
    ctx.ensure_admin()?;

    let review = ReviewsRepository::set_status(&state.db, review_id, status)
        .await
        .map_err(|e| map_missing(e, "评论不存在"))?;
    refresh_game_rating(state, review.game_id).await;
    Ok(review)
}

/// 审核通过评论（仅管理员，不限制当前状态）
pub async fn approve_review(
    state: &AppState,
    ctx: &AuthContext,
    review_id: i64,
) -> Result<reviews::Model, AppError> {
    set_review_status(state, ctx, review_id, ModerationStatus::Approved).await
}

/// 驳回评论（仅管理员，不限制当前状态）
pub async fn reject_review(
    state: &AppState,
    ctx: &AuthContext,
    review_id: i64,
) -> Result<reviews::Model, AppError> {
    set_review_status(state, ctx, review_id, ModerationStatus::Rejected).await
}

async fn moderate_reviews_batch(
    state: &AppState,
    ctx: &AuthContext,
    ids: &[i64],
    status: ModerationStatus,
) -> Result<BatchResult, AppError> {
    ctx.ensure_admin()?;

    let outcomes = futures::future::join_all(
        ids.iter()
            .map(|id| ReviewsRepository::set_status(&state.db, *id, status)),
    )
    .await;

    let mut result = BatchResult::default();
    let mut touched_games: Vec<i64> = Vec::new();
    for (id, outcome) in ids.iter().zip(outcomes) {
        match outcome {
            Ok(review) => {
                result.succeeded.push(*id);
                touched_games.push(review.game_id);
            }
            Err(e) => {
                let err = map_missing(e, "评论不存在");
                result.failed.push(BatchFailure {
                    id: *id,
                    error: err.kind().to_string(),
                    message: err.to_string(),
                });
            }
        }
    }

    touched_games.sort_unstable();
    touched_games.dedup();
    for game_id in touched_games {
        refresh_game_rating(state, game_id).await;
    }

    Ok(result)
}

/// 批量审核通过评论
pub async fn approve_reviews(
    state: &AppState,
    ctx: &AuthContext,
    ids: &[i64],
) -> Result<BatchResult, AppError> {
    moderate_reviews_batch(state, ctx, ids, ModerationStatus::Approved).await
}

/// 批量驳回评论
pub async fn reject_reviews(
    state: &AppState,
    ctx: &AuthContext,
    ids: &[i64],
) -> Result<BatchResult, AppError> {
    moderate_reviews_batch(state, ctx, ids, ModerationStatus::Rejected).await
}

// ==================== 公司 ====================

/// 创建公司（仅管理员）
pub async fn create_company(
    state: &AppState,
    ctx: &AuthContext,
    input: NewCompanyInput,
) -> Result<companies::Model, AppError> {
    ctx.ensure_admin()?;
    input.validate()?;

    if CompaniesRepository::find_by_name(&state.db, input.name.trim())
        .await?
        .is_some()
    {
        return Err(AppError::conflict("公司已存在"));
    }

    Ok(CompaniesRepository::insert(&state.db, &input).await?)
}

/// 查询公司
pub async fn get_company(state: &AppState, company_id: i64) -> Result<companies::Model, AppError> {
    CompaniesRepository::find_by_id(&state.db, company_id)
        .await?
        .ok_or_else(|| AppError::not_found("公司不存在"))
}

/// 公司列表（公开）
pub async fn list_companies(
    state: &AppState,
    limit: u64,
    offset: u64,
) -> Result<Vec<companies::Model>, AppError> {
    Ok(CompaniesRepository::find_all(&state.db, limit, offset).await?)
}

/// 更新公司（仅管理员）
pub async fn update_company(
    state: &AppState,
    ctx: &AuthContext,
    company_id: i64,
    updates: UpdateCompanyInput,
) -> Result<companies::Model, AppError> {
    ctx.ensure_admin()?;
    updates.validate()?;

    let company = CompaniesRepository::update(&state.db, company_id, &updates)
        .await
        .map_err(|e| map_missing(e, "公司不存在"))?;
    state.cache.invalidate();
    Ok(company)
}

/// 删除公司（仅管理员，关联游戏的 company_id 置空）
pub async fn delete_company(
    state: &AppState,
    ctx: &AuthContext,
    company_id: i64,
) -> Result<(), AppError> {
    ctx.ensure_admin()?;

    if CompaniesRepository::find_by_id(&state.db, company_id)
        .await?
        .is_none()
    {
        return Err(AppError::not_found("公司不存在"));
    }

    CompaniesRepository::delete(&state.db, company_id).await?;
    state.cache.invalidate();
    Ok(())
}

// ==================== 标签 ====================

/// 全部标签（公开）
pub async fn list_tags(state: &AppState) -> Result<Vec<tags::Model>, AppError> {
    Ok(TagsRepository::find_all(&state.db).await?)
}

// ==================== 运行配置 ====================

/// 读取运行配置（仅管理员）
pub async fn get_settings(state: &AppState, ctx: &AuthContext) -> Result<settings::Model, AppError> {
    ctx.ensure_admin()?;
    Ok(SettingsRepository::get(&state.db).await?)
}

/// 更新运行配置（仅管理员）
///
/// 切换评分口径会让所有聚合字段过期，因此全量重算一遍。
pub async fn update_settings(
    state: &AppState,
    ctx: &AuthContext,
    updates: UpdateSettingsInput,
) -> Result<settings::Model, AppError> {
    ctx.ensure_admin()?;

    let before = SettingsRepository::get(&state.db).await?;
    let after = SettingsRepository::update(&state.db, &updates).await?;

    if before.rating_policy != after.rating_policy {
        for game_id in GamesRepository::all_ids(&state.db).await? {
            refresh_game_rating(state, game_id).await;
        }
    }

    Ok(after)
}

// ==================== 管理统计 ====================

/// 时间序列统计（仅管理员）
///
/// start/end 省略时按粒度取默认回溯窗口。
pub async fn stats_time_series(
    state: &AppState,
    ctx: &AuthContext,
    entity: StatsEntity,
    range: StatsRange,
    start: Option<i64>,
    end: Option<i64>,
) -> Result<Vec<TimeBucket>, AppError> {
    ctx.ensure_admin()?;

    let now = chrono::Utc::now().timestamp();
    let (default_start, default_end) =
        crate::database::repository::stats_repository::default_window(range, now);
    let start = start.unwrap_or(default_start);
    let end = end.unwrap_or(default_end);

    if start > end {
        return Err(AppError::validation("起始时间不能晚于结束时间"));
    }

    Ok(StatsRepository::time_series(&state.db, entity, range, start, end).await?)
}

/// 题材分布统计（仅管理员）
pub async fn stats_genre_distribution(
    state: &AppState,
    ctx: &AuthContext,
) -> Result<Vec<GenreCount>, AppError> {
    ctx.ensure_admin()?;
    Ok(StatsRepository::genre_distribution(&state.db).await?)
}

/// 评分分布统计（仅管理员）
pub async fn stats_rating_distribution(
    state: &AppState,
    ctx: &AuthContext,
) -> Result<Vec<RatingBucket>, AppError> {
    ctx.ensure_admin()?;
    Ok(StatsRepository::rating_distribution(&state.db).await?)
}

/// 仪表盘概览（仅管理员）
pub async fn stats_summary(
    state: &AppState,
    ctx: &AuthContext,
) -> Result<DashboardSummary, AppError> {
    ctx.ensure_admin()?;
    Ok(StatsRepository::summary(&state.db).await?)
}
