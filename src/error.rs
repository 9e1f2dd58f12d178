//! 统一错误类型
//!
//! 仓库层返回 `DbErr`，服务层统一映射为 `AppError`。
//! 每个错误携带稳定的机器可读 kind 和对应的 HTTP 状态码，
//! HTTP 适配层只需转发，不需要理解业务语义。

use sea_orm::DbErr;
use serde::Serialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum AppError {
    /// 输入不合法（缺字段、越界等）→ 400
    #[error("{0}")]
    Validation(String),

    /// 目标实体不存在 → 404
    #[error("{0}")]
    NotFound(String),

    /// 凭证缺失或无效 → 401
    #[error("{0}")]
    Unauthenticated(String),

    /// 已认证但权限不足 → 403
    #[error("{0}")]
    Forbidden(String),

    /// 重复提交等冲突，与一般校验错误区分 → 400
    #[error("{0}")]
    Conflict(String),

    /// 持久层故障 → 500
    #[error("数据库错误: {0}")]
    Database(#[from] DbErr),
}

/// 对外错误响应体：稳定 kind + 人类可读消息，不暴露内部细节
#[derive(Debug, Clone, Serialize)]
pub struct ErrorBody {
    pub error: &'static str,
    pub message: String,
}

impl AppError {
    pub fn validation(msg: impl Into<String>) -> Self {
        AppError::Validation(msg.into())
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        AppError::NotFound(msg.into())
    }

    pub fn forbidden(msg: impl Into<String>) -> Self {
        AppError::Forbidden(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        AppError::Conflict(msg.into())
    }

    /// 稳定的机器可读错误类别
    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "validation",
            AppError::NotFound(_) => "not_found",
            AppError::Unauthenticated(_) => "unauthenticated",
            AppError::Forbidden(_) => "forbidden",
            AppError::Conflict(_) => "conflict",
            AppError::Database(_) => "internal",
        }
    }

    /// 对应的 HTTP 状态码（冲突按 400 返回，消息中已区分）
    pub fn http_status(&self) -> u16 {
        match self {
            AppError::Validation(_) | AppError::Conflict(_) => 400,
            AppError::NotFound(_) => 404,
            AppError::Unauthenticated(_) => 401,
            AppError::Forbidden(_) => 403,
            AppError::Database(_) => 500,
        }
    }

    /// 生成对外响应体
    ///
    /// 持久层错误只返回通用消息，完整错误记入日志。
    pub fn response_body(&self) -> ErrorBody {
        let message = match self {
            AppError::Database(e) => {
                log::error!("持久层故障: {}", e);
                "服务器内部错误".to_string()
            }
            other => other.to_string(),
        };

        ErrorBody {
            error: self.kind(),
            message,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kinds_and_status_codes_are_stable() {
        let cases: Vec<(AppError, &str, u16)> = vec![
            (AppError::validation("x"), "validation", 400),
            (AppError::not_found("x"), "not_found", 404),
            (AppError::Unauthenticated("x".into()), "unauthenticated", 401),
            (AppError::forbidden("x"), "forbidden", 403),
            (AppError::conflict("x"), "conflict", 400),
            (
                AppError::Database(DbErr::Custom("boom".into())),
                "internal",
                500,
            ),
        ];
        for (err, kind, status) in cases {
            assert_eq!(err.kind(), kind);
            assert_eq!(err.http_status(), status);
        }
    }

    #[test]
    fn database_errors_do_not_leak_details() {
        let err = AppError::Database(DbErr::Custom("connection string with secrets".into()));
        let body = err.response_body();
        assert_eq!(body.error, "internal");
        assert!(!body.message.contains("secrets"));
    }
}
