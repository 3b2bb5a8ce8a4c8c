//! 统一错误处理
//!
//! 提供应用级错误类型 [`AppError`] 和处理函数的 Result 别名 [`AppResult`]。
//!
//! # 错误分类
//!
//! | 分类 | HTTP 状态码 |
//! |------|------------|
//! | 认证错误 | 401 |
//! | 输入验证 / 重复资源 / 文件错误 | 400 |
//! | 资源不存在 | 404 |
//! | 数据库 / 内部错误 | 500 |
//!
//! # 使用示例
//!
//! ```ignore
//! // 返回错误
//! Err(AppError::not_found("Employee employee:abc not found"))
//! ```

use axum::{
    Json,
    extract::multipart::MultipartError,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use tracing::error;

use crate::db::repository::RepoError;

/// Result type for request handlers
pub type AppResult<T> = Result<T, AppError>;

/// 单个字段的验证错误描述
#[derive(Debug, Clone, Serialize)]
pub struct FieldError {
    /// 字段名
    pub field: String,
    /// 错误消息
    pub message: String,
}

impl FieldError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }
}

/// 应用错误枚举
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    // ========== 认证错误 (401) ==========
    #[error("Authentication required")]
    /// 缺少 Bearer 令牌
    Unauthorized,

    #[error("Token expired")]
    /// 令牌过期
    TokenExpired,

    #[error("Invalid token")]
    /// 无效令牌
    InvalidToken,

    #[error("Invalid username or password")]
    /// 登录失败 (统一消息，不区分用户不存在和密码错误)
    InvalidCredentials,

    // ========== 业务逻辑错误 (4xx) ==========
    #[error("Resource not found: {0}")]
    /// 资源不存在 (404)
    NotFound(String),

    #[error("Duplicate resource: {0}")]
    /// 唯一性冲突，按接口约定返回 400
    Duplicate(String),

    #[error("Validation failed: {0}")]
    /// 单项验证失败 (400)
    Validation(String),

    #[error("Validation failed")]
    /// 字段级验证失败，携带全部违规描述 (400)
    FieldValidation(Vec<FieldError>),

    #[error("Invalid file: {0}")]
    /// 文件验证失败 (400)
    InvalidFile(String),

    // ========== 系统错误 (500) ==========
    #[error("Database error: {0}")]
    /// 数据库错误
    Database(String),

    #[error("Internal server error: {0}")]
    /// 内部错误
    Internal(String),
}

/// 错误响应体
///
/// `message` 始终存在；字段级验证失败时额外携带 `errors` 数组。
#[derive(Debug, Serialize)]
struct ErrorBody {
    message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    errors: Option<Vec<FieldError>>,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message, errors) = match self {
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "Access denied. No token provided.".to_string(),
                None,
            ),
            AppError::TokenExpired => {
                (StatusCode::UNAUTHORIZED, "Token expired".to_string(), None)
            }
            AppError::InvalidToken => {
                (StatusCode::UNAUTHORIZED, "Invalid token".to_string(), None)
            }
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "Invalid username or password".to_string(),
                None,
            ),

            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, msg, None),
            AppError::Duplicate(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg, None),
            AppError::FieldValidation(errors) => (
                StatusCode::BAD_REQUEST,
                "Validation failed".to_string(),
                Some(errors),
            ),
            AppError::InvalidFile(msg) => (StatusCode::BAD_REQUEST, msg, None),

            AppError::Database(msg) => {
                error!(target: "database", error = %msg, "Database error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                    None,
                )
            }
            AppError::Internal(msg) => {
                error!(target: "internal", error = %msg, "Internal error occurred");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Server error".to_string(),
                    None,
                )
            }
        };

        let body = Json(ErrorBody { message, errors });
        (status, body).into_response()
    }
}

impl From<MultipartError> for AppError {
    fn from(e: MultipartError) -> Self {
        AppError::Validation(format!("Multipart error: {}", e))
    }
}

impl From<RepoError> for AppError {
    fn from(e: RepoError) -> Self {
        match e {
            RepoError::NotFound(msg) => AppError::NotFound(msg),
            RepoError::Duplicate(msg) => AppError::Duplicate(msg),
            RepoError::Validation(msg) => AppError::Validation(msg),
            RepoError::Database(msg) => AppError::Database(msg),
        }
    }
}

// ========== Helper Constructors ==========

impl AppError {
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }

    pub fn duplicate(message: impl Into<String>) -> Self {
        Self::Duplicate(message.into())
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    pub fn invalid_file(message: impl Into<String>) -> Self {
        Self::InvalidFile(message.into())
    }

    pub fn database(message: impl Into<String>) -> Self {
        Self::Database(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }
}
