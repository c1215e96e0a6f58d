use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;

/// 请求处理过程中的错误
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 请求参数不合法
    #[error("{0}")]
    Validation(String),

    /// 引用的记录不存在
    #[error("{0}")]
    NotFound(String),

    /// 违反唯一约束
    #[error("{0}")]
    Conflict(String),

    /// 存储层错误，原样透出
    #[error("{0}")]
    Persistence(DbErr),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn validation(message: impl Into<String>) -> Self {
        AppError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Persistence(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<DbErr> for AppError {
    fn from(err: DbErr) -> Self {
        match err.sql_err() {
            Some(SqlErr::UniqueConstraintViolation(detail)) => AppError::Conflict(detail),
            _ => AppError::Persistence(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match &self {
            AppError::Persistence(err) => tracing::error!("数据库错误: {}", err),
            other => tracing::warn!("请求被拒绝 ({}): {}", status, other),
        }

        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}
