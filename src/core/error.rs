//! 核心错误处理模块

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::{error, warn};

/// 应用错误类型
///
/// 变体只用于分类和日志；对外一律返回 400，响应体为 `"Error: <详情>"` 字符串。
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// 请求格式错误、标识符无效或缺少必填字段
    #[error("{0}")]
    Validation(String),
    #[error("{0}")]
    NotFound(String),
    /// 业务 `ID` 重复
    #[error("{0}")]
    Conflict(String),
    /// 存储不可达（连接失败、连接池超时等）
    #[error("{0}")]
    Unavailable(String),
    #[error("{0}")]
    Storage(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        StatusCode::BAD_REQUEST
    }

    /// 存储端故障，而不是请求本身的问题
    pub fn is_server_side(&self) -> bool {
        matches!(self, AppError::Unavailable(_) | AppError::Storage(_))
    }

    pub fn kind(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "VALIDATION",
            AppError::NotFound(_) => "NOT_FOUND",
            AppError::Conflict(_) => "CONFLICT",
            AppError::Unavailable(_) => "UNAVAILABLE",
            AppError::Storage(_) => "STORAGE",
        }
    }

    /// 对外输出的错误字符串
    pub fn message(&self) -> String {
        format!("Error: {}", self)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();

        if self.is_server_side() {
            error!(kind = self.kind(), status = status.as_u16(), "请求失败: {}", self);
        } else {
            warn!(kind = self.kind(), status = status.as_u16(), "请求被拒绝: {}", self);
        }

        (status, Json(self.message())).into_response()
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        let mut messages: Vec<String> = err
            .field_errors()
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |error| match &error.message {
                    Some(msg) => msg.to_string(),
                    None => format!("{}: {}", field, error.code),
                })
            })
            .collect();
        messages.sort();
        messages.dedup();

        AppError::Validation(format!("User validation failed: {}", messages.join(", ")))
    }
}

#[cfg(feature = "database")]
impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        use sqlx::error::ErrorKind;

        match &err {
            sqlx::Error::Database(db) => match db.kind() {
                ErrorKind::UniqueViolation => {
                    AppError::Conflict(format!("duplicate key: {}", db.message()))
                }
                ErrorKind::NotNullViolation | ErrorKind::CheckViolation => {
                    AppError::Validation(db.message().to_string())
                }
                _ => AppError::Storage(db.message().to_string()),
            },
            sqlx::Error::PoolTimedOut
            | sqlx::Error::PoolClosed
            | sqlx::Error::Io(_)
            | sqlx::Error::Tls(_) => AppError::Unavailable(err.to_string()),
            _ => AppError::Storage(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::Validate;

    #[derive(Validate)]
    struct IdOnly {
        #[validate(required(message = "ID is required"))]
        id: Option<i64>,
    }

    #[test]
    fn test_every_kind_is_bad_request() {
        let errors = [
            AppError::Validation("x".into()),
            AppError::NotFound("x".into()),
            AppError::Conflict("x".into()),
            AppError::Unavailable("x".into()),
            AppError::Storage("x".into()),
        ];
        for err in errors {
            assert_eq!(err.status(), StatusCode::BAD_REQUEST, "{}", err.kind());
            assert_eq!(err.into_response().status(), StatusCode::BAD_REQUEST);
        }
    }

    #[test]
    fn test_server_side_kinds() {
        assert!(AppError::Unavailable("x".into()).is_server_side());
        assert!(AppError::Storage("x".into()).is_server_side());
        assert!(!AppError::Conflict("x".into()).is_server_side());
        assert!(!AppError::Validation("x".into()).is_server_side());
    }

    #[test]
    fn test_message_prefix() {
        let err = AppError::Conflict("duplicate key: ID 7".into());
        assert_eq!(err.message(), "Error: duplicate key: ID 7");
    }

    #[test]
    fn test_validation_errors_are_flattened() {
        let err: AppError = IdOnly { id: None }.validate().unwrap_err().into();
        match err {
            AppError::Validation(msg) => {
                assert_eq!(msg, "User validation failed: ID is required");
            }
            other => panic!("unexpected error: {:?}", other),
        }
    }
}
