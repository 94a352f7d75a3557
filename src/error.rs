use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use crate::comm::config::ConfigError;
use crate::db::error::DbError;
use crate::response::{ApiResponse, ErrorKind};

/// 统一的应用错误类型（启动与基础设施）
/// Process-level errors: startup and infrastructure faults
#[derive(Error, Debug)]
pub enum AppError {
    #[error("配置错误: {0}")]
    Config(#[from] ConfigError),

    #[error("数据库错误: {0}")]
    Database(#[from] DbError),

    #[error("IO 错误: {0}")]
    Io(#[from] std::io::Error),

    #[error("内部错误: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// 获取HTTP状态码
    pub fn status_code(&self) -> actix_web::http::StatusCode {
        ErrorKind::InternalError.status_code()
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> actix_web::http::StatusCode {
        AppError::status_code(self)
    }

    fn error_response(&self) -> HttpResponse {
        // 内部细节只进日志，不返回给调用方
        tracing::error!("Internal error: {}", self);
        ApiResponse::<()>::failure(ErrorKind::InternalError, "Internal server error")
            .to_http_response()
    }
}

/// 应用结果类型
pub type AppResult<T> = Result<T, AppError>;
