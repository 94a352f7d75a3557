//! 业务服务层
//!
//! 每个操作只调用一次仓库（更新、删除前多一次存在性检查），
//! 并把所有结果转换为统一响应信封，原始存储错误不会越过这一层。

use thiserror::Error;

use crate::db::error::DbError;
use crate::response::ErrorKind;

pub mod product_service;

pub use product_service::{ProductRepository, ProductService};

/// 服务层错误：Display 即对外消息，底层 DbError 只记录日志不外泄
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("Product not found")]
    NotFound,
    #[error("Error creating product")]
    Create(#[source] DbError),
    #[error("Error fetching products")]
    FetchAll(#[source] DbError),
    #[error("Error fetching product by id")]
    Fetch(#[source] DbError),
    #[error("Error updating product")]
    Update(#[source] DbError),
    #[error("Error deleting product")]
    Delete(#[source] DbError),
}

impl ServiceError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ServiceError::NotFound => ErrorKind::NotFound,
            ServiceError::Create(_) => ErrorKind::CreateFailed,
            ServiceError::FetchAll(_) | ServiceError::Fetch(_) => ErrorKind::InternalError,
            ServiceError::Update(_) => ErrorKind::UpdateFailed,
            ServiceError::Delete(_) => ErrorKind::DeleteFailed,
        }
    }

    /// 底层存储错误（NotFound 没有）
    pub fn db_error(&self) -> Option<&DbError> {
        match self {
            ServiceError::NotFound => None,
            ServiceError::Create(e)
            | ServiceError::FetchAll(e)
            | ServiceError::Fetch(e)
            | ServiceError::Update(e)
            | ServiceError::Delete(e) => Some(e),
        }
    }
}
