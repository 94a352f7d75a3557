//! 产品目录服务：REST 接口、业务层与可替换的存储后端
//! Product catalog service: REST transport, operation layer and pluggable storage

pub mod api;
pub mod bootstrap;
pub mod comm;
pub mod controller;
pub mod db;
pub mod error;
pub mod model;
pub mod repo;
pub mod response;
pub mod service;

pub use bootstrap::AppBootstrap;
pub use error::{AppError, AppResult};
pub use model::Product;
pub use response::{ApiResponse, ErrorKind};
pub use service::{ProductService, ServiceError};
