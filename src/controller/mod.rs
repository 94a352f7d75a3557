use actix_web::{error::InternalError, web};

use crate::response::{ApiResponse, ErrorKind};

pub mod home;
pub mod product;

/// 请求体或路径参数无法解析时返回 BAD_REQUEST 信封
fn bad_request<E>(cause: E) -> actix_web::Error
where
    E: std::fmt::Debug + std::fmt::Display + 'static,
{
    let message = format!("Invalid request: {}", cause);
    tracing::info!("Client error: {}", message);
    let response = ApiResponse::<()>::failure(ErrorKind::BadRequest, message).to_http_response();
    InternalError::from_response(cause, response).into()
}

pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| bad_request(err))
}

pub fn path_config() -> web::PathConfig {
    web::PathConfig::default().error_handler(|err, _req| bad_request(err))
}
