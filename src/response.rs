use actix_web::{
    body::BoxBody,
    http::StatusCode,
    HttpRequest, HttpResponse, Responder,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use utoipa::ToSchema;

use crate::service::ServiceError;

/// 错误类别（封闭集合），每一类绑定一个 HTTP 状态码
/// Error kind (closed set), each bound to exactly one HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    NotFound,
    BadRequest,
    CreateFailed,
    UpdateFailed,
    DeleteFailed,
    InternalError,
}

impl ErrorKind {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ErrorKind::NotFound => StatusCode::NOT_FOUND,
            ErrorKind::BadRequest => StatusCode::BAD_REQUEST,
            ErrorKind::CreateFailed
            | ErrorKind::UpdateFailed
            | ErrorKind::DeleteFailed
            | ErrorKind::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::NotFound => "NOT_FOUND",
            ErrorKind::BadRequest => "BAD_REQUEST",
            ErrorKind::CreateFailed => "CREATE_FAILED",
            ErrorKind::UpdateFailed => "UPDATE_FAILED",
            ErrorKind::DeleteFailed => "DELETE_FAILED",
            ErrorKind::InternalError => "INTERNAL_ERROR",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 统一响应信封：data 与 {errorMessage, errorKind} 互斥
/// Uniform envelope: `data` and `{errorMessage, errorKind}` are mutually exclusive.
///
/// Fields are private so the only way to build one is through the constructors
/// below; callers check [`ApiResponse::is_error`] before reading [`ApiResponse::data`].
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_kind: Option<ErrorKind>,
}

impl<T> ApiResponse<T> {
    pub fn success(data: T) -> Self {
        Self {
            data: Some(data),
            error_message: None,
            error_kind: None,
        }
    }

    /// 成功但无数据（如删除）/ Success with no payload, e.g. delete
    pub fn empty() -> Self {
        Self {
            data: None,
            error_message: None,
            error_kind: None,
        }
    }

    pub fn failure<M: Into<String>>(kind: ErrorKind, message: M) -> Self {
        Self {
            data: None,
            error_message: Some(message.into()),
            error_kind: Some(kind),
        }
    }

    pub fn is_error(&self) -> bool {
        self.error_kind.is_some()
    }

    pub fn data(&self) -> Option<&T> {
        self.data.as_ref()
    }

    pub fn error_message(&self) -> Option<&str> {
        self.error_message.as_deref()
    }

    pub fn error_kind(&self) -> Option<ErrorKind> {
        self.error_kind
    }

    pub fn status_code(&self) -> StatusCode {
        self.error_kind
            .map_or(StatusCode::OK, |kind| kind.status_code())
    }
}

impl<T: Serialize> ApiResponse<T> {
    pub fn to_http_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

impl<T> From<ServiceError> for ApiResponse<T> {
    fn from(err: ServiceError) -> Self {
        Self::failure(err.kind(), err.to_string())
    }
}

impl<T> From<Result<T, ServiceError>> for ApiResponse<T> {
    fn from(result: Result<T, ServiceError>) -> Self {
        match result {
            Ok(data) => Self::success(data),
            Err(err) => err.into(),
        }
    }
}

impl<T: Serialize> Responder for ApiResponse<T> {
    type Body = BoxBody;

    fn respond_to(self, _req: &HttpRequest) -> HttpResponse<Self::Body> {
        self.to_http_response()
    }
}
