use actix_web::{web, Responder};

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(about);
}

/// 服务问候语
#[utoipa::path(
    get,
    path = "/about",
    tag = "Home",
    responses((status = 200, description = "Hello Universe", body = String, content_type = "text/plain"))
)]
#[actix_web::get("/about")]
pub async fn about() -> impl Responder {
    "Hello Universe"
}
