use actix_web::web;

use crate::api::swagger::{ErrorEnvelope, ProductEnvelope, ProductListEnvelope};
use crate::controller::{json_config, path_config};
use crate::model::Product;
use crate::response::ApiResponse;
use crate::service::ProductService;

/// 注册产品路由 / Register product routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(json_config())
        .app_data(path_config())
        .service(create_product)
        .service(get_all_products)
        .service(get_product_by_id)
        .service(update_product)
        .service(delete_product);
}

/// 创建产品
#[utoipa::path(
    post,
    path = "/api/products",
    tag = "Products",
    request_body = Product,
    responses(
        (status = 200, description = "已创建，返回带 id 的产品", body = ProductEnvelope),
        (status = 400, description = "请求体无效", body = ErrorEnvelope),
        (status = 500, description = "CREATE_FAILED", body = ErrorEnvelope)
    )
)]
#[actix_web::post("/api/products")]
pub async fn create_product(
    service: web::Data<ProductService>,
    body: web::Json<Product>,
) -> ApiResponse<Product> {
    service.create(body.into_inner()).await
}

/// 获取所有产品
#[utoipa::path(
    get,
    path = "/api/products",
    tag = "Products",
    responses(
        (status = 200, description = "产品列表（可能为空）", body = ProductListEnvelope),
        (status = 500, description = "INTERNAL_ERROR", body = ErrorEnvelope)
    )
)]
#[actix_web::get("/api/products")]
pub async fn get_all_products(service: web::Data<ProductService>) -> ApiResponse<Vec<Product>> {
    service.get_all().await
}

/// 按 id 获取产品
#[utoipa::path(
    get,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "产品 id")),
    responses(
        (status = 200, description = "产品", body = ProductEnvelope),
        (status = 404, description = "NOT_FOUND", body = ErrorEnvelope),
        (status = 500, description = "INTERNAL_ERROR", body = ErrorEnvelope)
    )
)]
#[actix_web::get("/api/products/{id}")]
pub async fn get_product_by_id(
    service: web::Data<ProductService>,
    path: web::Path<i64>,
) -> ApiResponse<Product> {
    service.get_by_id(path.into_inner()).await
}

/// 更新产品（仅 name 与 price）
#[utoipa::path(
    put,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "产品 id")),
    request_body = Product,
    responses(
        (status = 200, description = "更新后的产品", body = ProductEnvelope),
        (status = 404, description = "NOT_FOUND", body = ErrorEnvelope),
        (status = 500, description = "UPDATE_FAILED", body = ErrorEnvelope)
    )
)]
#[actix_web::put("/api/products/{id}")]
pub async fn update_product(
    service: web::Data<ProductService>,
    path: web::Path<i64>,
    body: web::Json<Product>,
) -> ApiResponse<Product> {
    service.update(path.into_inner(), body.into_inner()).await
}

/// 删除产品
#[utoipa::path(
    delete,
    path = "/api/products/{id}",
    tag = "Products",
    params(("id" = i64, Path, description = "产品 id")),
    responses(
        (status = 200, description = "已删除，响应体为空对象 {}"),
        (status = 404, description = "NOT_FOUND", body = ErrorEnvelope),
        (status = 500, description = "DELETE_FAILED", body = ErrorEnvelope)
    )
)]
#[actix_web::delete("/api/products/{id}")]
pub async fn delete_product(
    service: web::Data<ProductService>,
    path: web::Path<i64>,
) -> ApiResponse<()> {
    service.delete(path.into_inner()).await
}
