use actix_web::web;
use serde::{Deserialize, Serialize};
use utoipa::{OpenApi, ToSchema};
use utoipa_swagger_ui::SwaggerUi;

use crate::model::Product;
use crate::response::ErrorKind;

/// 单个产品成功响应（文档模型）
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductEnvelope {
    pub data: Product,
}

/// 产品列表成功响应（文档模型）
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ProductListEnvelope {
    pub data: Vec<Product>,
}

/// 失败响应
#[derive(Debug, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ErrorEnvelope {
    pub error_message: String,
    pub error_kind: ErrorKind,
}

/// OpenAPI 文档聚合
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::controller::product::create_product,
        crate::controller::product::get_all_products,
        crate::controller::product::get_product_by_id,
        crate::controller::product::update_product,
        crate::controller::product::delete_product,
        crate::controller::home::about,
    ),
    components(
        schemas(
            Product,
            ErrorKind,
            ProductEnvelope,
            ProductListEnvelope,
            ErrorEnvelope,
        )
    ),
    tags(
        (name = "Products", description = "产品增删改查接口"),
        (name = "Home", description = "服务信息")
    )
)]
pub struct ApiDoc;

/// 集成 Swagger UI 文档（使用通配路径以兼容静态资源与尾随斜杠）
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(SwaggerUi::new("/swagger-ui/{_:.*}").url("/api-doc/openapi.json", ApiDoc::openapi()));
}
