// 产品模型 / Product model
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// 产品表名 / Product table name
pub const PRODUCT_TABLE: &str = "products";

/// 产品实体：id 在首次持久化时由存储层分配，之后不可变
/// Product entity: id is assigned by the store on first save and never changes afterwards
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow, ToSchema)]
pub struct Product {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<i64>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
}

impl Product {
    pub fn new<N: Into<String>>(name: N) -> Self {
        Self {
            id: None,
            name: name.into(),
            description: None,
            price: None,
        }
    }

    pub fn with_description<D: Into<String>>(mut self, description: D) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_price(mut self, price: f64) -> Self {
        self.price = Some(price);
        self
    }

    /// 用请求中的字段覆盖当前记录，仅复制 name 与 price
    /// Overwrite this record from request details; only `name` and `price` are copied
    pub fn apply_details(&mut self, details: Product) {
        self.name = details.name;
        self.price = details.price;
    }
}
