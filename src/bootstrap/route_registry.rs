use actix_web::web;
use std::collections::BTreeSet;
use tracing::info;

/// 路由配置函数类型
pub type RouteConfigFn = fn(&mut web::ServiceConfig);

/// 路由信息结构
#[derive(Debug, Clone)]
pub struct RouteInfo {
    pub name: String,
    pub description: String,
    pub module: String,
    pub config_fn: RouteConfigFn,
}

impl RouteInfo {
    pub fn new(name: &str, description: &str, module: &str, config_fn: RouteConfigFn) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            module: module.to_string(),
            config_fn,
        }
    }
}

/// 路由注册器，按注册顺序配置
#[derive(Debug, Clone, Default)]
pub struct RouteRegistry {
    routes: Vec<RouteInfo>,
}

impl RouteRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 注册路由；同名路由覆盖旧的配置
    pub fn register_route(&mut self, route_info: RouteInfo) {
        self.routes.retain(|r| r.name != route_info.name);
        self.routes.push(route_info);
    }

    pub fn routes(&self) -> &[RouteInfo] {
        &self.routes
    }

    /// 获取指定模块的路由
    pub fn routes_by_module(&self, module: &str) -> Vec<&RouteInfo> {
        self.routes.iter().filter(|r| r.module == module).collect()
    }

    /// 配置所有路由到 ServiceConfig
    pub fn configure_all(&self, cfg: &mut web::ServiceConfig) {
        for route_info in &self.routes {
            (route_info.config_fn)(cfg);
        }
    }

    /// 输出路由注册信息
    pub fn log_routes(&self) {
        let modules: BTreeSet<&str> = self.routes.iter().map(|r| r.module.as_str()).collect();
        for module in modules {
            let module_routes = self.routes_by_module(module);
            info!("模块: {} ({} 个路由)", module, module_routes.len());
            for route in module_routes {
                info!("  - {}: {}", route.name, route.description);
            }
        }
        info!("总计: {} 个路由", self.routes.len());
    }
}

/// 默认路由表：产品接口、服务信息、接口文档
pub fn default_registry() -> RouteRegistry {
    let mut registry = RouteRegistry::new();
    registry.register_route(RouteInfo::new(
        "products",
        "产品增删改查 /api/products",
        "product",
        crate::controller::product::configure,
    ));
    registry.register_route(RouteInfo::new(
        "about",
        "服务信息 /about",
        "home",
        crate::controller::home::configure,
    ));
    registry.register_route(RouteInfo::new(
        "swagger",
        "接口文档 /swagger-ui, /api-doc/openapi.json",
        "api",
        crate::api::swagger::configure,
    ));
    registry
}
