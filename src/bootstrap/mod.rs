//! 启动模块：命令行、路由注册与 HTTP 服务器生命周期

pub mod app_bootstrap;
pub mod cli;
pub mod route_registry;

pub use app_bootstrap::AppBootstrap;
pub use cli::{Cli, Commands, ServerArgs};
pub use route_registry::{default_registry, RouteInfo, RouteRegistry};
