use actix_web::{middleware::Logger, web, App, HttpServer};
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

use crate::bootstrap::route_registry::{default_registry, RouteRegistry};
use crate::comm::settings::{AppSettings, DatabaseBackend};
use crate::db::{connect_pool, describe_error};
use crate::error::{AppError, AppResult};
use crate::repo::{MemoryProductRepo, PgProductRepo};
use crate::service::{ProductRepository, ProductService};

/// 应用启动器
pub struct AppBootstrap {
    settings: AppSettings,
    routes: RouteRegistry,
}

impl AppBootstrap {
    /// 创建新的应用启动器
    pub fn new(settings: AppSettings) -> Self {
        Self {
            settings,
            routes: default_registry(),
        }
    }

    /// 按配置选择存储后端并构建产品服务
    pub async fn build_service(&self) -> AppResult<ProductService> {
        let repo: Arc<ProductRepository> = match self.settings.database.backend()? {
            DatabaseBackend::Memory => {
                info!("使用内存存储后端");
                Arc::new(MemoryProductRepo::new())
            }
            DatabaseBackend::Postgres => {
                let pool = connect_pool(&self.settings.database)?;
                let repo = PgProductRepo::new(pool);
                // 数据库暂不可达时继续启动，首次访问时再建表
                if let Err(e) = repo.ensure_schema().await {
                    warn!("建表失败，将在首次访问时重试: {}", describe_error(&e));
                }
                info!("使用 PostgreSQL 存储后端");
                Arc::new(repo)
            }
        };
        Ok(ProductService::new(repo))
    }

    /// 运行应用服务器
    #[instrument(skip(self))]
    pub async fn run(self) -> AppResult<()> {
        let service = self.build_service().await?;
        self.routes.log_routes();

        let result = self.start_http_server(service).await;
        if let Err(e) = &result {
            error!("服务器启动失败: {}", e);
        }
        result
    }

    /// 启动HTTP服务器
    async fn start_http_server(self, service: ProductService) -> AppResult<()> {
        let addr = self.settings.bind_addr();
        let data = web::Data::new(service);
        let routes = self.routes;

        let mut server = HttpServer::new(move || {
            let routes = routes.clone();
            App::new()
                .wrap(Logger::default())
                .app_data(data.clone())
                .configure(move |cfg| routes.configure_all(cfg))
        });
        if let Some(workers) = self.settings.server.workers {
            server = server.workers(workers);
        }

        let server = server.bind(&addr).map_err(AppError::Io)?;
        info!("服务器监听 {}", addr);
        server.run().await?;
        info!("服务器已停止");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::ErrorKind;

    #[tokio::test]
    async fn test_build_memory_service() {
        let bootstrap = AppBootstrap::new(AppSettings::default());
        let service = bootstrap.build_service().await.unwrap();
        let created = service.create(crate::model::Product::new("p")).await;
        assert_eq!(created.data().and_then(|p| p.id), Some(1));
    }

    #[tokio::test]
    async fn test_postgres_backend_starts_without_database() {
        let mut settings = AppSettings::default();
        settings.database.backend = "postgres".to_string();
        settings.database.url = Some("postgres://postgres@127.0.0.1:1/products".to_string());
        let service = AppBootstrap::new(settings).build_service().await.unwrap();

        let response = service.get_all().await;
        assert_eq!(response.error_kind(), Some(ErrorKind::InternalError));
        assert_eq!(response.error_message(), Some("Error fetching products"));
    }

    #[tokio::test]
    async fn test_unknown_backend_is_config_error() {
        let mut settings = AppSettings::default();
        settings.database.backend = "mongo".to_string();
        let err = AppBootstrap::new(settings).build_service().await.err().unwrap();
        assert!(matches!(err, AppError::Config(_)));
    }

    #[tokio::test]
    async fn test_bind_failure_is_reported() {
        let taken = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let mut settings = AppSettings::default();
        settings.server.host = "127.0.0.1".to_string();
        settings.server.port = taken.local_addr().unwrap().port();
        let err = AppBootstrap::new(settings).run().await.err().unwrap();
        assert!(matches!(err, AppError::Io(_)));
    }
}
