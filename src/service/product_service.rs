use std::sync::Arc;
use tracing::{debug, error, instrument, warn};

use crate::db::error::describe_error;
use crate::model::Product;
use crate::repo::Repository;
use crate::response::ApiResponse;
use crate::service::ServiceError;

pub type ProductRepository = dyn Repository<Product, i64>;

/// 产品服务：无状态，可在多个 worker 间共享
/// Product service: stateless, shared across workers
#[derive(Clone)]
pub struct ProductService {
    repo: Arc<ProductRepository>,
}

impl ProductService {
    pub fn new(repo: Arc<ProductRepository>) -> Self {
        Self { repo }
    }

    /// 创建产品，请求中的 id 会被忽略
    #[instrument(skip(self, product), fields(name = %product.name))]
    pub async fn create(&self, mut product: Product) -> ApiResponse<Product> {
        product.id = None;
        let result = self.repo.save(product).await.map_err(ServiceError::Create);
        if let Ok(saved) = &result {
            debug!(id = ?saved.id, "product created");
        }
        respond(result)
    }

    #[instrument(skip(self))]
    pub async fn get_all(&self) -> ApiResponse<Vec<Product>> {
        let result = self.repo.find_all().await.map_err(ServiceError::FetchAll);
        if let Ok(products) = &result {
            debug!(count = products.len(), "products listed");
        }
        respond(result)
    }

    #[instrument(skip(self))]
    pub async fn get_by_id(&self, id: i64) -> ApiResponse<Product> {
        let result = self
            .repo
            .find_by_id(id)
            .await
            .map_err(ServiceError::Fetch)
            .and_then(|found| found.ok_or(ServiceError::NotFound));
        respond(result)
    }

    /// 更新产品：只覆盖 name 与 price，description 保持存储中的值
    #[instrument(skip(self, details))]
    pub async fn update(&self, id: i64, details: Product) -> ApiResponse<Product> {
        respond(self.try_update(id, details).await)
    }

    async fn try_update(&self, id: i64, details: Product) -> Result<Product, ServiceError> {
        let mut product = self
            .repo
            .find_by_id(id)
            .await
            .map_err(ServiceError::Update)?
            .ok_or(ServiceError::NotFound)?;
        product.apply_details(details);
        self.repo.save(product).await.map_err(ServiceError::Update)
    }

    #[instrument(skip(self))]
    pub async fn delete(&self, id: i64) -> ApiResponse<()> {
        match self.try_delete(id).await {
            Ok(()) => ApiResponse::empty(),
            Err(err) => respond(Err(err)),
        }
    }

    async fn try_delete(&self, id: i64) -> Result<(), ServiceError> {
        let product = self
            .repo
            .find_by_id(id)
            .await
            .map_err(ServiceError::Delete)?
            .ok_or(ServiceError::NotFound)?;
        let removed = self
            .repo
            .delete(&product)
            .await
            .map_err(ServiceError::Delete)?;
        debug!(removed, "product deleted");
        Ok(())
    }
}

fn respond<T>(result: Result<T, ServiceError>) -> ApiResponse<T> {
    if let Err(err) = &result {
        match err.db_error() {
            Some(db) => error!(kind = %err.kind(), cause = %describe_error(db), "{}", err),
            None => warn!(kind = %err.kind(), "{}", err),
        }
    }
    result.into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::error::{DbError, Result as DbResult};
    use crate::repo::MemoryProductRepo;
    use crate::response::ErrorKind;
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    /// 记录调用次数、可注入故障的仓库
    #[derive(Default)]
    struct RecordingRepo {
        inner: MemoryProductRepo,
        fail_find: bool,
        fail_save: bool,
        fail_find_all: bool,
        fail_delete: bool,
        saves: AtomicUsize,
        finds: AtomicUsize,
        find_alls: AtomicUsize,
        deletes: AtomicUsize,
    }

    fn db_down() -> DbError {
        DbError::Sqlx(sqlx::Error::PoolTimedOut)
    }

    #[async_trait]
    impl Repository<Product, i64> for RecordingRepo {
        async fn save(&self, model: Product) -> DbResult<Product> {
            self.saves.fetch_add(1, Ordering::SeqCst);
            if self.fail_save {
                return Err(db_down());
            }
            self.inner.save(model).await
        }

        async fn find_by_id(&self, pk: i64) -> DbResult<Option<Product>> {
            self.finds.fetch_add(1, Ordering::SeqCst);
            if self.fail_find {
                return Err(db_down());
            }
            self.inner.find_by_id(pk).await
        }

        async fn find_all(&self) -> DbResult<Vec<Product>> {
            self.find_alls.fetch_add(1, Ordering::SeqCst);
            if self.fail_find_all {
                return Err(db_down());
            }
            self.inner.find_all().await
        }

        async fn delete(&self, model: &Product) -> DbResult<u64> {
            self.deletes.fetch_add(1, Ordering::SeqCst);
            if self.fail_delete {
                return Err(db_down());
            }
            self.inner.delete(model).await
        }
    }

    fn service_with(repo: RecordingRepo) -> (ProductService, Arc<RecordingRepo>) {
        let repo = Arc::new(repo);
        (ProductService::new(repo.clone()), repo)
    }

    async fn seed(repo: &RecordingRepo, product: Product) -> Product {
        repo.inner.save(product).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_product() {
        let (service, repo) = service_with(RecordingRepo::default());
        let product = Product::new("Test Product")
            .with_description("Test Description")
            .with_price(100.0);

        let response = service.create(product).await;

        assert!(!response.is_error());
        assert!(response.error_message().is_none());
        let saved = response.data().unwrap();
        assert_eq!(saved.id, Some(1));
        assert_eq!(saved.name, "Test Product");
        assert_eq!(repo.saves.load(Ordering::SeqCst), 1);

        let fetched = service.get_by_id(1).await;
        assert_eq!(fetched.data(), Some(saved));
    }

    #[tokio::test]
    async fn test_create_ignores_client_id() {
        let (service, _repo) = service_with(RecordingRepo::default());
        let mut product = Product::new("Client Id");
        product.id = Some(42);

        let response = service.create(product).await;

        assert_eq!(response.data().unwrap().id, Some(1));
        assert!(service.get_by_id(42).await.is_error());
    }

    #[tokio::test]
    async fn test_get_all_products() {
        let (service, repo) = service_with(RecordingRepo::default());
        seed(&repo, Product::new("Product 1")).await;
        seed(&repo, Product::new("Product 2")).await;

        let response = service.get_all().await;

        let products = response.data().unwrap();
        assert_eq!(products.len(), 2);
        assert_eq!(products[0].name, "Product 1");
        assert!(response.error_message().is_none());
        assert_eq!(repo.find_alls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_all_empty_is_success() {
        let (service, _repo) = service_with(RecordingRepo::default());
        let response = service.get_all().await;
        assert!(!response.is_error());
        assert_eq!(response.data().map(Vec::len), Some(0));
    }

    #[tokio::test]
    async fn test_get_product_by_id() {
        let (service, repo) = service_with(RecordingRepo::default());
        seed(&repo, Product::new("Test Product")).await;

        let response = service.get_by_id(1).await;

        assert_eq!(response.data().unwrap().name, "Test Product");
        assert!(response.error_message().is_none());
        assert_eq!(repo.finds.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_product_by_id_not_found() {
        let (service, repo) = service_with(RecordingRepo::default());

        let response = service.get_by_id(1).await;

        assert!(response.data().is_none());
        assert_eq!(response.error_message(), Some("Product not found"));
        assert_eq!(response.error_kind(), Some(ErrorKind::NotFound));
        assert_eq!(repo.finds.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_update_product() {
        let (service, repo) = service_with(RecordingRepo::default());
        seed(&repo, Product::new("Old Product")).await;
        let details = Product::new("Updated Product")
            .with_description("Updated Description")
            .with_price(200.0);

        let response = service.update(1, details).await;

        let updated = response.data().unwrap();
        assert_eq!(updated.id, Some(1));
        assert_eq!(updated.name, "Updated Product");
        assert_eq!(updated.price, Some(200.0));
        assert!(response.error_message().is_none());
        assert_eq!(repo.finds.load(Ordering::SeqCst), 1);
        assert_eq!(repo.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_update_does_not_copy_description() {
        // 已知差异：更新只复制 name 和 price，请求中的 description 被丢弃
        let (service, repo) = service_with(RecordingRepo::default());
        seed(&repo, Product::new("Desk").with_description("oak")).await;
        let details = Product::new("Desk").with_description("walnut").with_price(5.0);

        let response = service.update(1, details).await;

        assert_eq!(response.data().unwrap().description.as_deref(), Some("oak"));
    }

    #[tokio::test]
    async fn test_update_missing_product_skips_save() {
        let (service, repo) = service_with(RecordingRepo::default());

        let response = service.update(1, Product::new("Updated")).await;

        assert_eq!(response.error_kind(), Some(ErrorKind::NotFound));
        assert_eq!(repo.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_delete_product() {
        let (service, repo) = service_with(RecordingRepo::default());
        seed(&repo, Product::new("Doomed")).await;

        let response = service.delete(1).await;

        assert!(!response.is_error());
        assert!(response.error_kind().is_none());
        assert_eq!(repo.finds.load(Ordering::SeqCst), 1);
        assert_eq!(repo.deletes.load(Ordering::SeqCst), 1);
        assert_eq!(
            service.get_by_id(1).await.error_kind(),
            Some(ErrorKind::NotFound)
        );
    }

    #[tokio::test]
    async fn test_delete_product_not_found() {
        let (service, repo) = service_with(RecordingRepo::default());

        let response = service.delete(1).await;

        assert_eq!(response.error_message(), Some("Product not found"));
        assert_eq!(response.error_kind(), Some(ErrorKind::NotFound));
        assert_eq!(repo.finds.load(Ordering::SeqCst), 1);
        assert_eq!(repo.deletes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_create_product_failure() {
        let (service, repo) = service_with(RecordingRepo {
            fail_save: true,
            ..Default::default()
        });

        let response = service.create(Product::new("Test Product")).await;

        assert!(response.data().is_none());
        assert_eq!(response.error_message(), Some("Error creating product"));
        assert_eq!(response.error_kind(), Some(ErrorKind::CreateFailed));
        assert_eq!(repo.saves.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_get_all_products_failure() {
        let (service, _repo) = service_with(RecordingRepo {
            fail_find_all: true,
            ..Default::default()
        });

        let response = service.get_all().await;

        assert!(response.data().is_none());
        assert_eq!(response.error_message(), Some("Error fetching products"));
        assert_eq!(response.error_kind(), Some(ErrorKind::InternalError));
    }

    #[tokio::test]
    async fn test_get_product_by_id_failure() {
        let (service, _repo) = service_with(RecordingRepo {
            fail_find: true,
            ..Default::default()
        });

        let response = service.get_by_id(1).await;

        assert_eq!(response.error_message(), Some("Error fetching product by id"));
        assert_eq!(response.error_kind(), Some(ErrorKind::InternalError));
    }

    #[tokio::test]
    async fn test_update_product_lookup_failure() {
        let (service, repo) = service_with(RecordingRepo {
            fail_find: true,
            ..Default::default()
        });

        let response = service.update(1, Product::new("Updated Product")).await;

        assert!(response.data().is_none());
        assert_eq!(response.error_kind(), Some(ErrorKind::UpdateFailed));
        assert_eq!(repo.saves.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_update_product_save_failure() {
        let (service, repo) = service_with(RecordingRepo {
            fail_save: true,
            ..Default::default()
        });
        seed(&repo, Product::new("Old")).await;

        let response = service.update(1, Product::new("New")).await;

        assert_eq!(response.error_message(), Some("Error updating product"));
        assert_eq!(response.error_kind(), Some(ErrorKind::UpdateFailed));
    }

    #[tokio::test]
    async fn test_delete_product_lookup_failure() {
        let (service, repo) = service_with(RecordingRepo {
            fail_find: true,
            ..Default::default()
        });

        let response = service.delete(1).await;

        assert_eq!(response.error_message(), Some("Error deleting product"));
        assert_eq!(response.error_kind(), Some(ErrorKind::DeleteFailed));
        assert_eq!(repo.deletes.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_delete_product_remove_failure() {
        let (service, repo) = service_with(RecordingRepo {
            fail_delete: true,
            ..Default::default()
        });
        seed(&repo, Product::new("Stuck")).await;

        let response = service.delete(1).await;

        assert_eq!(response.error_kind(), Some(ErrorKind::DeleteFailed));
        assert_eq!(repo.deletes.load(Ordering::SeqCst), 1);
    }
}
