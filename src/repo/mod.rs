use crate::db::error::Result;
use async_trait::async_trait;

pub mod memory;
pub mod product_repo;

pub use memory::MemoryProductRepo;
pub use product_repo::PgProductRepo;

/// 通用仓库 Trait，约定标准 CRUD 操作。
/// 该 Trait 不依赖具体存储，实现可以是内存表或 Postgres 连接池。
#[async_trait]
pub trait Repository<T, PK>: Send + Sync {
    /// 保存记录：无主键时插入并分配主键，有主键时按主键写入；返回持久化后的记录。
    async fn save(&self, model: T) -> Result<T>;

    /// 读取一条记录（按主键），不存在时返回 None。
    async fn find_by_id(&self, pk: PK) -> Result<Option<T>>;

    /// 读取所有记录（按主键升序）。
    async fn find_all(&self) -> Result<Vec<T>>;

    /// 删除记录（按实体的主键），返回影响行数。
    async fn delete(&self, model: &T) -> Result<u64>;
}
