use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::db::error::{DbError, Result};
use crate::model::Product;
use crate::repo::Repository;

/// 进程内产品仓库，主键从 1 开始递增
/// In-process product store; ids count up from 1
pub struct MemoryProductRepo {
    rows: RwLock<BTreeMap<i64, Product>>,
    next_id: AtomicI64,
}

impl MemoryProductRepo {
    pub fn new() -> Self {
        Self {
            rows: RwLock::new(BTreeMap::new()),
            next_id: AtomicI64::new(1),
        }
    }

    pub async fn len(&self) -> usize {
        self.rows.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.rows.read().await.is_empty()
    }
}

impl Default for MemoryProductRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Repository<Product, i64> for MemoryProductRepo {
    async fn save(&self, mut model: Product) -> Result<Product> {
        let id = match model.id {
            Some(id) => {
                // 显式主键写入后，序列不能再分配到同一个值
                self.next_id.fetch_max(id.saturating_add(1), Ordering::SeqCst);
                id
            }
            None => self.next_id.fetch_add(1, Ordering::SeqCst),
        };
        model.id = Some(id);
        self.rows.write().await.insert(id, model.clone());
        Ok(model)
    }

    async fn find_by_id(&self, pk: i64) -> Result<Option<Product>> {
        Ok(self.rows.read().await.get(&pk).cloned())
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        Ok(self.rows.read().await.values().cloned().collect())
    }

    async fn delete(&self, model: &Product) -> Result<u64> {
        let id = model.id.ok_or(DbError::MissingKey)?;
        Ok(self.rows.write().await.remove(&id).map_or(0, |_| 1))
    }
}
