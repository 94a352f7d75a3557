use async_trait::async_trait;
use sqlx::PgPool;
use std::sync::Arc;
use tokio::sync::OnceCell;

use crate::db::error::{DbError, Result};
use crate::model::{Product, PRODUCT_TABLE};
use crate::repo::Repository;

/// Postgres 产品仓库，主键由 BIGSERIAL 分配；带主键保存即按主键更新
/// Postgres product store; ids come from a BIGSERIAL column
///
/// 建表在第一次成功后不再执行；失败时下一次访问会重试。
#[derive(Clone)]
pub struct PgProductRepo {
    pool: PgPool,
    schema: Arc<OnceCell<()>>,
}

impl PgProductRepo {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            schema: Arc::new(OnceCell::new()),
        }
    }

    /// 建表（幂等）/ Create the table if it does not exist
    pub async fn ensure_schema(&self) -> Result<()> {
        self.schema
            .get_or_try_init(|| self.create_table())
            .await?;
        Ok(())
    }

    async fn create_table(&self) -> Result<()> {
        let sql = format!(
            r#"
            CREATE TABLE IF NOT EXISTS "{PRODUCT_TABLE}" (
                id BIGSERIAL PRIMARY KEY,
                name TEXT NOT NULL,
                description TEXT NULL,
                price DOUBLE PRECISION NULL
            );
            "#
        );
        sqlx::query(&sql).execute(&self.pool).await?;
        tracing::info!(table = PRODUCT_TABLE, "[db] schema ready");
        Ok(())
    }
}

#[async_trait]
impl Repository<Product, i64> for PgProductRepo {
    async fn save(&self, model: Product) -> Result<Product> {
        self.ensure_schema().await?;
        let saved = match model.id {
            None => {
                let sql = format!(
                    r#"INSERT INTO "{PRODUCT_TABLE}" (name, description, price)
                       VALUES ($1, $2, $3)
                       RETURNING id, name, description, price"#
                );
                sqlx::query_as::<_, Product>(&sql)
                    .bind(&model.name)
                    .bind(&model.description)
                    .bind(model.price)
                    .fetch_one(&self.pool)
                    .await?
            }
            Some(id) => {
                let sql = format!(
                    r#"UPDATE "{PRODUCT_TABLE}"
                       SET name = $2, description = $3, price = $4
                       WHERE id = $1
                       RETURNING id, name, description, price"#
                );
                sqlx::query_as::<_, Product>(&sql)
                    .bind(id)
                    .bind(&model.name)
                    .bind(&model.description)
                    .bind(model.price)
                    .fetch_optional(&self.pool)
                    .await?
                    .ok_or(DbError::NotFound)?
            }
        };
        Ok(saved)
    }

    async fn find_by_id(&self, pk: i64) -> Result<Option<Product>> {
        self.ensure_schema().await?;
        let sql = format!(
            r#"SELECT id, name, description, price FROM "{PRODUCT_TABLE}" WHERE id = $1"#
        );
        let row = sqlx::query_as::<_, Product>(&sql)
            .bind(pk)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row)
    }

    async fn find_all(&self) -> Result<Vec<Product>> {
        self.ensure_schema().await?;
        let sql = format!(
            r#"SELECT id, name, description, price FROM "{PRODUCT_TABLE}" ORDER BY id ASC"#
        );
        let rows = sqlx::query_as::<_, Product>(&sql)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows)
    }

    async fn delete(&self, model: &Product) -> Result<u64> {
        let id = model.id.ok_or(DbError::MissingKey)?;
        self.ensure_schema().await?;
        let sql = format!(r#"DELETE FROM "{PRODUCT_TABLE}" WHERE id = $1"#);
        let done = sqlx::query(&sql).bind(id).execute(&self.pool).await?;
        Ok(done.rows_affected())
    }
}
