use sqlx::postgres::{PgConnectOptions, PgPool, PgPoolOptions};
use std::time::Duration;

use crate::comm::settings::DatabaseSettings;
use crate::db::error::{DbError, Result};

/// 连接选项：优先使用显式 URL，否则按 host/port/user/pass/name 拼装
fn connect_options(settings: &DatabaseSettings) -> Result<PgConnectOptions> {
    match &settings.url {
        Some(url) => url
            .parse::<PgConnectOptions>()
            .map_err(|e| DbError::Config(format!("无效的数据库 URL: {}", e))),
        None => Ok(PgConnectOptions::new()
            .host(&settings.host)
            .port(settings.port)
            .username(&settings.user)
            .password(&settings.pass)
            .database(&settings.name)),
    }
}

/// 构建 PostgreSQL 连接池（lazy，启动时不要求数据库可达）
pub fn connect_pool(settings: &DatabaseSettings) -> Result<PgPool> {
    let options = connect_options(settings)?;
    let pool = PgPoolOptions::new()
        .max_connections(settings.max_open)
        .acquire_timeout(Duration::from_secs(5))
        .connect_lazy_with(options);
    tracing::info!(
        max_open = settings.max_open,
        "[db] postgres pool initialized (lazy)"
    );
    Ok(pool)
}
