// 数据库模块
// 动态（moment）的读取与定时发布都经过 MomentStore

pub mod memory;
pub mod repositories;

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::future::BoxFuture;
use sqlx::Executor;
use sqlx::postgres::PgPoolOptions;

use crate::{config::Config, models::Moment};

pub use memory::MemoryMomentStore;
pub use repositories::moment::MomentRepository;

/// 动态数据源。处理器只依赖这个 trait，便于测试时注入内存实现
pub trait MomentStore: Send + Sync {
    /// 最近发布的公开动态，按创建时间倒序，最多 `limit` 条
    fn recent_public(&self, limit: i64) -> BoxFuture<'_, Result<Vec<Moment>, sqlx::Error>>;

    /// 通过 slug 或 id 查找单条公开动态
    fn find_public<'a>(&'a self, key: &'a str)
    -> BoxFuture<'a, Result<Option<Moment>, sqlx::Error>>;

    /// 把到期的定时动态改为已发布，返回更新条数
    fn publish_due(&self, now: DateTime<Utc>) -> BoxFuture<'_, Result<u64, sqlx::Error>>;

    /// 全部动态（管理员导出）
    fn all(&self) -> BoxFuture<'_, Result<Vec<Moment>, sqlx::Error>>;

    fn ping(&self) -> BoxFuture<'_, Result<(), sqlx::Error>>;
}

/// 连接 Postgres 并执行迁移
///
/// 没有 `DATABASE_URL` 时直接失败：空的数据源会让 feed 返回 200 和零条目，
/// 与“没有动态”无法区分。
pub async fn connect(config: &Config) -> Result<Arc<dyn MomentStore>, sqlx::Error> {
    let Some(database_url) = config.database_url.as_deref() else {
        return Err(sqlx::Error::Configuration("DATABASE_URL is not set".into()));
    };

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .after_connect(|conn, _meta| {
            Box::pin(async move {
                conn.execute("SET application_name = 'homepage';").await?;
                Ok(())
            })
        })
        .connect(database_url)
        .await?;

    sqlx::migrate!("./migrations").run(&pool).await?;
    tracing::info!("database migrations applied");

    Ok(Arc::new(MomentRepository::new(Arc::new(pool))))
}
