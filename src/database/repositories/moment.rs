// 动态存储库
// Postgres 上的动态查询与定时发布

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::future::BoxFuture;
use sqlx::PgPool;

use crate::database::MomentStore;
use crate::models::Moment;

const MOMENT_COLUMNS: &str =
    "id, slug, content, status, visibility, created_at, updated_at, scheduled_at";

/// 动态存储库，处理所有与动态相关的数据库操作
#[derive(Clone)]
pub struct MomentRepository {
    db: Arc<PgPool>,
}

impl MomentRepository {
    pub fn new(db: Arc<PgPool>) -> Self {
        Self { db }
    }

    pub async fn find_recent_public(&self, limit: i64) -> Result<Vec<Moment>, sqlx::Error> {
        let sql = format!(
            r#"
            SELECT {MOMENT_COLUMNS} FROM moments
            WHERE status = 'published' AND visibility = 'public'
            ORDER BY created_at DESC, id DESC
            LIMIT $1
            "#
        );
        sqlx::query_as::<_, Moment>(&sql)
            .bind(limit)
            .fetch_all(&*self.db)
            .await
    }

    pub async fn find_public_by_key(&self, key: &str) -> Result<Option<Moment>, sqlx::Error> {
        let sql = format!(
            r#"
            SELECT {MOMENT_COLUMNS} FROM moments
            WHERE (slug = $1 OR id::text = $1)
              AND status = 'published' AND visibility = 'public'
            LIMIT 1
            "#
        );
        sqlx::query_as::<_, Moment>(&sql)
            .bind(key)
            .fetch_optional(&*self.db)
            .await
    }

    pub async fn publish_scheduled(&self, now: DateTime<Utc>) -> Result<u64, sqlx::Error> {
        let result = sqlx::query(
            r#"
            UPDATE moments
            SET status = 'published', updated_at = $1
            WHERE status = 'scheduled' AND scheduled_at IS NOT NULL AND scheduled_at <= $1
            "#,
        )
        .bind(now)
        .execute(&*self.db)
        .await?;

        Ok(result.rows_affected())
    }

    pub async fn find_all(&self) -> Result<Vec<Moment>, sqlx::Error> {
        let sql = format!("SELECT {MOMENT_COLUMNS} FROM moments ORDER BY created_at DESC, id DESC");
        sqlx::query_as::<_, Moment>(&sql).fetch_all(&*self.db).await
    }
}

impl MomentStore for MomentRepository {
    fn recent_public(&self, limit: i64) -> BoxFuture<'_, Result<Vec<Moment>, sqlx::Error>> {
        Box::pin(self.find_recent_public(limit))
    }

    fn find_public<'a>(
        &'a self,
        key: &'a str,
    ) -> BoxFuture<'a, Result<Option<Moment>, sqlx::Error>> {
        Box::pin(self.find_public_by_key(key))
    }

    fn publish_due(&self, now: DateTime<Utc>) -> BoxFuture<'_, Result<u64, sqlx::Error>> {
        Box::pin(self.publish_scheduled(now))
    }

    fn all(&self) -> BoxFuture<'_, Result<Vec<Moment>, sqlx::Error>> {
        Box::pin(self.find_all())
    }

    fn ping(&self) -> BoxFuture<'_, Result<(), sqlx::Error>> {
        Box::pin(async move {
            sqlx::query("SELECT 1").execute(&*self.db).await?;
            Ok(())
        })
    }
}
