use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use chrono::{DateTime, Utc};
use futures_util::future::BoxFuture;

use crate::database::MomentStore;
use crate::models::{Moment, MomentStatus};

/// 进程内的动态存储。未配置 DATABASE_URL 时使用，测试中也用它代替 Postgres
#[derive(Debug)]
pub struct MemoryMomentStore {
    moments: RwLock<Vec<Moment>>,
    available: AtomicBool,
}

impl Default for MemoryMomentStore {
    fn default() -> Self {
        Self::new(Vec::new())
    }
}

impl MemoryMomentStore {
    pub fn new(moments: Vec<Moment>) -> Self {
        Self {
            moments: RwLock::new(moments),
            available: AtomicBool::new(true),
        }
    }

    pub fn insert(&self, moment: Moment) {
        self.write().push(moment);
    }

    /// 模拟数据源不可用，之后的所有操作都返回错误
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
    }

    fn check(&self) -> Result<(), sqlx::Error> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(sqlx::Error::PoolTimedOut)
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, Vec<Moment>> {
        self.moments.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, Vec<Moment>> {
        self.moments.write().unwrap_or_else(|e| e.into_inner())
    }

    fn sorted(&self, filter: impl Fn(&Moment) -> bool) -> Vec<Moment> {
        let mut moments: Vec<Moment> = self.read().iter().filter(|m| filter(*m)).cloned().collect();
        moments.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        moments
    }
}

impl MomentStore for MemoryMomentStore {
    fn recent_public(&self, limit: i64) -> BoxFuture<'_, Result<Vec<Moment>, sqlx::Error>> {
        Box::pin(async move {
            self.check()?;
            let mut moments = self.sorted(Moment::is_listed);
            moments.truncate(usize::try_from(limit).unwrap_or(0));
            Ok(moments)
        })
    }

    fn find_public<'a>(
        &'a self,
        key: &'a str,
    ) -> BoxFuture<'a, Result<Option<Moment>, sqlx::Error>> {
        Box::pin(async move {
            self.check()?;
            Ok(self
                .read()
                .iter()
                .find(|m| m.is_listed() && m.matches_key(key))
                .cloned())
        })
    }

    fn publish_due(&self, now: DateTime<Utc>) -> BoxFuture<'_, Result<u64, sqlx::Error>> {
        Box::pin(async move {
            self.check()?;
            let mut updated = 0;
            for moment in self.write().iter_mut() {
                let due = moment.scheduled_at.is_some_and(|at| at <= now);
                if moment.status == MomentStatus::Scheduled && due {
                    moment.status = MomentStatus::Published;
                    moment.updated_at = now;
                    updated += 1;
                }
            }
            Ok(updated)
        })
    }

    fn all(&self) -> BoxFuture<'_, Result<Vec<Moment>, sqlx::Error>> {
        Box::pin(async move {
            self.check()?;
            Ok(self.sorted(|_| true))
        })
    }

    fn ping(&self) -> BoxFuture<'_, Result<(), sqlx::Error>> {
        Box::pin(async move { self.check() })
    }
}
