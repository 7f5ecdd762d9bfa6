use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{HeaderValue, Method, Request},
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{DateTime, TimeDelta, Utc};
use moka::policy::EvictionPolicy;
use moka::sync::Cache;

use crate::{AppState, error::AppError, routes::cron, utils::client_ip};

pub const DEFAULT_CAPACITY: u64 = 1000;
pub const DEFAULT_TTL: Duration = Duration::from_secs(60 * 60);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateLimitDecision {
    pub allowed: bool,
    pub remaining: u32,
    pub reset_at: DateTime<Utc>,
}

/// 进程内的尝试次数计数器
///
/// 条目在最后一次写入后 `ttl` 过期；超过容量时按最近最少使用淘汰，与 TTL 无关。
/// 多进程部署时每个进程各自计数，不是全局限制。
#[derive(Clone)]
pub struct RateLimiter {
    attempts: Cache<String, u32>,
    ttl: Duration,
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY, DEFAULT_TTL)
    }
}

impl RateLimiter {
    pub fn new(capacity: u64, ttl: Duration) -> Self {
        let attempts = Cache::builder()
            .max_capacity(capacity)
            .time_to_live(ttl)
            .eviction_policy(EvictionPolicy::lru())
            .build();

        Self { attempts, ttl }
    }

    // 拒绝时的 reset_at 是 now + ttl 的估计值，不是该条目实际剩余的过期时间
    fn reset_at(&self) -> DateTime<Utc> {
        Utc::now() + TimeDelta::from_std(self.ttl).unwrap_or(TimeDelta::hours(1))
    }

    pub fn check(&self, key: &str, max_attempts: u32) -> RateLimitDecision {
        let count = self.attempts.get(key).unwrap_or(0);

        if count >= max_attempts {
            tracing::warn!(key = %key, count, max_attempts, "rate limit exceeded");
            return RateLimitDecision {
                allowed: false,
                remaining: 0,
                reset_at: self.reset_at(),
            };
        }

        self.attempts.insert(key.to_string(), count + 1);
        RateLimitDecision {
            allowed: true,
            remaining: max_attempts - count - 1,
            reset_at: self.reset_at(),
        }
    }

    pub fn reset(&self, key: &str) {
        self.attempts.invalidate(key);
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// 当前条目数（会先执行挂起的淘汰任务）
    pub fn len(&self) -> u64 {
        self.attempts.run_pending_tasks();
        self.attempts.entry_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

// 这些路径由处理器自己计数，成功后清零
const SELF_LIMITED_PATHS: &[&str] = &[cron::PUBLISH_PATH];

fn is_mutating(method: &Method) -> bool {
    matches!(
        *method,
        Method::POST | Method::PUT | Method::PATCH | Method::DELETE
    )
}

fn is_gated(method: &Method, path: &str) -> bool {
    is_mutating(method) && !SELF_LIMITED_PATHS.contains(&path)
}

/// 对写操作按 IP + 方法 + 路径限流
pub async fn rate_limit(State(state): State<AppState>, req: Request<Body>, next: Next) -> Response {
    if !is_gated(req.method(), req.uri().path()) {
        return next.run(req).await;
    }

    let ip = client_ip(&req);
    let key = format!("rate_limit:{}:{}:{}", ip, req.method(), req.uri().path());
    let decision = state
        .rate_limiter
        .check(&key, state.config.rate_limit_requests);

    if !decision.allowed {
        let retry_after_secs = (decision.reset_at - Utc::now()).num_seconds().max(0) as u64;
        return AppError::RateLimited { retry_after_secs }.into_response();
    }

    let mut response = next.run(req).await;
    if let Ok(value) = HeaderValue::from_str(&decision.remaining.to_string()) {
        response.headers_mut().insert("x-ratelimit-remaining", value);
    }
    response
}
