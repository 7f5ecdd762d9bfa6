use axum::{
    Json,
    body::Body,
    extract::{Query, State},
    http::Request,
};
use chrono::Utc;
use serde::{Deserialize, Serialize};

use crate::{
    AppState,
    error::{AppError, AppResult},
    utils::{client_ip, secrets_match},
};

pub const PUBLISH_PATH: &str = "/api/cron/publish-scheduled-moments";

/// 每个客户端在一个窗口内允许的调用次数，成功后清零
pub const CRON_MAX_ATTEMPTS: u32 = 10;

#[derive(Debug, Deserialize)]
pub struct CronQuery {
    secret: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PublishResponse {
    pub updated: u64,
}

// 密钥可以放在 x-cron-secret 头或 secret 查询参数中
fn provided_secret<'a>(req: &'a Request<Body>, query: &'a CronQuery) -> Option<&'a str> {
    req.headers()
        .get("x-cron-secret")
        .and_then(|h| h.to_str().ok())
        .or(query.secret.as_deref())
        .filter(|s| !s.is_empty())
}

/// 把到期的定时动态改为已发布
pub async fn publish_scheduled_moments(
    State(state): State<AppState>,
    Query(query): Query<CronQuery>,
    req: Request<Body>,
) -> AppResult<Json<PublishResponse>> {
    let key = format!("cron:{}", client_ip(&req));
    let decision = state.rate_limiter.check(&key, CRON_MAX_ATTEMPTS);
    if !decision.allowed {
        let retry_after_secs = (decision.reset_at - Utc::now()).num_seconds().max(0) as u64;
        return Err(AppError::RateLimited { retry_after_secs });
    }

    let authorized = match (state.config.cron_secret.as_deref(), provided_secret(&req, &query)) {
        (Some(expected), Some(provided)) => secrets_match(provided, expected),
        _ => false,
    };
    if !authorized {
        tracing::warn!(key = %key, remaining = decision.remaining, "rejected cron request");
        return Err(AppError::Forbidden);
    }
    state.rate_limiter.reset(&key);

    let updated = state.store.publish_due(Utc::now()).await?;
    tracing::info!(updated, "published scheduled moments");

    Ok(Json(PublishResponse { updated }))
}
