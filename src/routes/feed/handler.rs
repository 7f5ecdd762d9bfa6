use axum::{
    Json,
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};
use chrono::Utc;

use crate::{
    AppState,
    error::AppResult,
    feed::{self, FEED_CACHE_CONTROL, FEED_LIMIT, SITEMAP_LIMIT},
};

// 数据源失败时直接返回 5xx，不能输出空 feed（否则与“没有动态”无法区分）

pub async fn json_feed(State(state): State<AppState>) -> AppResult<Response> {
    let moments = state.store.recent_public(FEED_LIMIT as i64).await?;
    let body = feed::json_feed(&moments, &state.config.site_url);
    tracing::debug!(items = body.items.len(), "rendered json feed");

    Ok((
        [
            (header::CONTENT_TYPE, "application/feed+json; charset=utf-8"),
            (header::CACHE_CONTROL, FEED_CACHE_CONTROL),
        ],
        Json(body),
    )
        .into_response())
}

pub async fn rss_feed(State(state): State<AppState>) -> AppResult<Response> {
    let moments = state.store.recent_public(FEED_LIMIT as i64).await?;
    let body = feed::rss(&moments, &state.config.site_url, Utc::now());

    Ok((
        [
            (header::CONTENT_TYPE, "application/rss+xml; charset=utf-8"),
            (header::CACHE_CONTROL, FEED_CACHE_CONTROL),
        ],
        body,
    )
        .into_response())
}

pub async fn sitemap(State(state): State<AppState>) -> AppResult<Response> {
    let moments = state.store.recent_public(SITEMAP_LIMIT as i64).await?;
    let body = feed::sitemap(&moments, &state.config.site_url);

    Ok((
        [
            (header::CONTENT_TYPE, "application/xml"),
            (header::CACHE_CONTROL, FEED_CACHE_CONTROL),
        ],
        body,
    )
        .into_response())
}
