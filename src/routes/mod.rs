pub mod admin;
pub mod cron;
pub mod feed;
pub mod health;
pub mod moment;

use axum::{
    Router,
    http::Uri,
    response::IntoResponse,
    routing::{get, post},
};

use crate::{
    AppState,
    error::AppError,
    locale::resolve_locale_from_pathname,
    middleware::{locale_redirect, log_errors, rate_limit, require_admin},
};

async fn not_found(uri: Uri) -> impl IntoResponse {
    AppError::NotFound(resolve_locale_from_pathname(uri.path()))
}

/// 构建完整的路由
///
/// 页面在默认语言（无前缀）、`/zh` 和 `/en` 下各注册一次；
/// feed、cron、health 不带语言前缀。
pub fn router(state: AppState) -> Router {
    let pages = Router::new()
        .route("/", get(moment::home))
        .route("/moments", get(moment::list))
        .route("/m/{key}", get(moment::detail));

    let admin_routes = Router::new()
        .route("/api/admin/moments/export", get(admin::export_moments))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            require_admin,
        ));

    Router::new()
        .merge(pages.clone())
        .nest("/zh", pages.clone())
        .nest("/en", pages)
        .route("/m/feed.json", get(feed::json_feed))
        .route("/m/rss.xml", get(feed::rss_feed))
        .route("/m/sitemap.xml", get(feed::sitemap))
        .route(cron::PUBLISH_PATH, post(cron::publish_scheduled_moments))
        .route("/api/health", get(health::health_check))
        .merge(admin_routes)
        .fallback(not_found)
        .layer(axum::middleware::from_fn(locale_redirect))
        .layer(axum::middleware::from_fn(log_errors))
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            rate_limit,
        ))
        .with_state(state)
}
