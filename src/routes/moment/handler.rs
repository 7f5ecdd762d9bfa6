use axum::{
    Extension,
    extract::{Path, State},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};

use crate::{
    AppState,
    error::{AppError, AppResult},
    feed::FEED_LIMIT,
    locale::{Locale, messages},
};

use super::view;

/// 首页展示的最新动态条数
pub const HOME_LIMIT: i64 = 5;

const MAX_KEY_LEN: usize = 128;

pub async fn home(
    Extension(locale): Extension<Locale>,
    State(state): State<AppState>,
) -> AppResult<Html<String>> {
    let moments = state.store.recent_public(HOME_LIMIT).await?;
    Ok(Html(view::home(locale, &moments).into_string()))
}

pub async fn list(
    Extension(locale): Extension<Locale>,
    State(state): State<AppState>,
) -> AppResult<Html<String>> {
    let moments = state.store.recent_public(FEED_LIMIT as i64).await?;
    Ok(Html(view::list(locale, &moments).into_string()))
}

pub async fn detail(
    Extension(locale): Extension<Locale>,
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> AppResult<Response> {
    if key.len() > MAX_KEY_LEN {
        return Err(AppError::Validation("moment key is too long".into()));
    }

    match state.store.find_public(&key).await? {
        Some(moment) => Ok(Html(view::detail(locale, &moment).into_string()).into_response()),
        None => {
            tracing::debug!(key = %key, %locale, "moment not found");
            let page = view::not_found(locale, messages(locale).not_found);
            Ok((StatusCode::NOT_FOUND, Html(page.into_string())).into_response())
        }
    }
}
