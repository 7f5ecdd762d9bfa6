use axum::{Extension, Json, extract::State};

use crate::{AppState, error::AppResult, models::Moment, utils::Claims};

/// 导出全部动态（包括草稿与定时动态）
pub async fn export_moments(
    Extension(claims): Extension<Claims>,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<Moment>>> {
    let moments = state.store.all().await?;
    tracing::info!(sub = %claims.sub, count = moments.len(), "admin export");
    Ok(Json(moments))
}
