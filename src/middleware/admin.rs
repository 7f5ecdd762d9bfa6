use axum::{
    body::Body,
    extract::State,
    http::Request,
    middleware::Next,
    response::Response,
};

use crate::{
    AppState,
    error::AppError,
    locale::Locale,
    utils::{bearer_token, verify_token},
};

/// 管理员接口：先检查功能开关，再校验会话令牌和角色
pub async fn require_admin(
    State(state): State<AppState>,
    mut request: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    // 功能关闭时当作不存在
    if !state.config.admin_export_enabled {
        return Err(AppError::NotFound(Locale::En));
    }

    let secret = state.config.auth_secret.as_deref().ok_or_else(|| {
        tracing::warn!("admin route called but AUTH_SECRET is not configured");
        AppError::Unauthorized
    })?;

    let token = bearer_token(request.headers()).ok_or(AppError::Unauthorized)?;
    let claims = verify_token(token, secret).map_err(|e| {
        tracing::debug!(error = %e, "rejected admin token");
        AppError::Unauthorized
    })?;

    if !claims.is_admin() {
        tracing::warn!(sub = %claims.sub, role = %claims.role, "non-admin session on admin route");
        return Err(AppError::Forbidden);
    }

    request.extensions_mut().insert(claims);
    Ok(next.run(request).await)
}
