use axum::{
    body::Body,
    http::{Request, header},
    middleware::Next,
    response::{IntoResponse, Redirect, Response},
};

use crate::locale::{LocaleDecision, resolve_request};

/// 页面请求先经过语言解析：需要时重定向，否则把解析出的 Locale 放进请求扩展
pub async fn locale_redirect(mut req: Request<Body>, next: Next) -> Response {
    let accept_language = req
        .headers()
        .get(header::ACCEPT_LANGUAGE)
        .and_then(|h| h.to_str().ok());

    match resolve_request(req.uri().path(), accept_language) {
        LocaleDecision::Redirect {
            location,
            permanent,
        } => {
            // 保留查询参数
            let location = match req.uri().query() {
                Some(query) => format!("{location}?{query}"),
                None => location,
            };
            tracing::debug!(from = %req.uri().path(), to = %location, permanent, "locale redirect");
            if permanent {
                Redirect::permanent(&location).into_response()
            } else {
                Redirect::temporary(&location).into_response()
            }
        }
        LocaleDecision::Render(locale) => {
            req.extensions_mut().insert(locale);
            next.run(req).await
        }
    }
}
