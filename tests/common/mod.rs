#![allow(dead_code)]

use std::sync::Arc;

use axum::{
    Router,
    body::{Body, to_bytes},
    http::{Request, Response},
};
use chrono::{DateTime, Duration, TimeZone, Utc};
use homepage::{
    AppState,
    config::Config,
    database::MemoryMomentStore,
    models::{Moment, MomentStatus, Visibility},
    routes,
};
use tower::ServiceExt;
use uuid::Uuid;

pub fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 3, 1, 12, 0, 0).unwrap()
}

pub fn published(minutes: i64, content: &str) -> Moment {
    let created = base_time() + Duration::minutes(minutes);
    Moment {
        id: Uuid::new_v4(),
        slug: None,
        content: content.to_string(),
        status: MomentStatus::Published,
        visibility: Visibility::Public,
        created_at: created,
        updated_at: created,
        scheduled_at: None,
    }
}

pub fn scheduled(at: DateTime<Utc>) -> Moment {
    Moment {
        status: MomentStatus::Scheduled,
        scheduled_at: Some(at),
        ..published(0, "scheduled")
    }
}

pub fn test_config() -> Config {
    Config {
        site_url: "https://example.com".into(),
        cron_secret: Some("cron-secret".into()),
        auth_secret: Some("auth-secret".into()),
        ..Config::default()
    }
}

pub fn app_with(store: Arc<MemoryMomentStore>, config: Config) -> Router {
    routes::router(AppState::new(store, config))
}

pub fn app(moments: Vec<Moment>) -> (Router, Arc<MemoryMomentStore>) {
    let store = Arc::new(MemoryMomentStore::new(moments));
    (app_with(store.clone(), test_config()), store)
}

pub fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

pub async fn send(app: &Router, req: Request<Body>) -> Response<Body> {
    app.clone().oneshot(req).await.unwrap()
}

pub async fn body_string(resp: Response<Body>) -> String {
    let bytes = to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn header<'a>(resp: &'a Response<Body>, name: &str) -> Option<&'a str> {
    resp.headers().get(name).and_then(|v| v.to_str().ok())
}
