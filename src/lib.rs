use std::sync::Arc;

use config::Config;
use database::MomentStore;
use middleware::RateLimiter;

pub mod config;
pub mod database;
pub mod error;
pub mod feed;
pub mod locale;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod utils;

#[derive(Clone)]
pub struct AppState {
    pub store: Arc<dyn MomentStore>,
    pub config: Config,
    pub rate_limiter: Arc<RateLimiter>,
}

impl AppState {
    /// 每个进程只构造一次，限流器随状态注入到各个处理器
    pub fn new(store: Arc<dyn MomentStore>, config: Config) -> Self {
        let rate_limiter = Arc::new(RateLimiter::new(
            config.rate_limit_capacity,
            config.rate_limit_ttl(),
        ));
        Self {
            store,
            config,
            rate_limiter,
        }
    }
}
