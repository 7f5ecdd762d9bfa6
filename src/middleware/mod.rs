mod admin;
mod error_handler;
mod locale;
mod rate_limit;

pub use admin::require_admin;
pub use error_handler::log_errors;
pub use locale::locale_redirect;
pub use rate_limit::{DEFAULT_CAPACITY, DEFAULT_TTL, RateLimitDecision, RateLimiter, rate_limit};
