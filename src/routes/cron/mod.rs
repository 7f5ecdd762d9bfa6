mod handler;

pub use handler::{CRON_MAX_ATTEMPTS, PUBLISH_PATH, PublishResponse, publish_scheduled_moments};
