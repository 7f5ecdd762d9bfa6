mod handler;

pub use handler::{json_feed, rss_feed, sitemap};
