use std::env;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid value for {key}: {value}")]
    Invalid { key: &'static str, value: String },
}

#[derive(Debug, Clone)]
pub struct Config {
    pub site_url: String,
    pub database_url: Option<String>,
    pub cron_secret: Option<String>,
    pub auth_secret: Option<String>,
    pub admin_export_enabled: bool,
    pub server_host: String,
    pub server_port: u16,
    pub rate_limit_capacity: u64,
    pub rate_limit_ttl_secs: u64,
    pub rate_limit_requests: u32,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            site_url: "http://localhost:3000".into(),
            database_url: None,
            cron_secret: None,
            auth_secret: None,
            admin_export_enabled: false,
            server_host: "0.0.0.0".into(),
            server_port: 3000,
            rate_limit_capacity: 1000,
            rate_limit_ttl_secs: 3600,
            rate_limit_requests: 30,
        }
    }
}

// 空字符串视为未设置
fn optional(key: &str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn parse_or<T: std::str::FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match optional(key) {
        Some(value) => value
            .parse()
            .map_err(|_| ConfigError::Invalid { key, value }),
        None => Ok(default),
    }
}

fn parse_flag(key: &'static str, value: Option<String>) -> Result<bool, ConfigError> {
    match value.as_deref().map(str::to_ascii_lowercase).as_deref() {
        None => Ok(false),
        Some("1" | "true" | "yes" | "on") => Ok(true),
        Some("0" | "false" | "no" | "off") => Ok(false),
        Some(_) => Err(ConfigError::Invalid {
            key,
            value: value.unwrap_or_default(),
        }),
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        let defaults = Config::default();

        let site_url = optional("NEXT_PUBLIC_SITE_URL")
            .unwrap_or(defaults.site_url)
            .trim_end_matches('/')
            .to_string();

        let config = Config {
            site_url,
            database_url: optional("DATABASE_URL"),
            cron_secret: optional("CRON_SECRET"),
            auth_secret: optional("AUTH_SECRET"),
            admin_export_enabled: parse_flag(
                "ADMIN_EXPORT_ENABLED",
                optional("ADMIN_EXPORT_ENABLED"),
            )?,
            server_host: optional("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: parse_or("SERVER_PORT", defaults.server_port)?,
            rate_limit_capacity: parse_or("RATE_LIMIT_CAPACITY", defaults.rate_limit_capacity)?,
            rate_limit_ttl_secs: parse_or("RATE_LIMIT_TTL_SECS", defaults.rate_limit_ttl_secs)?,
            rate_limit_requests: parse_or("RATE_LIMIT_REQUESTS", defaults.rate_limit_requests)?,
        };

        tracing::info!(
            site_url = %config.site_url,
            database = config.database_url.is_some(),
            cron_secret = config.cron_secret.is_some(),
            admin_export = config.admin_export_enabled,
            "configuration loaded"
        );

        Ok(config)
    }

    pub fn rate_limit_ttl(&self) -> Duration {
        Duration::from_secs(self.rate_limit_ttl_secs)
    }
}
