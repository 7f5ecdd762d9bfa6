//! 容器健康探针：请求 /api/health，2xx 时退出码 0，否则 1

use std::process::ExitCode;
use std::time::Duration;

use tracing_subscriber::EnvFilter;

const TIMEOUT: Duration = Duration::from_secs(5);

fn health_url(explicit: Option<String>, port: Option<String>) -> String {
    if let Some(url) = explicit.filter(|u| !u.is_empty()) {
        return url;
    }
    let port = port.unwrap_or_else(|| "3000".into());
    format!("http://127.0.0.1:{port}/api/health")
}

#[tokio::main]
async fn main() -> ExitCode {
    // 探针的输出走 stderr，stdout 留给容器运行时
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let url = health_url(
        std::env::var("HEALTHCHECK_URL").ok(),
        std::env::var("SERVER_PORT").ok(),
    );
    let client = match reqwest::Client::builder().timeout(TIMEOUT).build() {
        Ok(client) => client,
        Err(e) => {
            tracing::error!(error = %e, "failed to build healthcheck client");
            return ExitCode::FAILURE;
        }
    };

    match client.get(&url).send().await {
        Ok(resp) if resp.status().is_success() => ExitCode::SUCCESS,
        Ok(resp) => {
            tracing::error!(%url, status = %resp.status(), "health endpoint returned an error");
            ExitCode::FAILURE
        }
        Err(e) => {
            tracing::error!(%url, error = %e, "health endpoint unreachable");
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_defaults_to_local_port() {
        assert_eq!(health_url(None, None), "http://127.0.0.1:3000/api/health");
        assert_eq!(
            health_url(None, Some("8080".into())),
            "http://127.0.0.1:8080/api/health"
        );
        assert_eq!(
            health_url(Some("http://app/api/health".into()), Some("8080".into())),
            "http://app/api/health"
        );
    }
}
