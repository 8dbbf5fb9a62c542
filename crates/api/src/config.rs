use std::str::FromStr;
use std::time::Duration;

use anyhow::Context;
use geowarns_core::tasks::{DEFAULT_RETENTION_DAYS, MAX_RETENTION_DAYS};

/// Webhook receiver used when `WEBHOOK_URL` is not set.
pub const DEFAULT_WEBHOOK_URL: &str = "http://localhost:9090/webhook";

/// Server configuration loaded from environment variables.
///
/// All fields have defaults suitable for local development. `DATABASE_URL`
/// is read separately by the binary.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `8080`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// How long shutdown waits for background jobs, in seconds (default: `10`).
    pub shutdown_timeout_secs: u64,
    /// Destination for outbound notifications.
    pub webhook_url: String,
    /// Per-request timeout for outbound notifications (default: `30`).
    pub webhook_timeout_secs: u64,
    /// Seconds between dispatcher cycles (default: `30`).
    pub dispatch_interval_secs: u64,
    /// Maximum concurrent deliveries per cycle (default: `16`).
    pub dispatch_concurrency: usize,
    /// Age in days after which webhook tasks are purged (default: `30`).
    pub task_retention_days: i64,
}

impl ServerConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                  | Default                         |
    /// |--------------------------|---------------------------------|
    /// | `HOST`                   | `0.0.0.0`                       |
    /// | `PORT`                   | `8080`                          |
    /// | `CORS_ORIGINS`           | `http://localhost:5173`         |
    /// | `REQUEST_TIMEOUT_SECS`   | `30`                            |
    /// | `SHUTDOWN_TIMEOUT_SECS`  | `10`                            |
    /// | `WEBHOOK_URL`            | `http://localhost:9090/webhook` |
    /// | `WEBHOOK_TIMEOUT_SECS`   | `30`                            |
    /// | `DISPATCH_INTERVAL_SECS` | `30`                            |
    /// | `DISPATCH_CONCURRENCY`   | `16`                            |
    /// | `TASK_RETENTION_DAYS`    | `30`                            |
    pub fn from_env() -> anyhow::Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> anyhow::Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| "0.0.0.0".into());
        let port = parse_or(&lookup, "PORT", 8080u16)?;

        let cors_origins: Vec<String> = lookup("CORS_ORIGINS")
            .unwrap_or_else(|| "http://localhost:5173".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs = parse_or(&lookup, "REQUEST_TIMEOUT_SECS", 30u64)?;
        let shutdown_timeout_secs = parse_or(&lookup, "SHUTDOWN_TIMEOUT_SECS", 10u64)?;

        let webhook_url = match lookup("WEBHOOK_URL").filter(|v| !v.trim().is_empty()) {
            Some(url) => url,
            None => {
                tracing::warn!(
                    default = DEFAULT_WEBHOOK_URL,
                    "WEBHOOK_URL not set, using default receiver"
                );
                DEFAULT_WEBHOOK_URL.to_string()
            }
        };

        let webhook_timeout_secs = parse_or(&lookup, "WEBHOOK_TIMEOUT_SECS", 30u64)?;
        let dispatch_interval_secs = parse_or(&lookup, "DISPATCH_INTERVAL_SECS", 30u64)?;
        let dispatch_concurrency = parse_or(&lookup, "DISPATCH_CONCURRENCY", 16usize)?;
        let task_retention_days = parse_or(&lookup, "TASK_RETENTION_DAYS", DEFAULT_RETENTION_DAYS)?;

        anyhow::ensure!(
            dispatch_interval_secs > 0,
            "DISPATCH_INTERVAL_SECS must be greater than zero"
        );
        anyhow::ensure!(
            (1..=MAX_RETENTION_DAYS).contains(&task_retention_days),
            "TASK_RETENTION_DAYS must be between 1 and {MAX_RETENTION_DAYS}, got {task_retention_days}"
        );

        Ok(Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            shutdown_timeout_secs,
            webhook_url,
            webhook_timeout_secs,
            dispatch_interval_secs,
            dispatch_concurrency,
            task_retention_days,
        })
    }

    pub fn webhook_timeout(&self) -> Duration {
        Duration::from_secs(self.webhook_timeout_secs)
    }

    pub fn dispatch_interval(&self) -> Duration {
        Duration::from_secs(self.dispatch_interval_secs)
    }

    pub fn shutdown_timeout(&self) -> Duration {
        Duration::from_secs(self.shutdown_timeout_secs)
    }
}

/// Parse `key` if present, otherwise fall back to `default`.
fn parse_or<F, T>(lookup: &F, key: &str, default: T) -> anyhow::Result<T>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse()
            .with_context(|| format!("{key} has an invalid value '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn config_from(pairs: &[(&str, &str)]) -> anyhow::Result<ServerConfig> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        ServerConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_apply_when_unset() {
        let config = config_from(&[]).unwrap();

        assert_eq!(config.host, "0.0.0.0");
        assert_eq!(config.port, 8080);
        assert_eq!(config.cors_origins, vec!["http://localhost:5173"]);
        assert_eq!(config.request_timeout_secs, 30);
        assert_eq!(config.shutdown_timeout_secs, 10);
        assert_eq!(config.webhook_url, DEFAULT_WEBHOOK_URL);
        assert_eq!(config.webhook_timeout_secs, 30);
        assert_eq!(config.dispatch_interval_secs, 30);
        assert_eq!(config.dispatch_concurrency, 16);
        assert_eq!(config.task_retention_days, 30);
    }

    #[test]
    fn overrides_are_parsed() {
        let config = config_from(&[
            ("PORT", "9000"),
            ("CORS_ORIGINS", "http://a.test, http://b.test,"),
            ("WEBHOOK_URL", "http://hooks.test/in"),
            ("DISPATCH_CONCURRENCY", "4"),
        ])
        .unwrap();

        assert_eq!(config.port, 9000);
        assert_eq!(config.cors_origins, vec!["http://a.test", "http://b.test"]);
        assert_eq!(config.webhook_url, "http://hooks.test/in");
        assert_eq!(config.dispatch_concurrency, 4);
    }

    #[test]
    fn blank_webhook_url_falls_back_to_default() {
        let config = config_from(&[("WEBHOOK_URL", "  ")]).unwrap();
        assert_eq!(config.webhook_url, DEFAULT_WEBHOOK_URL);
    }

    #[test]
    fn invalid_number_names_the_variable() {
        let err = config_from(&[("PORT", "eighty")]).unwrap_err();
        assert!(err.to_string().contains("PORT"));
    }

    #[test]
    fn zero_interval_is_rejected() {
        assert!(config_from(&[("DISPATCH_INTERVAL_SECS", "0")]).is_err());
    }

    #[test]
    fn retention_days_must_be_in_range() {
        for raw in ["0", "-1", "3651", "100000000"] {
            let err = config_from(&[("TASK_RETENTION_DAYS", raw)]).unwrap_err();
            assert!(err.to_string().contains("TASK_RETENTION_DAYS"), "{raw}: {err}");
        }
        let config = config_from(&[("TASK_RETENTION_DAYS", "3650")]).unwrap();
        assert_eq!(config.task_retention_days, MAX_RETENTION_DAYS);
    }
}
