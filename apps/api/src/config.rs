use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Application configuration loaded from environment variables.
/// Every variable is optional; invalid numbers fail startup.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    /// Allowed CORS origin. `*` allows any origin.
    pub cors_origin: String,
    /// Substring a job URL must contain to be accepted.
    pub job_url_marker: String,
    pub fetch_timeout: Duration,
    pub fetch_user_agent: String,
    pub max_upload_bytes: usize,
    /// Labels appended to the built-in skill taxonomy.
    pub extra_skills: Vec<String>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            port: 5001,
            rust_log: "info".to_string(),
            cors_origin: "http://localhost:3000".to_string(),
            job_url_marker: "linkedin.com/jobs".to_string(),
            fetch_timeout: Duration::from_secs(60),
            fetch_user_agent: DEFAULT_USER_AGENT.to_string(),
            max_upload_bytes: 10 * 1024 * 1024,
            extra_skills: Vec::new(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let defaults = Config::default();

        Ok(Config {
            port: parse_env("PORT", defaults.port)
                .context("PORT must be a valid port number")?,
            rust_log: optional_env("RUST_LOG").unwrap_or(defaults.rust_log),
            cors_origin: optional_env("CORS_ORIGIN").unwrap_or(defaults.cors_origin),
            job_url_marker: optional_env("JOB_URL_MARKER").unwrap_or(defaults.job_url_marker),
            fetch_timeout: parse_env("FETCH_TIMEOUT_SECS", defaults.fetch_timeout.as_secs())
                .map(Duration::from_secs)
                .context("FETCH_TIMEOUT_SECS must be a whole number of seconds")?,
            fetch_user_agent: optional_env("FETCH_USER_AGENT")
                .unwrap_or(defaults.fetch_user_agent),
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", defaults.max_upload_bytes)
                .context("MAX_UPLOAD_BYTES must be a byte count")?,
            extra_skills: optional_env("EXTRA_SKILLS")
                .map(|raw| split_labels(&raw))
                .unwrap_or_default(),
        })
    }
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("invalid value '{raw}' for {key}")),
        None => Ok(default),
    }
}

/// Comma-separated labels, trimmed, blanks dropped.
fn split_labels(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_labels() {
        assert_eq!(
            split_labels(" Rust, Kubernetes ,, Terraform "),
            vec!["Rust", "Kubernetes", "Terraform"]
        );
        assert!(split_labels(" , ").is_empty());
    }

    #[test]
    fn test_defaults() {
        let config = Config::default();
        assert_eq!(config.port, 5001);
        assert_eq!(config.job_url_marker, "linkedin.com/jobs");
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert_eq!(config.fetch_timeout, Duration::from_secs(60));
    }
}
