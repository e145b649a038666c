use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;
use anyhow::{Context, Result};

use crate::messages::Locale;

/// Client configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    // Logging
    pub rust_log: String,

    // Backend
    pub api_base_url: String,
    pub request_timeout_secs: u64,

    // Credential storage
    pub token_store_path: PathBuf,
    pub token_storage_key: String,

    // Notifications console
    pub notifications_page_size: u32,
    pub notifications_sort: String,

    // Messages
    pub locale: Locale,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            rust_log: "info".to_string(),
            api_base_url: "http://localhost:8080/api".to_string(),
            request_timeout_secs: 30,
            token_store_path: PathBuf::from(".ecocollect/session.json"),
            token_storage_key: crate::storage::DEFAULT_TOKEN_KEY.to_string(),
            notifications_page_size: 10,
            notifications_sort: "createdAt,desc".to_string(),
            locale: Locale::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present
        dotenvy::dotenv().ok();

        let defaults = Config::default();

        let api_base_url = get_env("API_BASE_URL")
            .unwrap_or(defaults.api_base_url)
            .trim_end_matches('/')
            .to_string();

        let locale = parse_env("APP_LOCALE", defaults.locale)?;

        let notifications_page_size: u32 =
            parse_env("NOTIFICATIONS_PAGE_SIZE", defaults.notifications_page_size)?;
        if notifications_page_size == 0 {
            anyhow::bail!("NOTIFICATIONS_PAGE_SIZE must be greater than zero");
        }

        Ok(Self {
            rust_log: get_env_or_default("RUST_LOG", "info"),

            api_base_url,
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", defaults.request_timeout_secs)?,

            token_store_path: get_env("TOKEN_STORE_PATH")
                .map(PathBuf::from)
                .unwrap_or(defaults.token_store_path),
            token_storage_key: get_env_or_default(
                "TOKEN_STORAGE_KEY",
                crate::storage::DEFAULT_TOKEN_KEY,
            ),

            notifications_page_size,
            notifications_sort: get_env_or_default("NOTIFICATIONS_SORT", "createdAt,desc"),

            locale,
        })
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Absolute URL for an API path such as `/auth/login`.
    pub fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.api_base_url, path)
    }
}

fn get_env(key: &str) -> Result<String> {
    env::var(key).with_context(|| format!("Missing environment variable: {}", key))
}

fn get_env_or_default(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parsed value of `key`, or `default` when unset. A value that does not
/// parse is an error.
fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(key) {
        Ok(value) => value
            .trim()
            .parse()
            .with_context(|| format!("Invalid {}: {}", key, value)),
        Err(_) => Ok(default),
    }
}
