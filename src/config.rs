//! Client configuration parsed from environment variables.
//!
//! Everything here is fixed when the client is built. The client keeps an
//! `Arc<ApiConfig>` and never mutates it.

use std::time::Duration;

use reqwest::header::{CONTENT_TYPE, HeaderMap, HeaderValue};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:3000/api";
pub const DEFAULT_LOGIN_URL: &str = "/auth/login";
pub const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Storage key the bearer token lives under.
pub const AUTH_TOKEN_KEY: &str = "authToken";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub base_url: String,
    pub timeout: Duration,
    pub default_headers: HeaderMap,
    /// Where the session guard sends the user after a 401.
    pub login_url: String,
}

impl ApiConfig {
    /// Config for an explicit base URL with every other setting at its default.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        Self {
            base_url: normalize_base_url(&base_url.into()),
            timeout: Duration::from_secs(REQUEST_TIMEOUT_SECS),
            default_headers,
            login_url: DEFAULT_LOGIN_URL.to_owned(),
        }
    }

    /// Build config from environment variables.
    ///
    /// Optional:
    /// - `NYAYASETU_API_BASE_URL`: backend base URL
    /// - `VITE_API_BASE_URL`: fallback for deployments sharing the web app's `.env`
    /// - `NYAYASETU_LOGIN_URL`: redirect target on 401, default `/auth/login`
    #[must_use]
    pub fn from_env() -> Self {
        let base_url = env_non_empty("NYAYASETU_API_BASE_URL")
            .or_else(|| env_non_empty("VITE_API_BASE_URL"))
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_owned());

        let mut config = Self::new(base_url);
        if let Some(login_url) = env_non_empty("NYAYASETU_LOGIN_URL") {
            config.login_url = login_url;
        }
        config
    }

    /// Join `path` onto the base URL. `path` is expected to start with `/`.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{path}", self.base_url)
        } else {
            format!("{}/{path}", self.base_url)
        }
    }
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::new(DEFAULT_API_BASE_URL)
    }
}

fn env_non_empty(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim().trim_end_matches('/').to_owned()
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
