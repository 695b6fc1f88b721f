//! Application configuration

use crate::messages::Locale;
use std::path::PathBuf;

/// Base URL used when neither a flag nor the environment provides one
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";

/// Environment variable consulted for the API base URL
pub const API_URL_ENV: &str = "ANSLOOKUP_API_URL";

/// Default number of results requested per search
pub const DEFAULT_RESULT_LIMIT: u32 = 10;

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Base URL of the lookup API, without trailing slash
    pub api_base_url: String,
    /// Maximum results requested per search
    pub result_limit: u32,
    /// Language for user-facing messages
    pub locale: Locale,
    /// Where log lines go; stderr when unset
    pub log_file: Option<PathBuf>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            result_limit: DEFAULT_RESULT_LIMIT,
            locale: Locale::default(),
            log_file: None,
        }
    }
}

impl AppConfig {
    /// Resolve the API base URL: explicit value, then environment, then default
    pub fn resolve_api_url(explicit: Option<String>) -> String {
        let raw = explicit
            .or_else(|| std::env::var(API_URL_ENV).ok())
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_API_BASE_URL.to_string());
        raw.trim().trim_end_matches('/').to_string()
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Zero is not a meaningful limit; it is clamped to one
    pub fn with_result_limit(mut self, limit: u32) -> Self {
        self.result_limit = limit.max(1);
        self
    }

    pub fn with_locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    pub fn with_log_file(mut self, path: Option<PathBuf>) -> Self {
        self.log_file = path;
        self
    }
}
