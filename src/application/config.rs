use std::time::Duration;

use crate::domain::{
    accessibility::ANNOUNCEMENT_TTL_MS,
    logging::LogComponent,
    retry::RetryPolicy,
};
use crate::infrastructure::http::DEFAULT_TIMEOUT_MS;
use crate::log_info;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000";
pub const API_BASE_META: &str = "intel-api-base";
pub const DEFAULT_REFRESH_INTERVAL: Duration = Duration::from_secs(15 * 60);

/// Runtime settings for the dashboard.
#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub request_timeout_ms: u32,
    pub retry_policy: RetryPolicy,
    pub refresh_interval: Duration,
    pub announcement_ttl_ms: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_ms: DEFAULT_TIMEOUT_MS,
            retry_policy: RetryPolicy::default(),
            refresh_interval: DEFAULT_REFRESH_INTERVAL,
            announcement_ttl_ms: ANNOUNCEMENT_TTL_MS,
        }
    }
}

impl AppConfig {
    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_request_timeout_ms(mut self, timeout_ms: u32) -> Self {
        self.request_timeout_ms = timeout_ms;
        self
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.retry_policy = policy;
        self
    }

    pub fn with_refresh_interval(mut self, interval: Duration) -> Self {
        self.refresh_interval = interval;
        self
    }

    pub fn with_announcement_ttl_ms(mut self, ttl_ms: u64) -> Self {
        self.announcement_ttl_ms = ttl_ms;
        self
    }

    /// Applies an override when present and non-blank.
    pub fn with_base_override(self, base: Option<String>) -> Self {
        match base.map(|b| b.trim().trim_end_matches('/').to_string()) {
            Some(base) if !base.is_empty() => self.with_api_base_url(base),
            _ => self,
        }
    }

    /// Defaults, with the base URL taken from `<meta name="intel-api-base">` if set.
    pub fn from_document() -> Self {
        let base = web_sys::window()
            .and_then(|w| w.document())
            .and_then(|d| d.query_selector(&format!("meta[name=\"{API_BASE_META}\"]")).ok().flatten())
            .and_then(|meta| meta.get_attribute("content"));
        let config = Self::default().with_base_override(base);
        log_info!(LogComponent::Application("Config"), "API base: {}", config.api_base_url);
        config
    }
}
