// Provider traits and extraction configuration

use async_trait::async_trait;
use std::time::Duration;

use super::errors::{FetchError, ProviderError};
use super::models::{RawCaptions, RawMetadata, VideoId};

/// Browser-like user agent used for unauthenticated page requests
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/121.0.0.0 Safari/537.36";

/// Configuration for video info extraction
#[derive(Clone)]
pub struct ExtractorConfig {
    /// Data API key; without it the metadata stage is skipped
    pub api_key: Option<String>,
    /// SOCKS5/HTTP proxy URL
    pub proxy: Option<String>,
    /// Timeout for the page-fetch fallback
    pub page_timeout_seconds: u64,
    /// Timeout for metadata and caption provider requests
    pub provider_timeout_seconds: u64,
    /// User agent sent with page requests
    pub user_agent: String,
}

impl Default for ExtractorConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            proxy: None,
            page_timeout_seconds: 10,
            provider_timeout_seconds: 30,
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl std::fmt::Debug for ExtractorConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ExtractorConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "<redacted>"))
            .field("proxy", &self.proxy)
            .field("page_timeout_seconds", &self.page_timeout_seconds)
            .field("provider_timeout_seconds", &self.provider_timeout_seconds)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl ExtractorConfig {
    pub fn with_api_key(mut self, key: Option<String>) -> Self {
        self.api_key = key.filter(|k| !k.trim().is_empty());
        self
    }

    pub fn with_proxy(mut self, proxy: Option<String>) -> Self {
        self.proxy = proxy;
        self
    }

    pub fn with_page_timeout(mut self, seconds: u64) -> Self {
        self.page_timeout_seconds = seconds;
        self
    }

    pub fn with_provider_timeout(mut self, seconds: u64) -> Self {
        self.provider_timeout_seconds = seconds;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Request options for the page-fetch fallback
    pub fn page_fetch_options(&self) -> FetchOptions {
        FetchOptions {
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.page_timeout_seconds),
        }
    }

    /// Request options for provider-driven page requests (captions)
    pub fn provider_fetch_options(&self) -> FetchOptions {
        FetchOptions {
            user_agent: self.user_agent.clone(),
            timeout: Duration::from_secs(self.provider_timeout_seconds),
        }
    }
}

/// Per-request options for a raw page fetch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FetchOptions {
    pub user_agent: String,
    pub timeout: Duration,
}

/// Authenticated structured-metadata source
#[async_trait]
pub trait MetadataProvider: Send + Sync {
    /// Name of the provider (for logging)
    fn name(&self) -> &'static str;

    /// Fetch snippet, statistics, content details and status for one video
    async fn fetch(&self, id: &VideoId) -> Result<RawMetadata, ProviderError>;
}

/// Unauthenticated caption source
#[async_trait]
pub trait CaptionProvider: Send + Sync {
    fn name(&self) -> &'static str;

    /// Fetch timed caption segments, optionally in a preferred language
    async fn fetch(&self, id: &VideoId, language: Option<&str>) -> Result<RawCaptions, ProviderError>;
}

/// Raw HTTP GET used by the page-fetch fallback
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn get(&self, url: &str, options: &FetchOptions) -> Result<String, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_api_key_is_absent() {
        let config = ExtractorConfig::default().with_api_key(Some("  ".to_string()));
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_page_fetch_options_use_page_timeout() {
        let config = ExtractorConfig::default().with_page_timeout(7).with_provider_timeout(40);
        assert_eq!(config.page_fetch_options().timeout, Duration::from_secs(7));
        assert_eq!(config.provider_fetch_options().timeout, Duration::from_secs(40));
    }

    #[test]
    fn test_debug_redacts_api_key() {
        let config = ExtractorConfig::default().with_api_key(Some("secret-key".to_string()));
        let printed = format!("{:?}", config);
        assert!(!printed.contains("secret-key"));
        assert!(printed.contains("<redacted>"));
    }
}
