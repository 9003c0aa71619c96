// Environment-driven configuration (.env is loaded first when present)

use std::env;
use tracing::warn;

use crate::extractor::traits::ExtractorConfig;

pub const API_KEY_VAR: &str = "YOUTUBE_API_KEY";
pub const PAGE_TIMEOUT_VAR: &str = "PAGE_FETCH_TIMEOUT_SECS";
pub const PROVIDER_TIMEOUT_VAR: &str = "PROVIDER_TIMEOUT_SECS";
pub const PROXY_VAR: &str = "YOUTUBE_PROXY";
pub const USER_AGENT_VAR: &str = "YOUTUBE_USER_AGENT";

/// Load configuration from `.env` and the process environment
pub fn load() -> ExtractorConfig {
    dotenv::dotenv().ok();
    from_lookup(|name| env::var(name).ok())
}

/// Build configuration from an arbitrary variable lookup
pub fn from_lookup<F>(lookup: F) -> ExtractorConfig
where
    F: Fn(&str) -> Option<String>,
{
    let defaults = ExtractorConfig::default();
    let mut config = ExtractorConfig::default()
        .with_api_key(lookup(API_KEY_VAR))
        .with_proxy(lookup(PROXY_VAR).filter(|p| !p.trim().is_empty()))
        .with_page_timeout(seconds(&lookup, PAGE_TIMEOUT_VAR, defaults.page_timeout_seconds))
        .with_provider_timeout(seconds(
            &lookup,
            PROVIDER_TIMEOUT_VAR,
            defaults.provider_timeout_seconds,
        ));

    if let Some(agent) = lookup(USER_AGENT_VAR).filter(|a| !a.trim().is_empty()) {
        config = config.with_user_agent(agent);
    }

    config
}

fn seconds<F>(lookup: &F, name: &str, default: u64) -> u64
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => default,
        Some(raw) => match raw.trim().parse::<u64>() {
            Ok(0) | Err(_) => {
                warn!(var = name, value = raw.as_str(), default, "Invalid timeout, using default");
                default
            }
            Ok(value) => value,
        },
    }
}
