// HTTP-backed providers for the extraction stages

mod captions;
mod data_api;
mod http;

pub use captions::WatchPageCaptionClient;
pub use data_api::DataApiClient;
pub use http::HttpPageFetcher;

use std::time::Duration;
use tracing::warn;

use crate::extractor::traits::ExtractorConfig;

/// Build a reqwest client with the configured proxy and provider timeout
pub(crate) fn build_client(config: &ExtractorConfig) -> Result<reqwest::Client, reqwest::Error> {
    let mut builder = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.provider_timeout_seconds));

    if let Some(proxy_url) = config.proxy.as_deref() {
        match reqwest::Proxy::all(proxy_url) {
            Ok(proxy) => builder = builder.proxy(proxy),
            Err(e) => {
                warn!(proxy = proxy_url, error = %e, "Invalid proxy URL, connecting directly");
            }
        }
    }

    builder.build()
}
