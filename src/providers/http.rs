// Raw page fetcher used by the page-fetch fallback and the caption client

use async_trait::async_trait;
use reqwest::header::{ACCEPT_LANGUAGE, USER_AGENT};
use tokio::time::timeout;
use tracing::debug;

use super::build_client;
use crate::extractor::errors::FetchError;
use crate::extractor::traits::{ExtractorConfig, FetchOptions, PageFetcher};

/// Plain HTTP GET with a browser-like user agent and a hard deadline
pub struct HttpPageFetcher {
    client: reqwest::Client,
}

impl HttpPageFetcher {
    pub fn new(config: &ExtractorConfig) -> Result<Self, FetchError> {
        let client = build_client(config).map_err(|e| FetchError::Http(e.to_string()))?;
        Ok(Self { client })
    }

    async fn get_body(&self, url: &str, options: &FetchOptions) -> Result<String, FetchError> {
        let response = self
            .client
            .get(url)
            .header(USER_AGENT, options.user_agent.as_str())
            .header(ACCEPT_LANGUAGE, "en-US,en;q=0.9")
            .send()
            .await
            .map_err(|e| fetch_error(e, options))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        response
            .text()
            .await
            .map_err(|e| fetch_error(e, options))
    }
}

fn fetch_error(e: reqwest::Error, options: &FetchOptions) -> FetchError {
    if e.is_timeout() {
        FetchError::Timeout(options.timeout.as_secs())
    } else {
        FetchError::Http(e.to_string())
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn get(&self, url: &str, options: &FetchOptions) -> Result<String, FetchError> {
        debug!(url, timeout_secs = options.timeout.as_secs(), "Fetching page");

        match timeout(options.timeout, self.get_body(url, options)).await {
            Ok(result) => result,
            Err(_) => Err(FetchError::Timeout(options.timeout.as_secs())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};
    use wiremock::matchers::{header, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn serve(route: &str, response: ResponseTemplate) -> MockServer {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path(route))
            .respond_with(response)
            .mount(&server)
            .await;
        server
    }

    #[tokio::test]
    async fn test_get_returns_body_with_user_agent() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/watch"))
            .and(header("user-agent", "test-agent"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<title>Demo - YouTube</title>"))
            .mount(&server)
            .await;

        let config = ExtractorConfig::default().with_user_agent("test-agent");
        let fetcher = HttpPageFetcher::new(&config).unwrap();
        let body = fetcher
            .get(&format!("{}/watch", server.uri()), &config.page_fetch_options())
            .await
            .unwrap();

        assert_eq!(body, "<title>Demo - YouTube</title>");
    }

    #[tokio::test]
    async fn test_get_non_success_status() {
        let server = serve("/watch", ResponseTemplate::new(404)).await;
        let config = ExtractorConfig::default();
        let fetcher = HttpPageFetcher::new(&config).unwrap();

        let err = fetcher
            .get(&format!("{}/watch", server.uri()), &config.page_fetch_options())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Status(404)));
    }

    #[tokio::test]
    async fn test_silent_server_hits_page_timeout() {
        let server = serve(
            "/watch",
            ResponseTemplate::new(200)
                .set_body_string("late")
                .set_delay(Duration::from_secs(5)),
        )
        .await;
        let config = ExtractorConfig::default().with_page_timeout(1);
        let fetcher = HttpPageFetcher::new(&config).unwrap();

        let started = Instant::now();
        let err = fetcher
            .get(&format!("{}/watch", server.uri()), &config.page_fetch_options())
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Timeout(1)));
        assert!(started.elapsed() < Duration::from_secs(4));
    }

    #[test]
    fn test_default_page_timeout_is_ten_seconds() {
        let options = ExtractorConfig::default().page_fetch_options();
        assert_eq!(options.timeout, Duration::from_secs(10));
    }
}
