// Error types for video info extraction

use thiserror::Error;

/// Failure of a single provider call (metadata or captions)
#[derive(Debug, Clone, Error)]
pub enum ProviderError {
    /// Transport-level failure talking to the provider
    #[error("Request failed: {0}")]
    Http(String),

    /// Provider answered with a non-success status
    #[error("Provider returned HTTP {code}: {message}")]
    Status { code: u16, message: String },

    /// Provider answered but knows nothing about the video
    #[error("Video not found or is private/restricted: {0}")]
    NotFound(String),

    /// Response body could not be understood
    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(e: reqwest::Error) -> Self {
        // Request URLs may carry credentials; keep them out of messages
        let e = e.without_url();
        match e.status() {
            Some(status) => Self::Status {
                code: status.as_u16(),
                message: e.to_string(),
            },
            None if e.is_decode() => Self::Parse(e.to_string()),
            None => Self::Http(e.to_string()),
        }
    }
}

impl From<FetchError> for ProviderError {
    fn from(e: FetchError) -> Self {
        match e {
            FetchError::Status(code) => Self::Status {
                code,
                message: "page request rejected".to_string(),
            },
            other => Self::Http(other.to_string()),
        }
    }
}

/// Failure of a raw page fetch
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("Timed out after {0}s")]
    Timeout(u64),

    #[error("HTTP request failed: {0}")]
    Http(String),

    #[error("Page returned HTTP {0}")]
    Status(u16),
}

/// Errors surfaced by the extraction pipeline
#[derive(Debug, Clone, Error)]
pub enum ExtractionError {
    /// No video identifier could be derived from the reference
    #[error("Could not extract video ID from '{0}'")]
    InvalidReference(String),

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// Top-level failure; the only error that reaches the caller
    #[error("Failed to extract video information: {source}")]
    ExtractionFailed {
        #[source]
        source: Box<ExtractionError>,
    },
}

impl ExtractionError {
    pub fn failed(source: ExtractionError) -> Self {
        Self::ExtractionFailed {
            source: Box::new(source),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extraction_failed_message_includes_cause() {
        let err = ExtractionError::failed(ExtractionError::InvalidReference("nope".to_string()));
        assert_eq!(
            err.to_string(),
            "Failed to extract video information: Could not extract video ID from 'nope'"
        );
    }

    #[test]
    fn test_fetch_status_maps_to_provider_status() {
        let err: ProviderError = FetchError::Status(429).into();
        assert!(matches!(err, ProviderError::Status { code: 429, .. }));
    }

    #[test]
    fn test_fetch_timeout_maps_to_provider_http() {
        let err: ProviderError = FetchError::Timeout(10).into();
        assert_eq!(err.to_string(), "Request failed: Timed out after 10s");
    }
}
