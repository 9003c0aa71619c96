// Failure diagnostics - classifies stage errors
//
// Analyzes error messages to determine:
// - Why a provider call failed (quota, key, privacy, network, ...)
// - Whether retrying later might help
// - What the caller should check next

use serde::{Deserialize, Serialize};

/// Reasons a stage or a whole extraction can fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FailureReason {
    /// Reference could not be turned into a video ID
    InvalidReference,

    /// Data API daily quota exhausted
    QuotaExceeded,

    /// API key missing, malformed or not allowed for this API
    KeyRejected,

    /// Too many requests (429 or similar)
    RateLimited,

    /// Video is private
    PrivateVideo,

    /// Video deleted, unknown, or not returned by the provider
    VideoUnavailable,

    /// Request ran past its timeout
    NetworkTimeout,

    /// Connection-level failure
    NetworkError,

    /// Provider answered with something unparseable
    ParseFailure,

    Unknown,
}

impl FailureReason {
    /// Check if a later retry might succeed without any change
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::RateLimited | Self::NetworkTimeout | Self::NetworkError | Self::QuotaExceeded
        )
    }

    /// Check if this points at configuration rather than the video
    pub fn is_configuration(&self) -> bool {
        matches!(self, Self::KeyRejected | Self::QuotaExceeded)
    }

    /// Human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::InvalidReference => "Not a recognizable video URL or ID",
            Self::QuotaExceeded => "API quota exceeded",
            Self::KeyRejected => "API key rejected",
            Self::RateLimited => "Rate limited",
            Self::PrivateVideo => "Private video",
            Self::VideoUnavailable => "Video unavailable",
            Self::NetworkTimeout => "Network timeout",
            Self::NetworkError => "Network error",
            Self::ParseFailure => "Unexpected response format",
            Self::Unknown => "Unknown failure",
        }
    }

    /// Suggestion tailored to this reason
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::InvalidReference => {
                "Pass a watch URL (youtube.com/watch?v=...), a youtu.be link, or an 11-character video ID"
            }
            Self::QuotaExceeded => "Wait for the daily Data API quota to reset or use another key",
            Self::KeyRejected => "Check that YOUTUBE_API_KEY is valid and the Data API is enabled",
            Self::RateLimited => "Wait a few minutes before trying again",
            Self::PrivateVideo => "Only the uploader or invited accounts can see this video",
            Self::VideoUnavailable => "The video may have been deleted or made private",
            Self::NetworkTimeout | Self::NetworkError => "Check network connectivity or proxy settings",
            Self::ParseFailure => "The platform may have changed its page format; try again later",
            Self::Unknown => "Try again later",
        }
    }
}

/// Analyze an error message and return the most specific reason
pub fn diagnose_error(error: &str) -> Option<FailureReason> {
    let lower = error.to_lowercase();

    if lower.contains("could not extract video id") {
        return Some(FailureReason::InvalidReference);
    }

    if lower.contains("quota") {
        return Some(FailureReason::QuotaExceeded);
    }

    if lower.contains("api key")
        || lower.contains("api_key")
        || lower.contains("keyinvalid")
        || lower.contains("http 400")
    {
        return Some(FailureReason::KeyRejected);
    }

    if lower.contains("429") || lower.contains("rate limit") || lower.contains("too many requests") {
        return Some(FailureReason::RateLimited);
    }

    if lower.contains("private video") || lower.contains("video is private") {
        return Some(FailureReason::PrivateVideo);
    }

    if lower.contains("not found")
        || lower.contains("http 404")
        || lower.contains("video unavailable")
        || lower.contains("no longer available")
    {
        return Some(FailureReason::VideoUnavailable);
    }

    if lower.contains("timeout") || lower.contains("timed out") {
        return Some(FailureReason::NetworkTimeout);
    }

    if lower.contains("connection")
        || lower.contains("dns")
        || lower.contains("network unreachable")
        || lower.contains("request failed")
    {
        return Some(FailureReason::NetworkError);
    }

    if lower.contains("parse") || lower.contains("json") || lower.contains("decode") {
        return Some(FailureReason::ParseFailure);
    }

    if !error.is_empty() {
        return Some(FailureReason::Unknown);
    }

    None
}
