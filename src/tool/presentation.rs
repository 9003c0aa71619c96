// Projection of an extraction result into the tool's JSON payload

use serde::Serialize;

use crate::extractor::diagnostics::diagnose_error;
use crate::extractor::models::{AccessStatus, ExtractionResult, Thumbnails, VideoInfo};

const FULL_ANALYSIS: &str = "Full content analysis using transcript";
const METADATA_ANALYSIS: &str = "Metadata and description-based analysis only";
const AUTO_DETECTED: &str = "auto-detected";

const SUGGESTIONS: [&str; 4] = [
    "Verify the video URL is correct",
    "Check if the video is public and accessible",
    "Try with a different video to test connectivity",
    "Ensure you have proper API keys configured if needed",
];

/// Either payload shape; serializes without a tag
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Payload {
    Success(Box<SuccessPayload>),
    Failure(FailurePayload),
}

impl Payload {
    pub fn from_result(result: &ExtractionResult, language: Option<&str>) -> Self {
        match result {
            ExtractionResult::Success { info, attempts } => {
                Self::Success(Box::new(SuccessPayload::new(info, attempts, language)))
            }
            ExtractionResult::Failure { error, attempts } => {
                Self::Failure(FailurePayload::new(error, attempts))
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success(_))
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct SuccessPayload {
    pub success: bool,
    pub basic: Basic,
    pub statistics: Statistics,
    pub access: Access,
    pub content: Content,
    pub technical: Technical,
    pub analysis: Analysis,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Basic {
    pub id: String,
    pub title: String,
    pub channel: Option<String>,
    pub duration: Option<String>,
    pub published_at: Option<String>,
    pub url: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Statistics {
    pub view_count: Option<u64>,
    pub like_count: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Access {
    pub status: AccessStatus,
    pub is_public: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct Content {
    pub description: String,
    pub captions: Captions,
}

#[derive(Debug, Clone, Serialize)]
pub struct Captions {
    pub available: bool,
    pub count: usize,
    pub transcript: String,
    pub language: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Technical {
    pub extraction_methods: Vec<String>,
    pub thumbnails: Thumbnails,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    pub can_summarize: bool,
    pub content_length: usize,
    pub description_length: usize,
    pub recommended_approach: &'static str,
}

impl SuccessPayload {
    pub fn new(info: &VideoInfo, attempts: &[String], language: Option<&str>) -> Self {
        let transcript = if info.captions_available {
            info.subtitles
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        } else {
            String::new()
        };
        let content_length = transcript.chars().count();

        Self {
            success: true,
            basic: Basic {
                id: info.id.to_string(),
                title: info.title.clone(),
                channel: info.channel_title.clone(),
                duration: info.duration.clone(),
                published_at: info.published_at.clone(),
                url: info.id.watch_url(),
            },
            statistics: Statistics {
                view_count: parse_count(info.view_count.as_deref()),
                like_count: parse_count(info.like_count.as_deref()),
            },
            access: Access {
                status: info.access_status,
                is_public: info.access_status == AccessStatus::Public,
            },
            content: Content {
                description: info.description.clone(),
                captions: Captions {
                    available: info.captions_available,
                    count: info.subtitles.len(),
                    transcript,
                    language: language.unwrap_or(AUTO_DETECTED).to_string(),
                },
            },
            technical: Technical {
                extraction_methods: attempts.to_vec(),
                thumbnails: info.thumbnails.clone(),
            },
            analysis: Analysis {
                can_summarize: info.captions_available && content_length > 0,
                content_length,
                description_length: info.description.chars().count(),
                recommended_approach: if info.captions_available {
                    FULL_ANALYSIS
                } else {
                    METADATA_ANALYSIS
                },
            },
        }
    }
}

fn parse_count(raw: Option<&str>) -> Option<u64> {
    raw.and_then(|r| r.trim().parse().ok())
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailurePayload {
    pub success: bool,
    pub error: String,
    pub attempted_methods: Vec<String>,
    pub troubleshooting: Troubleshooting,
}

#[derive(Debug, Clone, Serialize)]
pub struct Troubleshooting {
    pub suggestions: Vec<&'static str>,
    /// Most likely cause, when the error message is recognizable
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<&'static str>,
}

impl FailurePayload {
    pub fn new(error: &str, attempts: &[String]) -> Self {
        let diagnosed = diagnose_error(error);

        Self {
            success: false,
            error: error.to_string(),
            attempted_methods: attempts.to_vec(),
            troubleshooting: Troubleshooting {
                suggestions: SUGGESTIONS.to_vec(),
                reason: diagnosed.map(|r| r.description()),
                hint: diagnosed.map(|r| r.suggestion()),
            },
        }
    }
}
