// Agent-facing tool: definition, argument handling and dispatch
//
// The same handler is registered under two names so clients that only
// accept one naming convention (snake_case or kebab-case) can both call it.

pub mod presentation;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{debug, info};

use crate::extractor::VideoInfoOrchestrator;
use presentation::Payload;

pub const TOOL_NAME: &str = "get_video_info";
pub const TOOL_ALIAS: &str = "get-video-info";

const TOOL_DESCRIPTION: &str = "Extract comprehensive YouTube video data including metadata, \
captions/transcripts, and technical details. Returns structured data for analysis, \
summarization, or note creation. When captions are available, provides the full transcript; \
otherwise returns metadata for description-based analysis.";

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Invalid arguments: {0}")]
    InvalidArguments(String),

    #[error("Could not encode response: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Advertised tool metadata
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Tool arguments as sent by the client
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolArgs {
    /// URL or bare ID of the video
    pub video_url: String,
    /// Preferred caption language (e.g. "en", "es")
    #[serde(default)]
    pub language_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolContent {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub text: String,
}

/// Tool call result: one pretty-printed JSON text block
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolResponse {
    pub content: Vec<ToolContent>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    pub is_error: bool,
}

impl ToolResponse {
    fn from_payload(payload: &Payload) -> Result<Self, ToolError> {
        let text = serde_json::to_string_pretty(payload)?;

        Ok(Self {
            content: vec![ToolContent { kind: "text", text }],
            is_error: !payload.is_success(),
        })
    }

    /// Concatenated text content
    pub fn text(&self) -> String {
        self.content
            .iter()
            .map(|c| c.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }
}

fn input_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "videoUrl": {
                "type": "string",
                "description": "The URL or ID of the YouTube video"
            },
            "languageCode": {
                "type": "string",
                "description": "The language code for captions (optional, e.g., 'en', 'es', 'fr')"
            }
        },
        "required": ["videoUrl"]
    })
}

/// Both registrations of the tool
pub fn definitions() -> Vec<ToolDefinition> {
    [TOOL_NAME, TOOL_ALIAS]
        .into_iter()
        .map(|name| ToolDefinition {
            name,
            description: TOOL_DESCRIPTION,
            input_schema: input_schema(),
        })
        .collect()
}

/// The video info tool bound to an orchestrator
pub struct VideoInfoTool {
    orchestrator: VideoInfoOrchestrator,
}

impl VideoInfoTool {
    pub fn new(orchestrator: VideoInfoOrchestrator) -> Self {
        Self { orchestrator }
    }

    /// Run an extraction and project it into the response payload
    pub async fn handle(&self, args: &ToolArgs) -> Payload {
        let language = args.language_code.as_deref().filter(|l| !l.trim().is_empty());
        info!(video = args.video_url.as_str(), ?language, "Handling video info request");

        let result = self.orchestrator.extract(&args.video_url, language).await;
        Payload::from_result(&result, language)
    }

    /// Call the tool by name with raw JSON arguments
    pub async fn dispatch(&self, name: &str, args: Value) -> Result<ToolResponse, ToolError> {
        if name != TOOL_NAME && name != TOOL_ALIAS {
            return Err(ToolError::UnknownTool(name.to_string()));
        }

        let args: ToolArgs =
            serde_json::from_value(args).map_err(|e| ToolError::InvalidArguments(e.to_string()))?;
        debug!(tool = name, "Dispatching tool call");

        let payload = self.handle(&args).await;
        ToolResponse::from_payload(&payload)
    }
}
