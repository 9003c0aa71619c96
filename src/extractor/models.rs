// Data models for video info extraction

use serde::{Deserialize, Serialize};
use std::fmt;

/// Stage-local defaults inserted when a source omits a field
pub mod placeholder {
    pub const TITLE: &str = "Unknown Title";
    pub const DESCRIPTION: &str = "No description available";
    pub const DURATION: &str = "Unknown duration";
    pub const CHANNEL: &str = "Unknown Channel";
    pub const PUBLISHED_AT: &str = "Unknown";
    pub const PAGE_DESCRIPTION: &str = "Description not available (web scraping fallback)";
    pub const PAGE_DURATION: &str = "Duration not available";
}

/// Canonical video identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VideoId(String);

impl VideoId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Public watch page for this video
    pub fn watch_url(&self) -> String {
        format!("https://www.youtube.com/watch?v={}", self.0)
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A record field together with how it was obtained.
///
/// `Placeholder` values come from a stage-local default and stay replaceable;
/// `Filled` values came from a source and are never replaced by a later stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Slot<T> {
    Empty,
    Placeholder(T),
    Filled(T),
}

impl<T> Default for Slot<T> {
    fn default() -> Self {
        Self::Empty
    }
}

impl<T> Slot<T> {
    pub fn value(&self) -> Option<&T> {
        match self {
            Self::Empty => None,
            Self::Placeholder(v) | Self::Filled(v) => Some(v),
        }
    }

    pub fn into_value(self) -> Option<T> {
        match self {
            Self::Empty => None,
            Self::Placeholder(v) | Self::Filled(v) => Some(v),
        }
    }

    pub fn is_filled(&self) -> bool {
        matches!(self, Self::Filled(_))
    }

    /// Take `incoming` only where this slot has no real value yet.
    ///
    /// Empty accepts anything; Placeholder only yields to Filled; Filled keeps.
    /// Returns true when the slot changed.
    pub fn fill_if_empty(&mut self, incoming: Slot<T>) -> bool {
        let replace = match (&*self, &incoming) {
            (_, Self::Empty) => false,
            (Self::Empty, _) => true,
            (Self::Placeholder(_), Self::Filled(_)) => true,
            _ => false,
        };
        if replace {
            *self = incoming;
        }
        replace
    }
}

impl Slot<String> {
    /// Source value if present and non-blank, otherwise the given placeholder
    pub fn or_placeholder(value: Option<String>, fallback: &str) -> Self {
        match Self::from_source(value) {
            Self::Empty => Self::Placeholder(fallback.to_string()),
            filled => filled,
        }
    }

    /// Source value if present and non-blank
    pub fn from_source(value: Option<String>) -> Self {
        match value {
            Some(v) if !v.trim().is_empty() => Self::Filled(v),
            _ => Self::Empty,
        }
    }
}

/// Access classification of a video
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccessStatus {
    Public,
    Private,
    Unlisted,
    Restricted,
    Unknown,
}

impl AccessStatus {
    /// Classify from provider privacy and upload status strings
    pub fn classify(privacy_status: Option<&str>, upload_status: Option<&str>) -> Self {
        match (privacy_status, upload_status) {
            (Some("private"), _) => Self::Private,
            (Some("unlisted"), _) => Self::Unlisted,
            (_, upload) if upload != Some("processed") => Self::Restricted,
            _ => Self::Public,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Public => "public",
            Self::Private => "private",
            Self::Unlisted => "unlisted",
            Self::Restricted => "restricted",
            Self::Unknown => "unknown",
        }
    }
}

impl fmt::Display for AccessStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Caption offset; sources report either seconds or the raw attribute text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Offset {
    Seconds(f64),
    Encoded(String),
}

/// One timed unit of transcript text
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaptionSegment {
    pub text: String,
    pub start: Offset,
    #[serde(rename = "dur")]
    pub duration: Offset,
}

/// Thumbnail URLs at the three resolutions the platform exposes
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ThumbnailSlots {
    pub default: Slot<String>,
    pub medium: Slot<String>,
    pub high: Slot<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Thumbnails {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub medium: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub high: Option<String>,
}

/// Partial result produced by one stage, merged into the record
#[derive(Debug, Clone, Default)]
pub struct RecordPatch {
    pub title: Slot<String>,
    pub description: Slot<String>,
    pub duration: Slot<String>,
    pub channel_title: Slot<String>,
    pub published_at: Slot<String>,
    pub view_count: Slot<String>,
    pub like_count: Slot<String>,
    pub thumbnails: ThumbnailSlots,
    pub access_status: Slot<AccessStatus>,
    /// When set, replaces the record's caption sequence outright
    pub captions: Option<Vec<CaptionSegment>>,
}

/// The record under construction during one extraction
#[derive(Debug, Clone)]
pub struct VideoRecord {
    pub id: VideoId,
    pub title: Slot<String>,
    pub description: Slot<String>,
    pub duration: Slot<String>,
    pub channel_title: Slot<String>,
    pub published_at: Slot<String>,
    pub view_count: Slot<String>,
    pub like_count: Slot<String>,
    pub thumbnails: ThumbnailSlots,
    pub access_status: Slot<AccessStatus>,
    pub captions: Vec<CaptionSegment>,
    pub captions_available: bool,
}

impl VideoRecord {
    pub fn new(id: VideoId) -> Self {
        Self {
            id,
            title: Slot::Empty,
            description: Slot::Empty,
            duration: Slot::Empty,
            channel_title: Slot::Empty,
            published_at: Slot::Empty,
            view_count: Slot::Empty,
            like_count: Slot::Empty,
            thumbnails: ThumbnailSlots::default(),
            access_status: Slot::Empty,
            captions: Vec::new(),
            captions_available: false,
        }
    }

    /// Merge a stage's output: every field is fill-if-empty, captions replace.
    pub fn merge(&mut self, patch: RecordPatch) {
        self.title.fill_if_empty(patch.title);
        self.description.fill_if_empty(patch.description);
        self.duration.fill_if_empty(patch.duration);
        self.channel_title.fill_if_empty(patch.channel_title);
        self.published_at.fill_if_empty(patch.published_at);
        self.view_count.fill_if_empty(patch.view_count);
        self.like_count.fill_if_empty(patch.like_count);
        self.thumbnails.default.fill_if_empty(patch.thumbnails.default);
        self.thumbnails.medium.fill_if_empty(patch.thumbnails.medium);
        self.thumbnails.high.fill_if_empty(patch.thumbnails.high);
        self.access_status.fill_if_empty(patch.access_status);

        if let Some(captions) = patch.captions {
            self.captions = captions;
        }
        self.refresh_captions_available();
    }

    pub fn refresh_captions_available(&mut self) {
        self.captions_available = !self.captions.is_empty();
    }

    /// True when no source has produced a real title yet
    pub fn needs_title(&self) -> bool {
        !self.title.is_filled()
    }

    /// Apply final defaults and produce the normalized output
    pub fn finalize(mut self) -> VideoInfo {
        self.refresh_captions_available();

        let title = self
            .title
            .into_value()
            .unwrap_or_else(|| format!("Video {}", self.id));
        let description = self
            .description
            .into_value()
            .unwrap_or_else(|| placeholder::DESCRIPTION.to_string());

        VideoInfo {
            id: self.id,
            title,
            description,
            duration: self.duration.into_value(),
            thumbnails: Thumbnails {
                default: self.thumbnails.default.into_value(),
                medium: self.thumbnails.medium.into_value(),
                high: self.thumbnails.high.into_value(),
            },
            channel_title: self.channel_title.into_value(),
            published_at: self.published_at.into_value(),
            view_count: self.view_count.into_value(),
            like_count: self.like_count.into_value(),
            subtitles: self.captions,
            captions_available: self.captions_available,
            access_status: self.access_status.into_value().unwrap_or(AccessStatus::Unknown),
        }
    }
}

/// Normalized video information returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    pub id: VideoId,
    pub title: String,
    pub description: String,
    pub duration: Option<String>,
    pub thumbnails: Thumbnails,
    pub channel_title: Option<String>,
    pub published_at: Option<String>,
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub subtitles: Vec<CaptionSegment>,
    pub captions_available: bool,
    pub access_status: AccessStatus,
}

/// Provider-neutral payload from the structured metadata provider
#[derive(Debug, Clone, Default)]
pub struct RawMetadata {
    pub title: Option<String>,
    pub description: Option<String>,
    pub duration_code: Option<String>,
    pub thumbnails: Thumbnails,
    pub channel_title: Option<String>,
    pub published_at: Option<String>,
    pub view_count: Option<String>,
    pub like_count: Option<String>,
    pub privacy_status: Option<String>,
    pub upload_status: Option<String>,
}

/// Payload from the caption provider
#[derive(Debug, Clone, Default)]
pub struct RawCaptions {
    pub title: Option<String>,
    pub description: Option<String>,
    pub segments: Vec<CaptionSegment>,
}

/// Outcome of a whole extraction
#[derive(Debug, Clone)]
pub enum ExtractionResult {
    Success {
        info: VideoInfo,
        attempts: Vec<String>,
    },
    Failure {
        error: String,
        attempts: Vec<String>,
    },
}

impl ExtractionResult {
    pub fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Attempt labels in the order the stages ran
    pub fn attempts(&self) -> &[String] {
        match self {
            Self::Success { attempts, .. } | Self::Failure { attempts, .. } => attempts,
        }
    }

    pub fn info(&self) -> Option<&VideoInfo> {
        match self {
            Self::Success { info, .. } => Some(info),
            Self::Failure { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn segment(text: &str) -> CaptionSegment {
        CaptionSegment {
            text: text.to_string(),
            start: Offset::Encoded("0.0".to_string()),
            duration: Offset::Seconds(1.5),
        }
    }

    #[test]
    fn test_fill_if_empty_keeps_filled_value() {
        let mut slot = Slot::Filled("Demo".to_string());
        assert!(!slot.fill_if_empty(Slot::Filled("Other".to_string())));
        assert_eq!(slot.value().map(String::as_str), Some("Demo"));
    }

    #[test]
    fn test_fill_if_empty_replaces_placeholder_only_with_real_value() {
        let mut slot = Slot::Placeholder(placeholder::TITLE.to_string());
        assert!(!slot.fill_if_empty(Slot::Placeholder("Other placeholder".to_string())));
        assert!(slot.fill_if_empty(Slot::Filled("Real".to_string())));
        assert_eq!(slot, Slot::Filled("Real".to_string()));
    }

    #[test]
    fn test_fill_if_empty_ignores_empty_incoming() {
        let mut slot: Slot<String> = Slot::Empty;
        assert!(!slot.fill_if_empty(Slot::Empty));
        assert!(slot.fill_if_empty(Slot::Placeholder("x".to_string())));
    }

    #[test]
    fn test_blank_source_value_becomes_placeholder() {
        let slot = Slot::or_placeholder(Some("   ".to_string()), placeholder::CHANNEL);
        assert_eq!(slot, Slot::Placeholder(placeholder::CHANNEL.to_string()));
    }

    #[test]
    fn test_access_classification_order() {
        assert_eq!(AccessStatus::classify(Some("private"), Some("uploaded")), AccessStatus::Private);
        assert_eq!(AccessStatus::classify(Some("unlisted"), Some("processed")), AccessStatus::Unlisted);
        assert_eq!(AccessStatus::classify(Some("public"), Some("uploaded")), AccessStatus::Restricted);
        assert_eq!(AccessStatus::classify(Some("public"), None), AccessStatus::Restricted);
        assert_eq!(AccessStatus::classify(Some("public"), Some("processed")), AccessStatus::Public);
    }

    #[test]
    fn test_merge_replaces_captions_and_recomputes_flag() {
        let mut record = VideoRecord::new(VideoId::new("abcdefghijk"));
        record.captions_available = true;
        record.merge(RecordPatch {
            captions: Some(Vec::new()),
            ..Default::default()
        });
        assert!(!record.captions_available);

        record.merge(RecordPatch {
            captions: Some(vec![segment("hello")]),
            ..Default::default()
        });
        assert!(record.captions_available);

        // A patch without captions leaves the sequence alone
        record.merge(RecordPatch::default());
        assert_eq!(record.captions.len(), 1);
    }

    #[test]
    fn test_finalize_applies_defaults() {
        let mut record = VideoRecord::new(VideoId::new("abcdefghijk"));
        record.captions_available = true;
        let info = record.finalize();

        assert_eq!(info.title, "Video abcdefghijk");
        assert_eq!(info.description, placeholder::DESCRIPTION);
        assert_eq!(info.access_status, AccessStatus::Unknown);
        assert!(!info.captions_available);
        assert!(info.duration.is_none());
    }

    #[test]
    fn test_offset_serializes_untagged() {
        assert_eq!(serde_json::to_value(Offset::Encoded("12.5".to_string())).unwrap(), "12.5");
        assert_eq!(serde_json::to_value(Offset::Seconds(1.5)).unwrap(), 1.5);
    }

    #[test]
    fn test_video_info_serializes_camel_case() {
        let info = VideoRecord::new(VideoId::new("abcdefghijk")).finalize();
        let json = serde_json::to_value(&info).unwrap();
        assert_eq!(json["id"], "abcdefghijk");
        assert_eq!(json["accessStatus"], "unknown");
        assert_eq!(json["captionsAvailable"], false);
    }
}
