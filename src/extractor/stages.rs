// Extraction stages
//
// Each stage turns one source into a RecordPatch and reports a tagged outcome.
// Errors stop at the stage boundary; the orchestrator only sees the tag.

use std::fmt;

use super::errors::ExtractionError;
use super::language::validated_language;
use super::models::{
    placeholder, AccessStatus, RawCaptions, RawMetadata, RecordPatch, Slot, ThumbnailSlots,
    VideoId, VideoRecord,
};
use super::traits::{CaptionProvider, FetchOptions, MetadataProvider, PageFetcher};
use super::utils::{extract_page_title, parse_duration, thumbnail_urls};

/// Stages in the order they run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    Metadata,
    Captions,
    PageFetch,
}

impl StageKind {
    pub const PIPELINE: [StageKind; 3] = [Self::Metadata, Self::Captions, Self::PageFetch];

    /// Attempt label recorded when the stage succeeds
    pub fn label(&self) -> &'static str {
        match self {
            Self::Metadata => "metadata-provider",
            Self::Captions => "caption-provider",
            Self::PageFetch => "page-fetch",
        }
    }
}

impl fmt::Display for StageKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Why a stage did not run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Credentialed provider without a configured API key
    NoCredential,
    /// Title already known; the fallback has nothing to add
    TitleResolved,
}

/// Result of running one stage
#[derive(Debug)]
pub enum StageOutcome {
    Applied(RecordPatch),
    Skipped(SkipReason),
    Failed(ExtractionError),
}

impl StageOutcome {
    /// Attempt label for the bookkeeping list, if this outcome is recorded
    pub fn attempt_label(&self, stage: StageKind) -> Option<String> {
        match self {
            Self::Applied(_) => Some(stage.label().to_string()),
            Self::Failed(_) => Some(format!("{} (failed)", stage.label())),
            Self::Skipped(SkipReason::NoCredential) => {
                Some(format!("{} (no credential)", stage.label()))
            }
            Self::Skipped(SkipReason::TitleResolved) => None,
        }
    }
}

/// Metadata provider availability, decided once before the pipeline runs
pub enum Credential {
    Present(Box<dyn MetadataProvider>),
    Absent,
}

impl Credential {
    pub fn is_present(&self) -> bool {
        matches!(self, Self::Present(_))
    }
}

/// Stage 1: structured metadata from the credentialed provider
pub async fn run_metadata(credential: &Credential, id: &VideoId) -> StageOutcome {
    let provider = match credential {
        Credential::Present(provider) => provider,
        Credential::Absent => return StageOutcome::Skipped(SkipReason::NoCredential),
    };

    match provider.fetch(id).await {
        Ok(raw) => StageOutcome::Applied(metadata_patch(raw)),
        Err(e) => StageOutcome::Failed(e.into()),
    }
}

/// Map a metadata payload into a patch, inserting stage-local placeholders
pub fn metadata_patch(raw: RawMetadata) -> RecordPatch {
    let access = AccessStatus::classify(raw.privacy_status.as_deref(), raw.upload_status.as_deref());
    let duration = match raw.duration_code.as_deref().and_then(parse_duration) {
        Some(readable) => Slot::Filled(readable),
        None => Slot::Placeholder(placeholder::DURATION.to_string()),
    };

    RecordPatch {
        title: Slot::or_placeholder(raw.title, placeholder::TITLE),
        description: Slot::or_placeholder(raw.description, placeholder::DESCRIPTION),
        duration,
        channel_title: Slot::or_placeholder(raw.channel_title, placeholder::CHANNEL),
        published_at: Slot::or_placeholder(raw.published_at, placeholder::PUBLISHED_AT),
        view_count: Slot::from_source(raw.view_count),
        like_count: Slot::from_source(raw.like_count),
        thumbnails: ThumbnailSlots {
            default: Slot::from_source(raw.thumbnails.default),
            medium: Slot::from_source(raw.thumbnails.medium),
            high: Slot::from_source(raw.thumbnails.high),
        },
        access_status: Slot::Filled(access),
        captions: None,
    }
}

/// Stage 2: captions plus any title/description the caption source knows
pub async fn run_captions(
    provider: &dyn CaptionProvider,
    id: &VideoId,
    language: Option<&str>,
) -> StageOutcome {
    let language = validated_language(language);

    match provider.fetch(id, language).await {
        Ok(raw) => StageOutcome::Applied(captions_patch(raw)),
        Err(e) => StageOutcome::Failed(e.into()),
    }
}

/// Map a caption payload into a patch; the segment list always replaces
pub fn captions_patch(raw: RawCaptions) -> RecordPatch {
    RecordPatch {
        title: Slot::from_source(raw.title),
        description: Slot::from_source(raw.description),
        captions: Some(raw.segments),
        ..Default::default()
    }
}

/// Stage 3: scrape the watch page when no real title has been found
pub async fn run_page_fetch(
    fetcher: &dyn PageFetcher,
    record: &VideoRecord,
    options: &FetchOptions,
) -> StageOutcome {
    if !record.needs_title() {
        return StageOutcome::Skipped(SkipReason::TitleResolved);
    }

    match fetcher.get(&record.id.watch_url(), options).await {
        Ok(html) => StageOutcome::Applied(page_patch(&record.id, &html)),
        Err(e) => StageOutcome::Failed(e.into()),
    }
}

/// Map a watch page into a patch of gap-filling values
pub fn page_patch(id: &VideoId, html: &str) -> RecordPatch {
    let thumbs = thumbnail_urls(id);

    RecordPatch {
        title: Slot::or_placeholder(extract_page_title(html), placeholder::TITLE),
        description: Slot::Placeholder(placeholder::PAGE_DESCRIPTION.to_string()),
        duration: Slot::Placeholder(placeholder::PAGE_DURATION.to_string()),
        channel_title: Slot::Placeholder(placeholder::CHANNEL.to_string()),
        published_at: Slot::Placeholder(placeholder::PUBLISHED_AT.to_string()),
        thumbnails: ThumbnailSlots {
            default: Slot::from_source(thumbs.default),
            medium: Slot::from_source(thumbs.medium),
            high: Slot::from_source(thumbs.high),
        },
        access_status: Slot::Placeholder(AccessStatus::Unknown),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extractor::errors::FetchError;
    use crate::extractor::models::{CaptionSegment, Offset, Thumbnails};
    use async_trait::async_trait;
    use std::time::Duration;

    fn options() -> FetchOptions {
        FetchOptions {
            user_agent: "test-agent".to_string(),
            timeout: Duration::from_secs(10),
        }
    }

    struct StaticPage(Result<String, FetchError>);

    #[async_trait]
    impl PageFetcher for StaticPage {
        async fn get(&self, _url: &str, _options: &FetchOptions) -> Result<String, FetchError> {
            self.0.clone()
        }
    }

    #[test]
    fn test_attempt_labels() {
        let applied = StageOutcome::Applied(RecordPatch::default());
        assert_eq!(applied.attempt_label(StageKind::Metadata).as_deref(), Some("metadata-provider"));

        let failed = StageOutcome::Failed(FetchError::Timeout(10).into());
        assert_eq!(failed.attempt_label(StageKind::PageFetch).as_deref(), Some("page-fetch (failed)"));

        let skipped = StageOutcome::Skipped(SkipReason::NoCredential);
        assert_eq!(
            skipped.attempt_label(StageKind::Metadata).as_deref(),
            Some("metadata-provider (no credential)")
        );

        let not_needed = StageOutcome::Skipped(SkipReason::TitleResolved);
        assert_eq!(not_needed.attempt_label(StageKind::PageFetch), None);
    }

    #[test]
    fn test_metadata_patch_fills_and_defaults() {
        let patch = metadata_patch(RawMetadata {
            title: Some("Demo".to_string()),
            duration_code: Some("PT3M7S".to_string()),
            thumbnails: Thumbnails {
                default: Some("https://i.ytimg.com/d.jpg".to_string()),
                ..Default::default()
            },
            view_count: Some("1200".to_string()),
            privacy_status: Some("public".to_string()),
            upload_status: Some("processed".to_string()),
            ..Default::default()
        });

        assert_eq!(patch.title, Slot::Filled("Demo".to_string()));
        assert_eq!(patch.duration, Slot::Filled("3:07".to_string()));
        assert_eq!(patch.description, Slot::Placeholder(placeholder::DESCRIPTION.to_string()));
        assert_eq!(patch.channel_title, Slot::Placeholder(placeholder::CHANNEL.to_string()));
        assert_eq!(patch.published_at, Slot::Placeholder(placeholder::PUBLISHED_AT.to_string()));
        assert_eq!(patch.view_count, Slot::Filled("1200".to_string()));
        assert_eq!(patch.like_count, Slot::Empty);
        assert_eq!(patch.thumbnails.medium, Slot::Empty);
        assert_eq!(patch.access_status, Slot::Filled(AccessStatus::Public));
        assert!(patch.captions.is_none());
    }

    #[test]
    fn test_metadata_patch_bad_duration_is_placeholder() {
        let patch = metadata_patch(RawMetadata {
            duration_code: Some("garbage".to_string()),
            ..Default::default()
        });
        assert_eq!(patch.duration, Slot::Placeholder(placeholder::DURATION.to_string()));
        assert_eq!(patch.title, Slot::Placeholder(placeholder::TITLE.to_string()));
        // No upload status reported means not fully processed
        assert_eq!(patch.access_status, Slot::Filled(AccessStatus::Restricted));
    }

    #[test]
    fn test_captions_patch_always_sets_sequence() {
        let patch = captions_patch(RawCaptions::default());
        assert_eq!(patch.captions, Some(Vec::new()));
        assert_eq!(patch.title, Slot::Empty);

        let patch = captions_patch(RawCaptions {
            title: Some("From captions".to_string()),
            description: Some("".to_string()),
            segments: vec![CaptionSegment {
                text: "hi".to_string(),
                start: Offset::Encoded("0".to_string()),
                duration: Offset::Encoded("1".to_string()),
            }],
        });
        assert_eq!(patch.title, Slot::Filled("From captions".to_string()));
        assert_eq!(patch.description, Slot::Empty);
        assert_eq!(patch.captions.map(|c| c.len()), Some(1));
    }

    #[test]
    fn test_page_patch_contents() {
        let id = VideoId::new("dQw4w9WgXcQ");
        let patch = page_patch(&id, "<title>Fallback Title - YouTube</title>");
        assert_eq!(patch.title, Slot::Filled("Fallback Title".to_string()));
        assert_eq!(patch.access_status, Slot::Placeholder(AccessStatus::Unknown));
        assert_eq!(
            patch.thumbnails.high.value().map(String::as_str),
            Some("https://img.youtube.com/vi/dQw4w9WgXcQ/hqdefault.jpg")
        );

        let patch = page_patch(&id, "<html>no title here</html>");
        assert_eq!(patch.title, Slot::Placeholder(placeholder::TITLE.to_string()));
    }

    #[tokio::test]
    async fn test_page_fetch_skipped_when_title_known() {
        let mut record = VideoRecord::new(VideoId::new("dQw4w9WgXcQ"));
        record.title = Slot::Filled("Known".to_string());
        let fetcher = StaticPage(Ok("<title>Other - YouTube</title>".to_string()));

        let outcome = run_page_fetch(&fetcher, &record, &options()).await;
        assert!(matches!(outcome, StageOutcome::Skipped(SkipReason::TitleResolved)));
    }

    #[tokio::test]
    async fn test_page_fetch_runs_for_placeholder_title() {
        let mut record = VideoRecord::new(VideoId::new("dQw4w9WgXcQ"));
        record.title = Slot::Placeholder(placeholder::TITLE.to_string());
        let fetcher = StaticPage(Ok("<title>Real Title - YouTube</title>".to_string()));

        match run_page_fetch(&fetcher, &record, &options()).await {
            StageOutcome::Applied(patch) => {
                assert_eq!(patch.title, Slot::Filled("Real Title".to_string()))
            }
            other => panic!("expected applied outcome, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_page_fetch_failure_is_contained() {
        let record = VideoRecord::new(VideoId::new("dQw4w9WgXcQ"));
        let fetcher = StaticPage(Err(FetchError::Timeout(10)));

        let outcome = run_page_fetch(&fetcher, &record, &options()).await;
        assert!(matches!(outcome, StageOutcome::Failed(ExtractionError::Fetch(FetchError::Timeout(10)))));
    }

    #[tokio::test]
    async fn test_metadata_skipped_without_credential() {
        let outcome = run_metadata(&Credential::Absent, &VideoId::new("dQw4w9WgXcQ")).await;
        assert!(matches!(outcome, StageOutcome::Skipped(SkipReason::NoCredential)));
    }
}
