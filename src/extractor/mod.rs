// Extractor module - video info extraction with multi-source fallback
//
// Sources, in priority order:
// - Structured metadata provider (Data API, needs an API key)
// - Caption provider (watch page + timed text, no key)
// - Page fetch (watch page <title>, last resort)
//
// The orchestrator runs them strictly in sequence and merges their partial
// results; only an unresolvable reference fails the whole extraction.

pub mod diagnostics;
pub mod errors;
pub mod language;
pub mod models;
pub mod orchestrator;
pub mod resolver;
pub mod stages;
pub mod traits;
pub mod utils;

pub use diagnostics::{diagnose_error, FailureReason};
pub use errors::{ExtractionError, FetchError, ProviderError};
pub use language::is_valid_language_code;
pub use models::{
    AccessStatus, CaptionSegment, ExtractionResult, Offset, RawCaptions, RawMetadata, Thumbnails,
    VideoId, VideoInfo,
};
pub use orchestrator::{resolve_identifier, VideoInfoOrchestrator};
pub use traits::{CaptionProvider, ExtractorConfig, FetchOptions, MetadataProvider, PageFetcher};
