// Video info orchestrator - sequential multi-source fallback
//
// Strategy:
// 1. Structured metadata (only with an API key)
// 2. Captions, plus any title/description still missing
// 3. Watch-page scrape, only while no real title is known
//
// Later stages fill gaps; they never replace values from earlier stages.

use tracing::{debug, error, info, warn};

use super::diagnostics::{diagnose_error, FailureReason};
use super::errors::ExtractionError;
use super::models::{ExtractionResult, VideoId, VideoRecord};
use super::resolver::resolve;
use super::stages::{
    run_captions, run_metadata, run_page_fetch, Credential, StageKind, StageOutcome,
};
use super::traits::{CaptionProvider, ExtractorConfig, MetadataProvider, PageFetcher};
use crate::providers::{DataApiClient, HttpPageFetcher, WatchPageCaptionClient};

/// Orchestrator that runs the extraction stages in priority order
pub struct VideoInfoOrchestrator {
    credential: Credential,
    captions: Box<dyn CaptionProvider>,
    pages: Box<dyn PageFetcher>,
    config: ExtractorConfig,
}

impl VideoInfoOrchestrator {
    /// Build the orchestrator with the HTTP-backed providers
    pub fn from_config(config: ExtractorConfig) -> Result<Self, ExtractionError> {
        let metadata = match &config.api_key {
            Some(key) => {
                let client = DataApiClient::new(key.clone(), &config)?;
                Some(Box::new(client) as Box<dyn MetadataProvider>)
            }
            None => None,
        };
        let captions = WatchPageCaptionClient::new(HttpPageFetcher::new(&config)?, &config);
        let pages = HttpPageFetcher::new(&config)?;

        Ok(Self::with_providers(metadata, Box::new(captions), Box::new(pages), config))
    }

    /// Build the orchestrator from explicit providers.
    ///
    /// A `None` metadata provider is treated exactly like a missing API key.
    pub fn with_providers(
        metadata: Option<Box<dyn MetadataProvider>>,
        captions: Box<dyn CaptionProvider>,
        pages: Box<dyn PageFetcher>,
        config: ExtractorConfig,
    ) -> Self {
        let credential = match metadata {
            Some(provider) if config.api_key.is_some() => Credential::Present(provider),
            _ => Credential::Absent,
        };

        Self {
            credential,
            captions,
            pages,
            config,
        }
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_present()
    }

    /// Extract video info from a URL or ID, never failing past the resolver
    pub async fn extract(&self, reference: &str, language: Option<&str>) -> ExtractionResult {
        let mut attempts = Vec::new();

        let id = match resolve(reference) {
            Ok(id) => id,
            Err(e) => {
                let error = ExtractionError::failed(e);
                warn!(reference, error = %error, "Could not resolve video reference");
                return ExtractionResult::Failure {
                    error: error.to_string(),
                    attempts,
                };
            }
        };

        info!(video_id = %id, "Extracting video info");
        let mut record = VideoRecord::new(id);

        for stage in StageKind::PIPELINE {
            let outcome = self.run_stage(stage, &record, language).await;

            if let Some(label) = outcome.attempt_label(stage) {
                attempts.push(label);
            }

            match outcome {
                StageOutcome::Applied(patch) => {
                    info!(stage = %stage, video_id = %record.id, "Stage succeeded");
                    record.merge(patch);
                }
                StageOutcome::Skipped(reason) => {
                    debug!(stage = %stage, ?reason, "Stage skipped");
                }
                StageOutcome::Failed(e) => log_stage_failure(stage, &record.id, &e.to_string()),
            }
        }

        let info = record.finalize();
        debug!(video_id = %info.id, captions = info.subtitles.len(), "Extraction finished");

        ExtractionResult::Success { info, attempts }
    }

    async fn run_stage(
        &self,
        stage: StageKind,
        record: &VideoRecord,
        language: Option<&str>,
    ) -> StageOutcome {
        match stage {
            StageKind::Metadata => {
                if let Credential::Present(provider) = &self.credential {
                    info!(provider = provider.name(), "Trying structured metadata provider...");
                }
                run_metadata(&self.credential, &record.id).await
            }
            StageKind::Captions => {
                info!(provider = self.captions.name(), "Trying caption provider...");
                run_captions(self.captions.as_ref(), &record.id, language).await
            }
            StageKind::PageFetch => {
                let options = self.config.page_fetch_options();
                run_page_fetch(self.pages.as_ref(), record, &options).await
            }
        }
    }
}

/// Configuration problems (rejected key, exhausted quota) are logged as errors
fn log_stage_failure(stage: StageKind, id: &VideoId, message: &str) {
    let reason = diagnose_error(message).unwrap_or(FailureReason::Unknown);

    if reason.is_configuration() {
        error!(
            stage = %stage,
            video_id = %id,
            reason = reason.description(),
            hint = reason.suggestion(),
            error = %message,
            "Stage failed on configuration, continuing with next source"
        );
    } else {
        warn!(
            stage = %stage,
            video_id = %id,
            reason = reason.description(),
            retryable = reason.is_retryable(),
            error = %message,
            "Stage failed, continuing with next source"
        );
    }
}

/// Resolve a reference without running any stage
pub fn resolve_identifier(reference: &str) -> Result<VideoId, ExtractionError> {
    resolve(reference)
}
