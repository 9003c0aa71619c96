pub mod config;
pub mod extractor;
pub mod providers;
pub mod tool;

pub use extractor::{ExtractionResult, ExtractorConfig, VideoInfo, VideoInfoOrchestrator};
pub use tool::{VideoInfoTool, TOOL_ALIAS, TOOL_NAME};

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Initialize logging with tracing.
///
/// Logs go to stderr; stdout is reserved for tool payloads. Safe to call
/// more than once.
pub fn init_logging() {
    let _ = tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .try_init();
}
