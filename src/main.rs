use clap::Parser;
use serde_json::json;
use tracing::{error, info};

use youtube_video_info_lib::tool::{definitions, VideoInfoTool, TOOL_NAME};
use youtube_video_info_lib::{config, init_logging, VideoInfoOrchestrator};

#[derive(Parser)]
#[command(name = "youtube-video-info")]
#[command(about = "Extract YouTube video metadata, statistics and captions as structured JSON")]
struct Cli {
    /// Video URL or 11-character video ID
    #[arg(required_unless_present = "list_tools")]
    video: Option<String>,

    /// Preferred caption language (e.g., "en", "es", "fr")
    #[arg(short, long)]
    lang: Option<String>,

    /// Print the tool definitions and exit
    #[arg(long)]
    list_tools: bool,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    let config = config::load();
    init_logging();

    if cli.list_tools {
        match serde_json::to_string_pretty(&definitions()) {
            Ok(text) => println!("{}", text),
            Err(e) => {
                eprintln!("Error: {}", e);
                std::process::exit(1);
            }
        }
        return;
    }

    let orchestrator = match VideoInfoOrchestrator::from_config(config) {
        Ok(orchestrator) => orchestrator,
        Err(e) => {
            error!(error = %e, "Could not initialize providers");
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };
    if !orchestrator.has_credential() {
        info!("YOUTUBE_API_KEY not set, skipping the Data API and relying on captions and page fallback");
    }
    let tool = VideoInfoTool::new(orchestrator);

    let mut args = json!({ "videoUrl": cli.video.unwrap_or_default() });
    if let Some(lang) = cli.lang {
        args["languageCode"] = json!(lang);
    }

    match tool.dispatch(TOOL_NAME, args).await {
        Ok(response) => {
            println!("{}", response.text());
            if response.is_error {
                std::process::exit(1);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}
