// Caption provider that reads the watch page player response and its timed-text track

use async_trait::async_trait;
use lazy_static::lazy_static;
use regex::Regex;
use serde::Deserialize;
use tracing::debug;

use super::http::HttpPageFetcher;
use crate::extractor::errors::ProviderError;
use crate::extractor::models::{CaptionSegment, Offset, RawCaptions, VideoId};
use crate::extractor::traits::{CaptionProvider, ExtractorConfig, FetchOptions, PageFetcher};
use crate::extractor::utils::{decode_html_entities, strip_tags};

const PLAYER_RESPONSE_MARKER: &str = "ytInitialPlayerResponse";
const DEFAULT_LANGUAGE: &str = "en";

lazy_static! {
    static ref TEXT_RE: Regex =
        Regex::new(r#"(?s)<text start="([^"]*)"(?: dur="([^"]*)")?[^>]*>(.*?)</text>"#).unwrap();
}

/// Unauthenticated caption client (watch page + timed text)
pub struct WatchPageCaptionClient<F: PageFetcher = HttpPageFetcher> {
    fetcher: F,
    options: FetchOptions,
}

impl<F: PageFetcher> WatchPageCaptionClient<F> {
    pub fn new(fetcher: F, config: &ExtractorConfig) -> Self {
        Self {
            fetcher,
            options: config.provider_fetch_options(),
        }
    }
}

#[async_trait]
impl<F: PageFetcher> CaptionProvider for WatchPageCaptionClient<F> {
    fn name(&self) -> &'static str {
        "watch-page-captions"
    }

    async fn fetch(&self, id: &VideoId, language: Option<&str>) -> Result<RawCaptions, ProviderError> {
        let page = self.fetcher.get(&id.watch_url(), &self.options).await?;
        let player = parse_player_response(&page)?;

        let details = player.video_details.unwrap_or_default();
        let tracks = player
            .captions
            .map(|c| c.renderer.caption_tracks)
            .unwrap_or_default();

        let mut captions = RawCaptions {
            title: details.title,
            description: details.short_description,
            segments: Vec::new(),
        };

        let preferred = language.unwrap_or(DEFAULT_LANGUAGE);
        let track = match select_track(&tracks, preferred) {
            Some(track) => track,
            None => {
                debug!(video_id = %id, "No caption tracks listed");
                return Ok(captions);
            }
        };

        debug!(
            video_id = %id,
            language = track.language_code.as_str(),
            auto_generated = track.is_auto_generated(),
            "Fetching caption track"
        );

        let xml = self.fetcher.get(&track.base_url, &self.options).await?;
        captions.segments = parse_timed_text(&xml);

        Ok(captions)
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PlayerResponse {
    video_details: Option<VideoDetails>,
    captions: Option<PlayerCaptions>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct VideoDetails {
    title: Option<String>,
    short_description: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PlayerCaptions {
    #[serde(rename = "playerCaptionsTracklistRenderer")]
    renderer: TracklistRenderer,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct TracklistRenderer {
    #[serde(default)]
    caption_tracks: Vec<CaptionTrack>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
struct CaptionTrack {
    base_url: String,
    #[serde(default)]
    language_code: String,
    kind: Option<String>,
}

impl CaptionTrack {
    fn is_auto_generated(&self) -> bool {
        self.kind.as_deref() == Some("asr")
    }

    fn base_language(&self) -> &str {
        base_language(&self.language_code)
    }
}

fn base_language(code: &str) -> &str {
    code.split(|c| c == '-' || c == '_').next().unwrap_or(code)
}

/// Find the embedded player response JSON in a watch page
fn parse_player_response(page: &str) -> Result<PlayerResponse, ProviderError> {
    for (index, _) in page.match_indices(PLAYER_RESPONSE_MARKER) {
        let rest = page[index + PLAYER_RESPONSE_MARKER.len()..]
            .trim_start_matches(|c: char| c == '"' || c == ']' || c == '=' || c.is_whitespace());
        if !rest.starts_with('{') {
            continue;
        }

        // The object is followed by more script; read one value and stop
        let mut de = serde_json::Deserializer::from_str(rest);
        match PlayerResponse::deserialize(&mut de) {
            Ok(player) => return Ok(player),
            Err(e) => debug!(error = %e, "Skipping unparsable player response candidate"),
        }
    }

    Err(ProviderError::Parse(
        "Player response not found in watch page".to_string(),
    ))
}

/// Pick a track: exact language (manual before auto), then same base language, then the first one
fn select_track<'a>(tracks: &'a [CaptionTrack], preferred: &str) -> Option<&'a CaptionTrack> {
    let wanted = preferred.replace('_', "-").to_lowercase();
    let wanted_base = base_language(&wanted);
    let exact = |t: &&CaptionTrack| t.language_code.to_lowercase() == wanted;

    tracks
        .iter()
        .filter(exact)
        .find(|t| !t.is_auto_generated())
        .or_else(|| tracks.iter().find(exact))
        .or_else(|| {
            tracks
                .iter()
                .find(|t| t.base_language().eq_ignore_ascii_case(wanted_base))
        })
        .or_else(|| tracks.first())
}

/// Parse a legacy timed-text document into caption segments
fn parse_timed_text(xml: &str) -> Vec<CaptionSegment> {
    TEXT_RE
        .captures_iter(xml)
        .filter_map(|caps| {
            let body = caps.get(3).map_or("", |m| m.as_str());
            let text = decode_html_entities(&strip_tags(&decode_html_entities(body)))
                .replace('\n', " ")
                .trim()
                .to_string();
            if text.is_empty() {
                return None;
            }

            Some(CaptionSegment {
                text,
                start: Offset::Encoded(caps[1].to_string()),
                duration: Offset::Encoded(
                    caps.get(2).map_or("0", |m| m.as_str()).to_string(),
                ),
            })
        })
        .collect()
}
