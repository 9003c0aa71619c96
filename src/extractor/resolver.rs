// Identifier resolver - turns a user-supplied reference into a video ID
//
// Accepted shapes:
// - https://www.youtube.com/watch?v=<id>
// - https://youtu.be/<id>
// - https://www.youtube.com/embed/<id>
// - https://www.youtube.com/v/<id>
// - bare 11-character ID

use lazy_static::lazy_static;
use regex::Regex;
use url::Url;

use super::errors::ExtractionError;
use super::models::VideoId;

const PRIMARY_DOMAIN: &str = "youtube.com";
const SHORT_LINK_DOMAIN: &str = "youtu.be";

lazy_static! {
    static ref BARE_ID_RE: Regex = Regex::new(r"^[a-zA-Z0-9_-]{11}$").unwrap();
}

/// Resolve a URL or bare ID into a canonical video ID
pub fn resolve(reference: &str) -> Result<VideoId, ExtractionError> {
    if let Ok(url) = Url::parse(reference) {
        if let Some(id) = id_from_url(&url) {
            return Ok(VideoId::new(id));
        }
    }

    if is_bare_id(reference) {
        return Ok(VideoId::new(reference));
    }

    Err(ExtractionError::InvalidReference(reference.to_string()))
}

/// Check the bare-identifier shape (11 chars of `[A-Za-z0-9_-]`)
pub fn is_bare_id(reference: &str) -> bool {
    BARE_ID_RE.is_match(reference)
}

fn id_from_url(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    let on_primary = host.contains(PRIMARY_DOMAIN);

    if on_primary {
        let v = url
            .query_pairs()
            .find(|(k, _)| k == "v")
            .map(|(_, v)| v.into_owned())
            .filter(|v| !v.is_empty());
        if v.is_some() {
            return v;
        }
    }

    if host == SHORT_LINK_DOMAIN || host.ends_with(".youtu.be") {
        return url
            .path_segments()
            .and_then(|mut segs| segs.next())
            .filter(|s| !s.is_empty())
            .map(str::to_string);
    }

    if on_primary {
        for marker in ["/embed/", "/v/"] {
            if let Some(id) = text_after(url.path(), marker) {
                return Some(id);
            }
        }
    }

    None
}

/// Text following `marker` in `path`, up to the next `/`
fn text_after(path: &str, marker: &str) -> Option<String> {
    let (_, rest) = path.split_once(marker)?;
    let id = rest.split('/').next().unwrap_or(rest);
    if id.is_empty() {
        None
    } else {
        Some(id.to_string())
    }
}
