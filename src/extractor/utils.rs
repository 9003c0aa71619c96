// Helper functions shared by the extraction stages

use lazy_static::lazy_static;
use regex::Regex;

use super::models::{Thumbnails, VideoId};

/// Suffix the platform appends to every watch-page title
pub const PAGE_TITLE_SUFFIX: &str = " - YouTube";

lazy_static! {
    static ref DURATION_RE: Regex = Regex::new(r"^PT(?:(\d+)H)?(?:(\d+)M)?(?:(\d+)S)?$").unwrap();
    static ref TITLE_RE: Regex = Regex::new(r"<title>([^<]+)</title>").unwrap();
    static ref NUMERIC_ENTITY_RE: Regex = Regex::new(r"&#(x[0-9a-fA-F]+|[0-9]+);").unwrap();
    static ref TAG_RE: Regex = Regex::new(r"<[^>]+>").unwrap();
}

/// Decode a compact duration code (`PT1H2M3S`) into `H:MM:SS` or `M:SS`.
///
/// Empty, non-matching or overflowing input yields `None`.
pub fn parse_duration(code: &str) -> Option<String> {
    let caps = DURATION_RE.captures(code.trim())?;
    // Absent components are zero; present ones must fit in a u64
    let part = |i: usize| -> Option<u64> {
        match caps.get(i) {
            Some(m) => m.as_str().parse().ok(),
            None => Some(0),
        }
    };
    let (hours, minutes, seconds) = (part(1)?, part(2)?, part(3)?);

    if hours > 0 {
        Some(format!("{}:{:02}:{:02}", hours, minutes, seconds))
    } else {
        Some(format!("{}:{:02}", minutes, seconds))
    }
}

/// Pull the `<title>` out of a watch page and strip the platform suffix
pub fn extract_page_title(html: &str) -> Option<String> {
    let raw = TITLE_RE.captures(html)?.get(1)?.as_str();
    let decoded = decode_html_entities(raw);
    let title = decoded
        .strip_suffix(PAGE_TITLE_SUFFIX)
        .unwrap_or(decoded.as_str())
        .trim();

    if title.is_empty() {
        None
    } else {
        Some(title.to_string())
    }
}

/// Decode the HTML entities that show up in titles and caption text
pub fn decode_html_entities(text: &str) -> String {
    let named = text
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&apos;", "'")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&nbsp;", " ");

    let numeric = NUMERIC_ENTITY_RE.replace_all(&named, |caps: &regex::Captures| {
        let code = &caps[1];
        let value = match code.strip_prefix('x') {
            Some(hex) => u32::from_str_radix(hex, 16).ok(),
            None => code.parse::<u32>().ok(),
        };
        value
            .and_then(char::from_u32)
            .map(|c| c.to_string())
            .unwrap_or_else(|| caps[0].to_string())
    });

    // `&amp;` last so that `&amp;lt;` stays `&lt;`
    numeric.replace("&amp;", "&")
}

/// Remove markup tags (caption tracks carry `<font>` and similar)
pub fn strip_tags(text: &str) -> String {
    TAG_RE.replace_all(text, "").into_owned()
}

/// Deterministic thumbnail URLs derived from the video ID
pub fn thumbnail_urls(id: &VideoId) -> Thumbnails {
    let base = format!("https://img.youtube.com/vi/{}", id);
    Thumbnails {
        default: Some(format!("{}/default.jpg", base)),
        medium: Some(format!("{}/mqdefault.jpg", base)),
        high: Some(format!("{}/hqdefault.jpg", base)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duration_with_hours() {
        assert_eq!(parse_duration("PT1H2M3S").as_deref(), Some("1:02:03"));
        assert_eq!(parse_duration("PT10H").as_deref(), Some("10:00:00"));
    }

    #[test]
    fn test_duration_without_hours() {
        assert_eq!(parse_duration("PT5M9S").as_deref(), Some("5:09"));
        assert_eq!(parse_duration("PT45S").as_deref(), Some("0:45"));
        assert_eq!(parse_duration("PT3M7S").as_deref(), Some("3:07"));
        assert_eq!(parse_duration("PT12M").as_deref(), Some("12:00"));
    }

    #[test]
    fn test_duration_invalid_yields_none() {
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("junk"), None);
        assert_eq!(parse_duration("P1DT2H"), None);
    }

    #[test]
    fn test_duration_overflow_yields_none() {
        assert_eq!(parse_duration("PT99999999999999999999S"), None);
        assert_eq!(parse_duration("PT99999999999999999999H1M"), None);
    }

    #[test]
    fn test_extract_page_title_strips_suffix() {
        let html = "<html><head><title>Fallback Title - YouTube</title></head></html>";
        assert_eq!(extract_page_title(html).as_deref(), Some("Fallback Title"));
    }

    #[test]
    fn test_extract_page_title_decodes_entities() {
        let html = "<title>Tom &amp; Jerry &#39;Classic&#39; - YouTube</title>";
        assert_eq!(extract_page_title(html).as_deref(), Some("Tom & Jerry 'Classic'"));
    }

    #[test]
    fn test_extract_page_title_missing_or_bare_suffix() {
        assert_eq!(extract_page_title("<html></html>"), None);
        assert_eq!(extract_page_title("<title> - YouTube</title>"), None);
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode_html_entities("caf&#233; &#x263A;"), "café ☺");
        assert_eq!(decode_html_entities("&amp;lt;"), "&lt;");
    }

    #[test]
    fn test_strip_tags() {
        assert_eq!(strip_tags("<font color=\"#fff\">hi</font> there"), "hi there");
    }

    #[test]
    fn test_thumbnail_urls() {
        let thumbs = thumbnail_urls(&VideoId::new("dQw4w9WgXcQ"));
        assert_eq!(
            thumbs.medium.as_deref(),
            Some("https://img.youtube.com/vi/dQw4w9WgXcQ/mqdefault.jpg")
        );
        assert!(thumbs.default.unwrap().ends_with("/default.jpg"));
        assert!(thumbs.high.unwrap().ends_with("/hqdefault.jpg"));
    }
}
