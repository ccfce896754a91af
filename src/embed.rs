use std::fmt;

use url::Url;

use crate::constants::EMBED_BASE;
use crate::error::EmbedError;

/// Player-loadable form of a video link:
/// `https://www.youtube.com/embed/{id}?enablejsapi=1&origin={origin}`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedUrl {
    video_id: String,
    url: String,
}

impl EmbedUrl {
    pub fn video_id(&self) -> &str {
        &self.video_id
    }

    pub fn as_str(&self) -> &str {
        &self.url
    }
}

impl fmt::Display for EmbedUrl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.url)
    }
}

/// Turns any of the usual video link shapes into an embed URL.
///
/// Recognized, first match wins: `youtu.be/{id}`, `youtube.com/watch?v={id}`,
/// `youtube.com/shorts/{id}`, `youtube.com/{id}`, and finally the input
/// itself as a bare id.
pub fn normalize(raw: &str, page_origin: &str) -> Result<EmbedUrl, EmbedError> {
    let video_id = extract_video_id(raw)?;
    let url = format!("{EMBED_BASE}{video_id}?enablejsapi=1&origin={page_origin}");
    Ok(EmbedUrl { video_id, url })
}

pub fn extract_video_id(raw: &str) -> Result<String, EmbedError> {
    let raw = raw.trim();

    let candidate = if let Some((_, rest)) = raw.split_once("youtu.be/") {
        rest.to_string()
    } else if raw.contains("youtube.com/watch") {
        let parsed = Url::parse(raw).map_err(|source| EmbedError::InvalidUrl {
            raw: raw.to_string(),
            source,
        })?;
        parsed
            .query_pairs()
            .find(|(key, _)| key == "v")
            .map(|(_, value)| value.into_owned())
            .ok_or_else(|| EmbedError::MissingVideoParam(raw.to_string()))?
    } else if let Some((_, rest)) = raw.split_once("youtube.com/shorts/") {
        rest.to_string()
    } else if let Some((_, rest)) = raw.split_once("youtube.com/") {
        rest.to_string()
    } else {
        raw.to_string()
    };

    let id = clean_id(&candidate);
    if id.is_empty() {
        return Err(EmbedError::EmptyId(raw.to_string()));
    }
    Ok(id.to_string())
}

// Drop trailing path segments and query strings
fn clean_id(candidate: &str) -> &str {
    let id = candidate.split('/').next().unwrap_or_default();
    id.split('?').next().unwrap_or_default()
}
