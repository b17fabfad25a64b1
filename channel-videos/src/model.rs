//! Value types shared by the provider, the fallback data and the CLI.

use jiff::{SignedDuration, Timestamp};
use serde::{Deserialize, Serialize};

/// A video as shown on the portfolio pages.
///
/// A `Video` that has not been enriched yet (no `view_count`, no `duration`) is complete enough
/// to display. Enrichment never touches any field other than those two.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Video {
    pub id: String,
    pub title: String,
    pub description: String,
    pub published_at: Timestamp,
    pub thumbnails: Thumbnails,
    pub channel_title: String,
    /// Decimal view count as reported by the Data API.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub view_count: Option<String>,
    /// ISO 8601 duration, such as `PT18M32S`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<String>,
}

impl Video {
    /// The video's duration, if it is known and parses.
    ///
    /// Durations with day components (long livestreams) and the `P0D` placeholder YouTube uses
    /// for upcoming streams are reported as unknown.
    pub fn parsed_duration(&self) -> Option<SignedDuration> {
        self.duration.as_deref().and_then(parse_iso_duration)
    }

    /// Copy enrichment data onto this video, keeping whatever it already had for missing fields.
    pub fn with_details(mut self, duration: Option<String>, view_count: Option<String>) -> Self {
        if duration.is_some() {
            self.duration = duration;
        }
        if view_count.is_some() {
            self.view_count = view_count;
        }
        self
    }
}

pub(crate) fn parse_iso_duration(s: &str) -> Option<SignedDuration> {
    s.parse::<SignedDuration>().ok()
}

/// The resolution names YouTube uses to key thumbnail variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ThumbnailSize {
    Default,
    Medium,
    High,
    Standard,
    Maxres,
}

/// A single thumbnail image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thumbnail {
    pub url: String,
    #[serde(default)]
    pub width: u32,
    #[serde(default)]
    pub height: u32,
}

impl Thumbnail {
    /// Width over height, or `None` for a degenerate image.
    pub fn aspect_ratio(&self) -> Option<f64> {
        (self.height != 0).then(|| f64::from(self.width) / f64::from(self.height))
    }
}

/// The thumbnail variants of a video. Any of them may be missing.
///
/// See: <https://developers.google.com/youtube/v3/docs/thumbnails>
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Thumbnails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Thumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medium: Option<Thumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub high: Option<Thumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub standard: Option<Thumbnail>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub maxres: Option<Thumbnail>,
}

impl Thumbnails {
    pub fn get(&self, size: ThumbnailSize) -> Option<&Thumbnail> {
        match size {
            ThumbnailSize::Default => self.default.as_ref(),
            ThumbnailSize::Medium => self.medium.as_ref(),
            ThumbnailSize::High => self.high.as_ref(),
            ThumbnailSize::Standard => self.standard.as_ref(),
            ThumbnailSize::Maxres => self.maxres.as_ref(),
        }
    }

    /// The standard `i.ytimg.com` variants for a video id, as used by the bundled data.
    pub(crate) fn ytimg(video_id: &str, with_maxres: bool) -> Self {
        let variant = |file: &str, width, height| Thumbnail {
            url: format!("https://i.ytimg.com/vi/{video_id}/{file}.jpg"),
            width,
            height,
        };
        Self {
            default: Some(variant("default", 120, 90)),
            medium: Some(variant("mqdefault", 320, 180)),
            high: Some(variant("hqdefault", 480, 360)),
            standard: None,
            maxres: with_maxres.then(|| variant("maxresdefault", 1280, 720)),
        }
    }
}

/// Where a channel's uploads live and how far back the portfolio reaches into them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelResolution {
    /// The uploads playlist id.
    pub feed_id: String,
    /// 1-based position of the anchor video in the uploads feed.
    pub start_offset: u32,
    /// Number of items in the uploads feed.
    pub total_count: u32,
}

/// One page of the filtered video listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageResponse {
    pub videos: Vec<Video>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
    pub total_results: usize,
    pub current_page: u32,
    pub total_pages: usize,
    pub has_more: bool,
}

/// Why live data was not used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FallbackReason {
    /// No API key is configured.
    MissingCredential,
    /// The Data API rejected the request for lack of quota.
    QuotaExceeded,
    /// Any other upstream failure, with the rendered error chain.
    Upstream(String),
}

impl FallbackReason {
    /// Classify an upstream failure.
    pub fn from_report(report: &eyre::Report) -> Self {
        if crate::youtube_api::is_missing_api_key(report) {
            Self::MissingCredential
        } else if crate::youtube_api::is_quota_exceeded(report) {
            Self::QuotaExceeded
        } else {
            Self::Upstream(
                report
                    .chain()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(": "),
            )
        }
    }
}

impl std::fmt::Display for FallbackReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingCredential => f.write_str("no API key configured"),
            Self::QuotaExceeded => f.write_str("API quota exceeded"),
            Self::Upstream(e) => write!(f, "upstream failure: {e}"),
        }
    }
}

/// A value together with whether it came from the live API or from fallback data.
#[derive(Debug, Clone, PartialEq)]
pub enum Sourced<T> {
    Live(T),
    Fallback { value: T, reason: FallbackReason },
}

impl<T> Sourced<T> {
    pub fn fallback(value: T, reason: FallbackReason) -> Self {
        Self::Fallback { value, reason }
    }

    pub fn is_live(&self) -> bool {
        matches!(self, Self::Live(_))
    }

    pub fn fallback_reason(&self) -> Option<&FallbackReason> {
        match self {
            Self::Live(_) => None,
            Self::Fallback { reason, .. } => Some(reason),
        }
    }

    pub fn value(&self) -> &T {
        match self {
            Self::Live(value) | Self::Fallback { value, .. } => value,
        }
    }

    pub fn into_inner(self) -> T {
        match self {
            Self::Live(value) | Self::Fallback { value, .. } => value,
        }
    }
}
