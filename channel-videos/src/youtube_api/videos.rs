//! `videos.list` wire types.

use crate::model::{Thumbnails, Video};
use jiff::Timestamp;
use serde::{Deserialize, Serialize};

/// Response structure for the `videos.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos/list>
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoListResponse {
    /// Unknown ids are silently left out.
    #[serde(default)]
    pub items: Vec<VideoResource>,
}

/// A `video` resource, with whichever parts were requested.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#resource>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoResource {
    pub id: String,
    pub snippet: Option<VideoSnippet>,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<VideoContentDetails>,
    pub statistics: Option<VideoStatistics>,
}

impl VideoResource {
    pub fn duration(&self) -> Option<&str> {
        self.content_details.as_ref()?.duration.as_deref()
    }

    pub fn view_count(&self) -> Option<&str> {
        self.statistics.as_ref()?.view_count.as_deref()
    }

    /// A full [`Video`], if the snippet part was returned.
    pub fn into_video(self) -> Option<Video> {
        let duration = self.duration().map(str::to_owned);
        let view_count = self.view_count().map(str::to_owned);
        let snippet = self.snippet?;
        Some(Video {
            id: self.id,
            title: snippet.title,
            description: snippet.description,
            published_at: snippet.published_at,
            thumbnails: snippet.thumbnails,
            channel_title: snippet.channel_title,
            view_count,
            duration,
        })
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VideoSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(rename = "publishedAt")]
    pub published_at: Timestamp,
    #[serde(default)]
    pub thumbnails: Thumbnails,
    #[serde(rename = "channelTitle", default)]
    pub channel_title: String,
}

/// See: <https://developers.google.com/youtube/v3/docs/videos#contentDetails>
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoContentDetails {
    /// ISO 8601 duration, such as `PT15M33S`.
    pub duration: Option<String>,
}

/// Statistics about the video.
///
/// See: <https://developers.google.com/youtube/v3/docs/videos#statistics>
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VideoStatistics {
    #[serde(rename = "viewCount")]
    pub view_count: Option<String>,
}
