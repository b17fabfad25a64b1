//! `playlistItems.list` wire types.

use crate::model::{Thumbnails, Video};
use crate::youtube_api::types::PageInfo;
use jiff::Timestamp;
use serde::{Deserialize, Serialize};
use std::collections::VecDeque;

/// Response structure for the `playlistItems.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems/list>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemListResponse {
    #[serde(default)]
    pub items: VecDeque<PlaylistItem>,
    #[serde(rename = "pageInfo", default)]
    pub page_info: PageInfo,
    /// Continuation token for the next page, absent on the last one.
    #[serde(rename = "nextPageToken", default)]
    pub next_page_token: Option<String>,
}

/// One entry of a playlist, requested with `part=snippet`.
///
/// See: <https://developers.google.com/youtube/v3/docs/playlistItems#resource>
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItem {
    pub snippet: PlaylistItemSnippet,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlaylistItemSnippet {
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// When the item was added to the playlist; for the uploads playlist this is the upload time.
    #[serde(rename = "publishedAt")]
    pub published_at: Timestamp,
    #[serde(default)]
    pub thumbnails: Thumbnails,
    #[serde(rename = "channelTitle", default)]
    pub channel_title: String,
    #[serde(rename = "resourceId")]
    pub resource_id: ResourceId,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceId {
    #[serde(rename = "videoId")]
    pub video_id: String,
}

impl PlaylistItem {
    pub fn video_id(&self) -> &str {
        &self.snippet.resource_id.video_id
    }

    /// An unenriched [`Video`] for this entry.
    pub fn into_video(self) -> Video {
        let PlaylistItemSnippet {
            title,
            description,
            published_at,
            thumbnails,
            channel_title,
            resource_id,
        } = self.snippet;
        Video {
            id: resource_id.video_id,
            title,
            description,
            published_at,
            thumbnails,
            channel_title,
            view_count: None,
            duration: None,
        }
    }
}
