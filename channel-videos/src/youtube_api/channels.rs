//! `channels.list` wire types.

use serde::{Deserialize, Serialize};

/// Response structure for the `channels.list` API call.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels/list>
#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelListResponse {
    /// Absent entirely when no channel matched.
    #[serde(default)]
    pub items: Vec<Channel>,
}

/// A `channel` resource, requested with `part=contentDetails` only.
///
/// See: <https://developers.google.com/youtube/v3/docs/channels#resource>
#[derive(Debug, Serialize, Deserialize)]
pub struct Channel {
    pub id: String,
    #[serde(rename = "contentDetails")]
    pub content_details: Option<ChannelContentDetails>,
}

impl Channel {
    /// The id of the playlist holding every upload of this channel.
    pub fn uploads_playlist(&self) -> Option<&str> {
        self.content_details
            .as_ref()?
            .related_playlists
            .uploads
            .as_deref()
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ChannelContentDetails {
    #[serde(rename = "relatedPlaylists", default)]
    pub related_playlists: RelatedPlaylists,
}

/// Playlists YouTube maintains automatically for a channel.
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RelatedPlaylists {
    /// Newest-first list of the channel's uploads.
    pub uploads: Option<String>,
}
