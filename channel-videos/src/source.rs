//! The seam between the provider and the Data API.

use crate::youtube_api::{
    PlaylistItemListResponse, VideoListResponse, VideoResource, YouTubeClient,
};
use std::future::Future;

/// The upstream calls [`crate::VideoProvider`] relies on.
///
/// [`YouTubeClient`] is the real implementation; tests substitute an in-memory feed that counts
/// calls and injects failures.
pub trait VideoSource: Send + Sync {
    /// Whether requests can be made at all. Checked on every provider call.
    fn has_credential(&self) -> bool;

    /// Map a channel to its uploads playlist.
    fn uploads_playlist(
        &self,
        channel_id: &str,
    ) -> impl Future<Output = eyre::Result<String>> + Send;

    /// One page of a playlist.
    fn playlist_page(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<String>,
    ) -> impl Future<Output = eyre::Result<PlaylistItemListResponse>> + Send;

    /// Duration and statistics for at most 50 videos.
    fn video_details(
        &self,
        ids: &[String],
    ) -> impl Future<Output = eyre::Result<VideoListResponse>> + Send;

    /// Full metadata for a single video.
    fn video(&self, id: &str) -> impl Future<Output = eyre::Result<Option<VideoResource>>> + Send;
}

impl VideoSource for YouTubeClient {
    fn has_credential(&self) -> bool {
        self.has_api_key()
    }

    async fn uploads_playlist(&self, channel_id: &str) -> eyre::Result<String> {
        YouTubeClient::uploads_playlist(self, channel_id).await
    }

    async fn playlist_page(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<String>,
    ) -> eyre::Result<PlaylistItemListResponse> {
        self.list_playlist_items(playlist_id, max_results, page_token.as_deref())
            .await
    }

    async fn video_details(&self, ids: &[String]) -> eyre::Result<VideoListResponse> {
        self.list_video_details(ids).await
    }

    async fn video(&self, id: &str) -> eyre::Result<Option<VideoResource>> {
        self.get_video(id).await
    }
}
