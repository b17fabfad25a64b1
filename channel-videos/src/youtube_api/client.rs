//! HTTP client for the read-only Data API endpoints the portfolio needs.

use crate::config::ApiKey;
use crate::youtube_api::{
    error::{ApiError, MissingApiKey},
    channels::ChannelListResponse,
    playlist_items::PlaylistItemListResponse,
    videos::{VideoListResponse, VideoResource},
};
use eyre::Context;
use tracing::instrument;

/// Where the Data API lives unless a test points the client elsewhere.
pub const DEFAULT_BASE_URL: &str = "https://www.googleapis.com/youtube/v3";

/// The most ids `videos.list` accepts in one request, and the largest `maxResults`
/// `playlistItems.list` honours.
pub const MAX_RESULTS_PER_REQUEST: usize = 50;

/// Client for the YouTube Data API v3, authenticated with a plain API key.
///
/// Only public data is read, so there is no OAuth here. The key is looked up on every request
/// (see [`ApiKey`]) which means a key added to the environment of a running process is picked up
/// without rebuilding the client.
#[derive(Debug, Clone)]
pub struct YouTubeClient {
    api_key: ApiKey,
    base_url: String,
    client: reqwest::Client,
}

impl YouTubeClient {
    pub fn new(api_key: ApiKey, client: reqwest::Client) -> Self {
        Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            client,
        }
    }

    /// Send requests to `base_url` instead of the public API.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into().trim_end_matches('/').to_string();
        self
    }

    /// Whether an API key is available right now.
    pub fn has_api_key(&self) -> bool {
        self.api_key.resolve().is_some()
    }

    /// Issues a keyed GET against `endpoint` and checks the status.
    ///
    /// Non-2xx responses become an [`ApiError`] carrying the status and body, so callers can
    /// tell quota exhaustion apart from other failures.
    async fn get(&self, endpoint: &str, query: &[(&str, &str)]) -> eyre::Result<reqwest::Response> {
        let Some(key) = self.api_key.resolve() else {
            return Err(MissingApiKey.into());
        };
        let url = format!("{}/{endpoint}", self.base_url);

        let response = self
            .client
            .get(&url)
            .query(query)
            .query(&[("key", key.as_str())])
            .send()
            .await
            .with_context(|| format!("send GET request to YouTube API: {endpoint}"))?;

        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            return Err(ApiError { status, body }.into());
        }

        Ok(response)
    }

    /// Looks up the uploads playlist of a channel.
    ///
    /// Costs 1 quota unit.
    ///
    /// See: <https://developers.google.com/youtube/v3/docs/channels/list>
    #[instrument(skip(self))]
    pub async fn uploads_playlist(&self, channel_id: &str) -> eyre::Result<String> {
        let response = self
            .get("channels", &[("part", "contentDetails"), ("id", channel_id)])
            .await?;

        let channels: ChannelListResponse = response
            .json()
            .await
            .context("parse YouTube channels API response as JSON")?;

        let Some(channel) = channels.items.first() else {
            eyre::bail!("channel not found: {channel_id}");
        };
        let uploads = channel
            .uploads_playlist()
            .ok_or_else(|| eyre::eyre!("channel {channel_id} has no uploads playlist"))?
            .to_string();

        tracing::debug!(channel_id, %uploads, "resolved uploads playlist");
        Ok(uploads)
    }

    /// Fetches one page of a playlist's items, newest first for an uploads playlist.
    ///
    /// Costs 1 quota unit.
    ///
    /// See: <https://developers.google.com/youtube/v3/docs/playlistItems/list>
    #[instrument(skip(self))]
    pub async fn list_playlist_items(
        &self,
        playlist_id: &str,
        max_results: u32,
        page_token: Option<&str>,
    ) -> eyre::Result<PlaylistItemListResponse> {
        let max_results = max_results.to_string();
        let mut query = vec![
            ("part", "snippet"),
            ("playlistId", playlist_id),
            ("maxResults", max_results.as_str()),
        ];
        if let Some(token) = page_token {
            query.push(("pageToken", token));
        }

        let response = self.get("playlistItems", &query).await?;
        let page: PlaylistItemListResponse = response
            .json()
            .await
            .context("parse YouTube playlistItems API response as JSON")?;

        tracing::debug!(
            total_results = page.page_info.total_results,
            returned_items = page.items.len(),
            has_next = page.next_page_token.is_some(),
            "fetched playlist items"
        );
        Ok(page)
    }

    /// Fetches duration and view count for up to [`MAX_RESULTS_PER_REQUEST`] videos at once.
    ///
    /// Costs 1 quota unit regardless of how many ids are passed.
    ///
    /// See: <https://developers.google.com/youtube/v3/docs/videos/list>
    #[instrument(skip(self, ids), fields(ids = ids.len()))]
    pub async fn list_video_details(&self, ids: &[String]) -> eyre::Result<VideoListResponse> {
        if ids.is_empty() {
            return Ok(VideoListResponse::default());
        }
        if ids.len() > MAX_RESULTS_PER_REQUEST {
            eyre::bail!(
                "videos.list accepts at most {MAX_RESULTS_PER_REQUEST} ids, got {}",
                ids.len()
            );
        }

        let ids = ids.join(",");
        let response = self
            .get(
                "videos",
                &[("part", "contentDetails,statistics"), ("id", ids.as_str())],
            )
            .await?;

        let details: VideoListResponse = response
            .json()
            .await
            .context("parse YouTube videos API response as JSON")?;

        tracing::debug!(returned_items = details.items.len(), "fetched video details");
        Ok(details)
    }

    /// Fetches everything the portfolio shows about a single video.
    ///
    /// Returns `Ok(None)` if YouTube does not know the id.
    #[instrument(skip(self))]
    pub async fn get_video(&self, video_id: &str) -> eyre::Result<Option<VideoResource>> {
        let response = self
            .get(
                "videos",
                &[
                    ("part", "snippet,contentDetails,statistics"),
                    ("id", video_id),
                ],
            )
            .await?;

        let videos: VideoListResponse = response
            .json()
            .await
            .context("parse YouTube videos API response as JSON")?;

        Ok(videos.items.into_iter().find(|v| v.id == video_id))
    }
}
