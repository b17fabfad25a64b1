//! In-memory [`VideoSource`] for provider tests.

use crate::model::{Thumbnail, Thumbnails};
use crate::source::VideoSource;
use crate::youtube_api::playlist_items::{PlaylistItemSnippet, ResourceId};
use crate::youtube_api::videos::{VideoContentDetails, VideoSnippet, VideoStatistics};
use crate::youtube_api::{
    ApiError, PageInfo, PlaylistItem, PlaylistItemListResponse, VideoListResponse, VideoResource,
};
use reqwest::StatusCode;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// A playlist entry with a medium thumbnail of the given size.
pub fn feed_item(id: &str, width: u32, height: u32) -> PlaylistItem {
    PlaylistItem {
        snippet: PlaylistItemSnippet {
            title: format!("title of {id}"),
            description: String::new(),
            published_at: "2024-12-01T00:00:00Z".parse().unwrap(),
            thumbnails: Thumbnails {
                medium: Some(Thumbnail {
                    url: format!("https://i.ytimg.com/vi/{id}/mqdefault.jpg"),
                    width,
                    height,
                }),
                ..Default::default()
            },
            channel_title: "Test Channel".into(),
            resource_id: ResourceId {
                video_id: id.into(),
            },
        },
    }
}

/// One channel, `UUfake` as its uploads feed, with `items` in it newest first.
///
/// Every video is ten minutes long and has `1000 * position` views.
#[derive(Debug)]
pub struct FakeSource {
    items: Vec<PlaylistItem>,
    credential: bool,
    channel_error: Option<ApiError>,
    feed_fails_after: Option<usize>,
    failing_detail_batch: Option<usize>,
    channel_calls: AtomicUsize,
    playlist_calls: AtomicUsize,
    detail_calls: AtomicUsize,
    single_video_calls: AtomicUsize,
    detail_batch_sizes: Mutex<Vec<usize>>,
}

impl FakeSource {
    pub fn new(items: Vec<PlaylistItem>) -> Self {
        Self {
            items,
            credential: true,
            channel_error: None,
            feed_fails_after: None,
            failing_detail_batch: None,
            channel_calls: AtomicUsize::new(0),
            playlist_calls: AtomicUsize::new(0),
            detail_calls: AtomicUsize::new(0),
            single_video_calls: AtomicUsize::new(0),
            detail_batch_sizes: Mutex::new(Vec::new()),
        }
    }

    pub fn without_credential(mut self) -> Self {
        self.credential = false;
        self
    }

    /// Every channel lookup fails with `error`.
    pub fn failing_channel(mut self, error: ApiError) -> Self {
        self.channel_error = Some(error);
        self
    }

    /// The first `n` playlist requests succeed, all later ones fail with a 500.
    pub fn failing_feed_after(mut self, n: usize) -> Self {
        self.feed_fails_after = Some(n);
        self
    }

    /// The detail request with this (0-based) index fails.
    pub fn failing_detail_batch(mut self, index: usize) -> Self {
        self.failing_detail_batch = Some(index);
        self
    }

    pub fn channel_calls(&self) -> usize {
        self.channel_calls.load(Ordering::SeqCst)
    }

    pub fn playlist_calls(&self) -> usize {
        self.playlist_calls.load(Ordering::SeqCst)
    }

    pub fn detail_calls(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn single_video_calls(&self) -> usize {
        self.single_video_calls.load(Ordering::SeqCst)
    }

    pub fn total_calls(&self) -> usize {
        self.channel_calls() + self.playlist_calls() + self.detail_calls() + self.single_video_calls()
    }

    pub fn detail_batch_sizes(&self) -> Vec<usize> {
        self.detail_batch_sizes.lock().unwrap().clone()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|item| item.video_id() == id)
    }

    fn server_error() -> ApiError {
        ApiError {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            body: "backend error".into(),
        }
    }
}

impl VideoSource for FakeSource {
    fn has_credential(&self) -> bool {
        self.credential
    }

    async fn uploads_playlist(&self, _channel_id: &str) -> eyre::Result<String> {
        self.channel_calls.fetch_add(1, Ordering::SeqCst);
        match &self.channel_error {
            Some(error) => Err(error.clone().into()),
            None => Ok("UUfake".into()),
        }
    }

    async fn playlist_page(
        &self,
        _playlist_id: &str,
        max_results: u32,
        page_token: Option<String>,
    ) -> eyre::Result<PlaylistItemListResponse> {
        let call = self.playlist_calls.fetch_add(1, Ordering::SeqCst);
        if self.feed_fails_after.is_some_and(|n| call >= n) {
            return Err(Self::server_error().into());
        }

        let start = page_token
            .and_then(|token| token.parse::<usize>().ok())
            .unwrap_or(0)
            .min(self.items.len());
        let end = (start + max_results as usize).min(self.items.len());
        Ok(PlaylistItemListResponse {
            items: self.items[start..end].iter().cloned().collect(),
            page_info: PageInfo {
                total_results: self.items.len() as u32,
                ..Default::default()
            },
            next_page_token: (end < self.items.len()).then(|| end.to_string()),
        })
    }

    async fn video_details(&self, ids: &[String]) -> eyre::Result<VideoListResponse> {
        let call = self.detail_calls.fetch_add(1, Ordering::SeqCst);
        self.detail_batch_sizes.lock().unwrap().push(ids.len());
        if self.failing_detail_batch == Some(call) {
            return Err(Self::server_error().into());
        }

        let items = ids
            .iter()
            .filter_map(|id| {
                let position = self.position(id)?;
                Some(VideoResource {
                    id: id.clone(),
                    snippet: None,
                    content_details: Some(VideoContentDetails {
                        duration: Some("PT10M".into()),
                    }),
                    statistics: Some(VideoStatistics {
                        view_count: Some((position * 1000).to_string()),
                    }),
                })
            })
            .collect();
        Ok(VideoListResponse { items })
    }

    async fn video(&self, id: &str) -> eyre::Result<Option<VideoResource>> {
        self.single_video_calls.fetch_add(1, Ordering::SeqCst);
        let Some(position) = self.position(id) else {
            return Ok(None);
        };

        let snippet = self.items[position].snippet.clone();
        Ok(Some(VideoResource {
            id: id.to_string(),
            snippet: Some(VideoSnippet {
                title: snippet.title,
                description: snippet.description,
                published_at: snippet.published_at,
                thumbnails: snippet.thumbnails,
                channel_title: snippet.channel_title,
            }),
            content_details: Some(VideoContentDetails {
                duration: Some("PT10M".into()),
            }),
            statistics: Some(VideoStatistics {
                view_count: Some((position * 1000).to_string()),
            }),
        }))
    }
}
