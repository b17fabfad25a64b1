//! The video listing behind the portfolio's work pages.
//!
//! A request for a page runs through these stages:
//!
//! 1. [`VideoProvider::resolve_channel`] finds the channel's uploads feed and how far back into
//!    it the portfolio reaches (cached for an hour).
//! 2. [`VideoProvider::materialize`] walks that feed newest first and enriches the entries with
//!    durations and view counts via [`VideoProvider::enrich`] (cached for 15 minutes).
//! 3. [`crate::paging::assemble_page`] drops Shorts and slices out the requested page.
//!
//! Any stage that cannot reach the API degrades instead of failing: the listing as a whole then
//! comes from [`crate::fallback`], and the result says so via [`Sourced::Fallback`].

use crate::cache::{Clock, SystemClock, TtlCache};
use crate::config::ProviderConfig;
use crate::fallback;
use crate::model::{ChannelResolution, FallbackReason, PageResponse, Sourced, Video};
use crate::paging;
use crate::source::VideoSource;
use std::sync::Arc;

mod enrich;
mod materialize;
mod resolve;

#[cfg(test)]
mod fake;

/// Cached, degrading access to a channel's video listing.
#[derive(Debug)]
pub struct VideoProvider<S, C = SystemClock> {
    source: S,
    clock: C,
    config: ProviderConfig,
    channels: TtlCache<String, ChannelResolution>,
    feeds: TtlCache<String, Arc<[Video]>>,
    videos: TtlCache<String, Option<Video>>,
}

impl<S: VideoSource> VideoProvider<S> {
    pub fn new(source: S, config: ProviderConfig) -> Self {
        Self::with_clock(source, config, SystemClock)
    }
}

impl<S: VideoSource, C: Clock> VideoProvider<S, C> {
    pub fn with_clock(source: S, config: ProviderConfig, clock: C) -> Self {
        Self {
            channels: TtlCache::new(config.channel_ttl),
            feeds: TtlCache::new(config.videos_ttl),
            videos: TtlCache::new(config.video_ttl),
            source,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &ProviderConfig {
        &self.config
    }

    /// One page of the channel's videos, Shorts excluded.
    ///
    /// `page_token` is whatever a previous response returned as `next_page_token`; `None`, an
    /// empty string, or anything unrecognisable means the first page. This never fails: when
    /// live data is unavailable the page is cut from the bundled demo videos instead.
    #[tracing::instrument(skip(self))]
    pub async fn get_videos(
        &self,
        page_token: Option<&str>,
        page_size: usize,
    ) -> Sourced<PageResponse> {
        let page = paging::decode_page_token(page_token);

        if !self.source.has_credential() {
            tracing::debug!("no YouTube API key configured, serving demo videos");
            return Sourced::fallback(
                fallback::demo_page(page, page_size),
                FallbackReason::MissingCredential,
            );
        }

        let resolution = match self.resolve_channel().await {
            Sourced::Live(resolution) => resolution,
            Sourced::Fallback { reason, .. } => {
                tracing::info!(%reason, "channel unavailable, serving demo videos");
                return Sourced::fallback(fallback::demo_page(page, page_size), reason);
            }
        };

        let wanted = resolution.start_offset as usize;
        match self.materialize(&resolution.feed_id, wanted).await {
            Ok(videos) => {
                let response =
                    paging::assemble_page(&videos, page, page_size, &self.config.shorts);
                tracing::debug!(
                    page,
                    returned = response.videos.len(),
                    total_results = response.total_results,
                    "serving live page"
                );
                Sourced::Live(response)
            }
            Err(e) => {
                let reason = FallbackReason::from_report(&e);
                if reason == FallbackReason::QuotaExceeded {
                    tracing::info!("YouTube API quota exceeded while listing uploads, serving demo videos");
                } else {
                    tracing::error!(error = ?e, "failed to list uploads, serving demo videos");
                }
                Sourced::fallback(fallback::demo_page(page, page_size), reason)
            }
        }
    }

    /// Everything the portfolio shows about one video.
    ///
    /// `None` when no API key is configured, YouTube doesn't know the id, or the lookup fails.
    /// Found and not-found answers are both cached.
    #[tracing::instrument(skip(self))]
    pub async fn get_video_by_id(&self, video_id: &str) -> Option<Video> {
        if !self.source.has_credential() {
            return None;
        }

        let key = video_id.to_string();
        if let Some(cached) = self.videos.get(&key, self.clock.now()).await {
            return cached;
        }

        match self.source.video(video_id).await {
            Ok(resource) => {
                let video = resource.and_then(|r| r.into_video());
                self.videos.set(key, video.clone(), self.clock.now()).await;
                video
            }
            Err(e) => {
                tracing::warn!(error = ?e, "video lookup failed");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fake::{FakeSource, feed_item};
    use super::*;
    use crate::cache::ManualClock;
    use crate::youtube_api::ApiError;
    use jiff::{SignedDuration, Timestamp};
    use pretty_assertions::assert_eq;
    use reqwest::StatusCode;

    fn provider(source: FakeSource) -> (VideoProvider<FakeSource, Arc<ManualClock>>, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new(
            "2025-01-01T00:00:00Z".parse::<Timestamp>().unwrap(),
        ));
        let provider = VideoProvider::with_clock(source, ProviderConfig::default(), clock.clone());
        (provider, clock)
    }

    #[tokio::test]
    async fn missing_credential_serves_demo_for_any_token() {
        let (provider, _) = provider(FakeSource::new(vec![]).without_credential());
        for token in [None, Some(""), Some("page_2"), Some("garbage"), Some("page_999")] {
            let response = provider.get_videos(token, 9).await;
            assert_eq!(
                response.fallback_reason(),
                Some(&FallbackReason::MissingCredential)
            );
            assert_eq!(response.value().total_results, 28);
        }

        let garbage = provider.get_videos(Some("garbage"), 9).await.into_inner();
        assert_eq!(garbage.current_page, 1);
        assert_eq!(garbage.videos.len(), 9);
        assert_eq!(provider.source.total_calls(), 0);
    }

    #[tokio::test]
    async fn live_pages_skip_shorts() {
        // 30 uploads, anchor at position 28, every fourth one a Short
        let items = (0..30)
            .map(|i| {
                let id = if i == 27 { "YG9S0K4p2tQ".to_string() } else { format!("v{i}") };
                let (w, h) = if i % 4 == 3 && i != 27 { (180, 320) } else { (320, 180) };
                feed_item(&id, w, h)
            })
            .collect();
        let (provider, _) = provider(FakeSource::new(items));

        let first = provider.get_videos(None, 9).await;
        assert!(first.is_live());
        let first = first.into_inner();
        // 28 up to the anchor, 6 of them portrait
        assert_eq!(first.total_results, 22);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.videos[0].id, "v0");
        assert_eq!(first.videos[3].id, "v4");
        assert_eq!(first.videos[0].duration.as_deref(), Some("PT10M"));

        let third = provider.get_videos(Some("page_3"), 9).await.into_inner();
        assert_eq!(third.videos.len(), 4);
        assert!(!third.has_more);
        assert_eq!(third.videos.last().unwrap().id, "YG9S0K4p2tQ");
    }

    #[tokio::test]
    async fn repeated_uploads_are_listed_once() {
        let items = ["v0", "v1", "v2", "v3", "v3", "v4", "v5", "YG9S0K4p2tQ"]
            .iter()
            .map(|id| feed_item(id, 320, 180))
            .collect();
        let (provider, _) = provider(FakeSource::new(items));

        let page = provider.get_videos(None, 20).await.into_inner();
        assert_eq!(
            page.videos.iter().map(|v| v.id.as_str()).collect::<Vec<_>>(),
            vec!["v0", "v1", "v2", "v3", "v4", "v5", "YG9S0K4p2tQ"]
        );
        assert_eq!(page.total_results, 7);
        assert!(page.videos.iter().all(|v| v.duration.as_deref() == Some("PT10M")));
    }

    #[tokio::test]
    async fn pages_share_one_materialization() {
        let items = (0..60).map(|i| feed_item(&format!("v{i}"), 320, 180)).collect();
        let (provider, clock) = provider(FakeSource::new(items));

        provider.get_videos(None, 9).await;
        provider.get_videos(Some("page_2"), 9).await;
        provider.get_videos(Some("page_3"), 9).await;
        assert_eq!(provider.source.channel_calls(), 1);
        // one probe for the anchor, then two pages for the 60-item feed
        assert_eq!(provider.source.playlist_calls(), 3);
        assert_eq!(provider.source.detail_calls(), 2);

        clock.advance(SignedDuration::from_mins(20));
        provider.get_videos(None, 9).await;
        assert_eq!(provider.source.channel_calls(), 1);
        assert_eq!(provider.source.playlist_calls(), 5);
    }

    #[tokio::test]
    async fn quota_during_resolution_serves_demo() {
        let source = FakeSource::new(vec![feed_item("v0", 320, 180)]).failing_channel(ApiError {
            status: StatusCode::FORBIDDEN,
            body: r#"{"error":{"message":"The request cannot be completed because you have exceeded your quota."}}"#.into(),
        });
        let (provider, _) = provider(source);

        let response = provider.get_videos(None, 9).await;
        assert_eq!(response.fallback_reason(), Some(&FallbackReason::QuotaExceeded));
        assert_eq!(response.value().videos[0].id, "YG9S0K4p2tQ");
        assert_eq!(provider.source.playlist_calls(), 0);
    }

    #[tokio::test]
    async fn failing_feed_serves_demo() {
        let source = FakeSource::new(vec![feed_item("v0", 320, 180)]).failing_feed_after(1);
        let (provider, _) = provider(source);

        let response = provider.get_videos(None, 9).await;
        assert!(matches!(
            response.fallback_reason(),
            Some(FallbackReason::Upstream(_))
        ));
        assert_eq!(response.value().total_results, 28);
    }

    #[tokio::test]
    async fn single_video_lookups_are_cached() {
        let (provider, clock) = provider(FakeSource::new(vec![feed_item("v0", 320, 180)]));

        let video = provider.get_video_by_id("v0").await.unwrap();
        assert_eq!(video.title, "title of v0");
        assert_eq!(video.duration.as_deref(), Some("PT10M"));
        assert_eq!(provider.get_video_by_id("v0").await, Some(video));
        assert_eq!(provider.get_video_by_id("nope").await, None);
        assert_eq!(provider.get_video_by_id("nope").await, None);
        assert_eq!(provider.source.single_video_calls(), 2);

        clock.advance(SignedDuration::from_mins(31));
        provider.get_video_by_id("v0").await;
        assert_eq!(provider.source.single_video_calls(), 3);
    }

    #[tokio::test]
    async fn single_video_needs_credential() {
        let (provider, _) =
            provider(FakeSource::new(vec![feed_item("v0", 320, 180)]).without_credential());
        assert_eq!(provider.get_video_by_id("v0").await, None);
        assert_eq!(provider.source.total_calls(), 0);
    }
}
