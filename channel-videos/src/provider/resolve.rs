use super::VideoProvider;
use crate::cache::Clock;
use crate::model::{ChannelResolution, FallbackReason, Sourced};
use crate::source::VideoSource;
use eyre::Context;

impl<S: VideoSource, C: Clock> VideoProvider<S, C> {
    /// Find the configured channel's uploads feed and the position of the anchor video in it.
    ///
    /// Live answers are cached for `channel_ttl`. Without an API key, or if the channel lookup
    /// fails for any reason, the configured fallback resolution is returned instead.
    ///
    /// The anchor is only searched for in the first page of the feed. If it isn't there, the
    /// offset is assumed to be `min(default offset, feed length)` rather than paging further.
    #[tracing::instrument(skip(self), fields(channel_id = %self.config.channel_id))]
    pub async fn resolve_channel(&self) -> Sourced<ChannelResolution> {
        let channel_id = &self.config.channel_id;
        if let Some(cached) = self.channels.get(channel_id, self.clock.now()).await {
            return Sourced::Live(cached);
        }

        if !self.source.has_credential() {
            tracing::debug!("no YouTube API key configured, using fallback channel data");
            return self.fallback_resolution(FallbackReason::MissingCredential);
        }

        let feed_id = match self
            .source
            .uploads_playlist(channel_id)
            .await
            .context("look up uploads playlist")
        {
            Ok(feed_id) => feed_id,
            Err(e) => {
                let reason = FallbackReason::from_report(&e);
                if reason == FallbackReason::QuotaExceeded {
                    tracing::info!("YouTube API quota exceeded, using fallback channel data");
                } else {
                    tracing::error!(error = ?e, "channel lookup failed, using fallback channel data");
                }
                return self.fallback_resolution(reason);
            }
        };

        let (start_offset, total_count) = self.locate_anchor(&feed_id).await;
        let resolution = ChannelResolution {
            feed_id,
            start_offset,
            total_count,
        };
        tracing::debug!(?resolution, "resolved channel");

        self.channels
            .set(channel_id.clone(), resolution.clone(), self.clock.now())
            .await;
        Sourced::Live(resolution)
    }

    fn fallback_resolution(&self, reason: FallbackReason) -> Sourced<ChannelResolution> {
        Sourced::fallback(self.config.fallback_resolution.clone(), reason)
    }

    /// 1-based position of the anchor video and the feed length, from one page of the feed.
    async fn locate_anchor(&self, feed_id: &str) -> (u32, u32) {
        let defaults = &self.config.fallback_resolution;
        let first_page = match self
            .source
            .playlist_page(feed_id, self.config.feed_page_size, None)
            .await
        {
            Ok(page) => page,
            Err(e) => {
                tracing::warn!(error = ?e, "failed to probe uploads feed, estimating start offset");
                return (defaults.start_offset, defaults.total_count);
            }
        };

        let total_count = match first_page.page_info.total_results {
            0 => defaults.total_count,
            n => n,
        };

        let anchor = &self.config.anchor_video_id;
        let position = first_page
            .items
            .iter()
            .position(|item| item.video_id() == anchor);

        match position {
            Some(index) => (index as u32 + 1, total_count),
            None => {
                let estimate = defaults.start_offset.min(total_count);
                tracing::debug!(
                    anchor = %anchor,
                    estimate,
                    "anchor video not in first page of uploads, estimating start offset"
                );
                (estimate, total_count)
            }
        }
    }
}
