use super::VideoProvider;
use crate::cache::Clock;
use crate::model::Video;
use crate::source::VideoSource;
use crate::youtube_api::PagedStream;
use eyre::Context;
use std::collections::HashSet;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use tokio_stream::StreamExt;

impl<S: VideoSource, C: Clock> VideoProvider<S, C> {
    /// The newest `min_count` videos of the feed, enriched with durations and view counts.
    ///
    /// The feed is read in pages of `feed_page_size` until `min_count` entries have arrived, the
    /// feed ends, or `max_list_calls` pages have been requested, so the result may be shorter
    /// than asked for. Everything that was fetched is enriched and cached per feed for
    /// `videos_ttl`; later callers get a prefix of that cached list whatever count they ask for.
    ///
    /// Entries the feed repeats are kept once, at their first position.
    ///
    /// Fails only if a feed page cannot be fetched. Enrichment failures just leave fields empty.
    #[tracing::instrument(skip(self))]
    pub async fn materialize(&self, feed_id: &str, min_count: usize) -> eyre::Result<Vec<Video>> {
        let key = feed_id.to_string();
        if let Some(cached) = self.feeds.get(&key, self.clock.now()).await {
            tracing::debug!(cached = cached.len(), "using cached uploads");
            return Ok(prefix(&cached, min_count));
        }

        let fetched = &AtomicUsize::new(0);
        let page_size = self.config.feed_page_size;
        let mut pages = PagedStream::with_page_limit(
            move |page_token| async move {
                let page = self
                    .source
                    .playlist_page(feed_id, page_size, page_token)
                    .await
                    .context("fetch uploads feed page")?;

                let total = fetched.fetch_add(page.items.len(), Ordering::Relaxed) + page.items.len();
                let next = if page.items.is_empty() || total >= min_count {
                    None
                } else {
                    page.next_page_token
                };
                Ok((page.items, next))
            },
            self.config.max_list_calls,
        );

        // an upload landing mid-walk shifts the feed, so an entry can come back on the next page
        let mut seen = HashSet::new();
        let mut videos = Vec::new();
        while let Some(item) = pages.next().await {
            let item = item?;
            if seen.insert(item.video_id().to_string()) {
                videos.push(item.into_video());
            }
        }
        tracing::debug!(
            fetched = fetched.load(Ordering::Relaxed),
            unique = videos.len(),
            pages = pages.pages_requested(),
            "fetched uploads"
        );

        let videos: Arc<[Video]> = self.enrich(videos).await.into();
        self.feeds.set(key, Arc::clone(&videos), self.clock.now()).await;
        Ok(prefix(&videos, min_count))
    }
}

fn prefix(videos: &[Video], n: usize) -> Vec<Video> {
    videos[..n.min(videos.len())].to_vec()
}
