use super::VideoProvider;
use crate::cache::Clock;
use crate::model::Video;
use crate::source::VideoSource;
use std::collections::HashMap;

impl<S: VideoSource, C: Clock> VideoProvider<S, C> {
    /// Fill in duration and view count, one `videos.list` call per `detail_batch_size` videos.
    ///
    /// Order and length of `videos` are preserved. A batch whose lookup fails is passed through
    /// as it was, and videos YouTube did not return details for keep whatever they had.
    #[tracing::instrument(skip_all, fields(videos = videos.len()))]
    pub async fn enrich(&self, videos: Vec<Video>) -> Vec<Video> {
        if videos.is_empty() || !self.source.has_credential() {
            return videos;
        }

        let batch_size = self.config.detail_batch_size.max(1);
        let mut enriched = Vec::with_capacity(videos.len());
        for batch in videos.chunks(batch_size) {
            let ids: Vec<String> = batch.iter().map(|v| v.id.clone()).collect();
            let details = match self.source.video_details(&ids).await {
                Ok(details) => details,
                Err(e) => {
                    tracing::warn!(error = ?e, batch = ids.len(), "failed to fetch video details");
                    enriched.extend_from_slice(batch);
                    continue;
                }
            };

            let by_id: HashMap<String, (Option<String>, Option<String>)> = details
                .items
                .into_iter()
                .map(|resource| {
                    let duration = resource.duration().map(str::to_string);
                    let views = resource.view_count().map(str::to_string);
                    (resource.id, (duration, views))
                })
                .collect();

            enriched.extend(batch.iter().map(|video| match by_id.get(&video.id) {
                Some((duration, views)) => video
                    .clone()
                    .with_details(duration.clone(), views.clone()),
                None => video.clone(),
            }));
        }
        enriched
    }
}
