//! Provider configuration.

use crate::model::ChannelResolution;
use crate::paging::ShortsFilter;
use jiff::SignedDuration;

/// Environment variable the API key is read from.
pub const API_KEY_ENV: &str = "YOUTUBE_API_KEY";

/// How the Data API key is obtained.
///
/// A missing key is a supported configuration: the provider serves bundled data instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiKey {
    /// Read the named environment variable on every request.
    Env(String),
    Fixed(String),
    None,
}

impl ApiKey {
    /// Read [`API_KEY_ENV`] on every request.
    pub fn from_env() -> Self {
        Self::Env(API_KEY_ENV.to_string())
    }

    /// The key to use right now, if any. Empty values count as missing.
    pub fn resolve(&self) -> Option<String> {
        let key = match self {
            Self::Env(var) => std::env::var(var).ok()?,
            Self::Fixed(key) => key.clone(),
            Self::None => return None,
        };
        let key = key.trim();
        (!key.is_empty()).then(|| key.to_string())
    }
}

/// Everything [`crate::VideoProvider`] needs to know about the channel it lists and how hard it
/// may hit the API doing so.
#[derive(Debug, Clone)]
pub struct ProviderConfig {
    /// Channel whose uploads are listed.
    pub channel_id: String,
    /// Oldest video the portfolio reaches back to.
    pub anchor_video_id: String,
    /// Used whenever the channel cannot be resolved live. Its `start_offset` and `total_count`
    /// are also the defaults when the anchor video cannot be located.
    pub fallback_resolution: ChannelResolution,
    pub channel_ttl: SignedDuration,
    pub videos_ttl: SignedDuration,
    pub video_ttl: SignedDuration,
    /// `maxResults` for each uploads feed request.
    pub feed_page_size: u32,
    /// Ids per `videos.list` request.
    pub detail_batch_size: usize,
    /// Upper bound on uploads feed requests per materialization.
    pub max_list_calls: usize,
    pub shorts: ShortsFilter,
}

impl Default for ProviderConfig {
    fn default() -> Self {
        Self {
            channel_id: "UCuxlXCfVyV-i5YLL30jkomw".to_string(),
            anchor_video_id: "YG9S0K4p2tQ".to_string(),
            fallback_resolution: ChannelResolution {
                feed_id: "UUuxlXCfVyV-i5YLL30jkomw".to_string(),
                start_offset: 222,
                total_count: 931,
            },
            channel_ttl: SignedDuration::from_hours(1),
            videos_ttl: SignedDuration::from_mins(15),
            video_ttl: SignedDuration::from_mins(30),
            feed_page_size: 50,
            detail_batch_size: crate::youtube_api::MAX_RESULTS_PER_REQUEST,
            max_list_calls: 3,
            shorts: ShortsFilter::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_keys_are_missing() {
        assert_eq!(ApiKey::Fixed("  ".into()).resolve(), None);
        assert_eq!(ApiKey::None.resolve(), None);
        assert_eq!(
            ApiKey::Fixed(" abc \n".into()).resolve().as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn unset_variable_is_missing() {
        let key = ApiKey::Env("CHANNEL_VIDEOS_TEST_SURELY_UNSET_KEY".into());
        assert_eq!(key.resolve(), None);
    }
}
