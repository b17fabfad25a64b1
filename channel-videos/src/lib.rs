//! Cached, paginated listings of a YouTube channel's uploads for a portfolio site.
//!
//! [`VideoProvider`] is the entry point. It reads the channel's uploads through a
//! [`VideoSource`] (normally a [`YouTubeClient`]), keeps what it fetched in memory for a while,
//! drops Shorts, and cuts the result into pages addressed by opaque `page_<n>` tokens. When the
//! Data API can't be used (no key, quota used up, or any other failure) the same pages are cut
//! from bundled demo videos instead, and the result is marked as [`Sourced::Fallback`].
//!
//! ```rust,no_run
//! use channel_videos::{ApiKey, ProviderConfig, VideoProvider, YouTubeClient};
//!
//! # async fn example() {
//! let client = YouTubeClient::new(ApiKey::from_env(), reqwest::Client::new());
//! let provider = VideoProvider::new(client, ProviderConfig::default());
//!
//! let first = provider.get_videos(None, 9).await.into_inner();
//! if let Some(token) = &first.next_page_token {
//!     let second = provider.get_videos(Some(token.as_str()), 9).await;
//!     println!("page 2 has {} videos", second.value().videos.len());
//! }
//! # }
//! ```

pub mod cache;
pub mod config;
pub mod fallback;
pub mod format;
pub mod model;
pub mod paging;
pub mod provider;
pub mod source;
pub mod youtube_api;

pub use config::{ApiKey, ProviderConfig};
pub use model::{FallbackReason, PageResponse, Sourced, Thumbnail, ThumbnailSize, Thumbnails, Video};
pub use provider::VideoProvider;
pub use source::VideoSource;
pub use youtube_api::YouTubeClient;
