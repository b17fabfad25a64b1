//! YouTube Data API v3 client.
//!
//! Only the three read-only endpoints needed to list a channel's uploads are covered:
//!
//! - [`YouTubeClient::uploads_playlist`]: `channels.list` to map a channel to its uploads
//!   playlist (the "feed").
//! - [`YouTubeClient::list_playlist_items`]: `playlistItems.list` to walk that feed newest first,
//!   50 items at a time.
//! - [`YouTubeClient::list_video_details`]: `videos.list` to fetch durations and view counts for
//!   up to 50 videos per request.
//!
//! Every call costs one quota unit. Quota exhaustion surfaces as a 403 [`ApiError`]; use
//! [`is_quota_exceeded`] to recognise it anywhere in an error chain.
//!
//! ```rust,no_run
//! use channel_videos::config::ApiKey;
//! use channel_videos::youtube_api::YouTubeClient;
//!
//! # async fn example() -> eyre::Result<()> {
//! let client = YouTubeClient::new(ApiKey::from_env(), reqwest::Client::new());
//! let feed = client.uploads_playlist("UCuxlXCfVyV-i5YLL30jkomw").await?;
//! let page = client.list_playlist_items(&feed, 50, None).await?;
//! for item in page.items {
//!     println!("{}: {}", item.video_id(), item.snippet.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod channels;
pub mod client;
pub mod error;
pub mod playlist_items;
pub mod types;
pub mod videos;

pub use client::{MAX_RESULTS_PER_REQUEST, YouTubeClient};
pub use error::{ApiError, MissingApiKey, is_missing_api_key, is_quota_exceeded};
pub use playlist_items::{PlaylistItem, PlaylistItemListResponse};
pub use types::{PageInfo, PagedStream};
pub use videos::{VideoListResponse, VideoResource};
