//! Page tokens, the Shorts filter, and slicing a video list into pages.

use crate::model::{PageResponse, ThumbnailSize, Video};
use jiff::SignedDuration;

const TOKEN_PREFIX: &str = "page_";

/// The 1-based page number a token refers to.
///
/// No token, an empty token, or anything other than `page_<n>` with `n >= 1` means page 1.
pub fn decode_page_token(token: Option<&str>) -> u32 {
    token
        .and_then(|t| t.trim().strip_prefix(TOKEN_PREFIX))
        .and_then(|n| n.parse::<u32>().ok())
        .filter(|&n| n >= 1)
        .unwrap_or(1)
}

/// The token for a 1-based page number.
pub fn encode_page_token(page: u32) -> String {
    format!("{TOKEN_PREFIX}{page}")
}

/// Heuristic for telling YouTube Shorts apart from regular uploads.
///
/// Either signal alone excludes a video: a portrait medium thumbnail, or a known duration under
/// a minute. A video with no duration is judged by its thumbnail only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShortsFilter {
    /// Medium thumbnails narrower than this (width / height) are Shorts. 9:16 is 0.5625.
    pub min_aspect_ratio: f64,
    pub min_duration: SignedDuration,
}

impl Default for ShortsFilter {
    fn default() -> Self {
        Self {
            min_aspect_ratio: 0.7,
            min_duration: SignedDuration::from_secs(60),
        }
    }
}

impl ShortsFilter {
    pub fn is_short(&self, video: &Video) -> bool {
        let portrait = video
            .thumbnails
            .get(ThumbnailSize::Medium)
            .and_then(|t| t.aspect_ratio())
            .is_some_and(|ratio| ratio < self.min_aspect_ratio);
        if portrait {
            return true;
        }

        video
            .parsed_duration()
            .is_some_and(|d| d < self.min_duration)
    }
}

/// Slice `videos` into page `page` of `page_size` items.
///
/// Pages past the end are empty with `has_more == false`. A page size of zero is treated as one.
pub fn paginate(videos: &[Video], page: u32, page_size: usize) -> PageResponse {
    let page = page.max(1);
    let page_size = page_size.max(1);
    let total = videos.len();

    let start = (page as usize - 1).saturating_mul(page_size);
    let end = start.saturating_add(page_size).min(total);
    let page_videos = videos.get(start..end).map(<[Video]>::to_vec).unwrap_or_default();

    let next_page_token = (start < total && end < total).then(|| encode_page_token(page + 1));

    PageResponse {
        videos: page_videos,
        has_more: next_page_token.is_some(),
        next_page_token,
        total_results: total,
        current_page: page,
        total_pages: total.div_ceil(page_size),
    }
}

/// Drop Shorts from `videos` and return the requested page of what remains.
pub fn assemble_page(
    videos: &[Video],
    page: u32,
    page_size: usize,
    shorts: &ShortsFilter,
) -> PageResponse {
    let filtered: Vec<Video> = videos
        .iter()
        .filter(|v| !shorts.is_short(v))
        .cloned()
        .collect();
    tracing::debug!(
        total = videos.len(),
        shorts = videos.len() - filtered.len(),
        page,
        page_size,
        "assembling page"
    );
    paginate(&filtered, page, page_size)
}
