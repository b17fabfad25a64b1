//! Bundled video data served when the Data API can't be used.

use crate::model::{PageResponse, Thumbnails, Video};
use crate::paging;
use jiff::{SignedDuration, Timestamp};
use serde::Serialize;
use std::sync::LazyLock;

const DEMO_CHANNEL: &str = "Cole the Cornstar";

/// Publication time of the newest demo video; each older one is a day earlier.
const DEMO_NEWEST: Timestamp = Timestamp::constant(1_717_200_000, 0);

// (id, title, views, duration)
const DEMO: &[(&str, &str, &str, &str)] = &[
    ("YG9S0K4p2tQ", "The Most Expensive Farm Equipment I've Ever Seen!", "2100000", "PT18M32S"),
    ("qX7X8X9X0X1", "Harvesting 1000 Acres of Corn in One Day", "1800000", "PT22M15S"),
    ("qX7X8X9X0X2", "Why This Tractor Costs $500,000", "1500000", "PT16M45S"),
    ("qX7X8X9X0X3", "Planting Season: Behind the Scenes", "1200000", "PT19M20S"),
    ("qX7X8X9X0X4", "The Future of Farming Technology", "980000", "PT14M30S"),
    ("qX7X8X9X0X5", "How We Feed 1000 Cows Every Day", "1300000", "PT21M10S"),
    ("qX7X8X9X0X6", "The Most Dangerous Job on the Farm", "1600000", "PT17M55S"),
    ("qX7X8X9X0X7", "Why Farmers Are Going Broke", "2300000", "PT25M40S"),
    ("qX7X8X9X0X8", "The Truth About Organic Farming", "890000", "PT13M25S"),
    ("qX7X8X9X0X9", "How We Survived the Drought", "1100000", "PT20M15S"),
    ("qX7X8X9X0X10", "The Most Expensive Crop This Year", "1400000", "PT18M50S"),
    ("qX7X8X9X0X11", "Why This Farm Is Worth $10 Million", "1900000", "PT24M30S"),
    ("qX7X8X9X0X12", "The Secret to Successful Farming", "1000000", "PT15M20S"),
    ("qX7X8X9X0X13", "How We Built This Farm From Nothing", "2500000", "PT28M45S"),
    ("qX7X8X9X0X14", "The Most Profitable Crop in 2024", "1700000", "PT16M10S"),
    ("qX7X8X9X0X15", "Why This Tractor Is a Game Changer", "1300000", "PT19M35S"),
    ("qX7X8X9X0X16", "The Reality of Modern Farming", "1800000", "PT22M20S"),
    ("qX7X8X9X0X17", "How We Handle 1000 Acres Alone", "1200000", "PT18M15S"),
    ("qX7X8X9X0X18", "The Most Advanced Farm Equipment", "1500000", "PT20M40S"),
    ("qX7X8X9X0X19", "Why This Farm Is Different", "1600000", "PT21M30S"),
    ("qX7X8X9X0X20", "The Truth About Farm Subsidies", "2000000", "PT26M15S"),
    ("qX7X8X9X0X21", "How We Prepare for Winter", "1100000", "PT17M50S"),
    ("qX7X8X9X0X22", "The Most Important Tool on the Farm", "1400000", "PT19M25S"),
    ("qX7X8X9X0X23", "Why This Crop Failed This Year", "1300000", "PT16M40S"),
    ("qX7X8X9X0X24", "The Future of Our Farm", "1900000", "PT23M10S"),
    ("qX7X8X9X0X25", "How We Deal With Weather Challenges", "1000000", "PT15M55S"),
    ("qX7X8X9X0X26", "The Most Profitable Month This Year", "1700000", "PT20M30S"),
    ("qX7X8X9X0X27", "Why This Farm Is Successful", "2200000", "PT25M45S"),
];

static DEMO_VIDEOS: LazyLock<Vec<Video>> = LazyLock::new(|| {
    DEMO.iter()
        .zip(0..)
        .map(|(&(id, title, views, duration), age_days)| Video {
            id: id.to_string(),
            title: title.to_string(),
            description: format!(
                "Farming content from {DEMO_CHANNEL}'s channel, with {} views so far.",
                crate::format::format_view_count(views)
            ),
            published_at: DEMO_NEWEST - SignedDuration::from_hours(24 * age_days),
            thumbnails: Thumbnails::ytimg(id, false),
            channel_title: DEMO_CHANNEL.to_string(),
            view_count: Some(views.to_string()),
            duration: Some(duration.to_string()),
        })
        .collect()
});

/// The demo videos, newest first.
///
/// These are already free of Shorts, so they are paginated as-is.
pub fn demo_videos() -> &'static [Video] {
    &DEMO_VIDEOS
}

/// A page of the demo videos. Works for any page number; pages past the end are empty.
pub fn demo_page(page: u32, page_size: usize) -> PageResponse {
    paging::paginate(demo_videos(), page, page_size)
}

// (id, description, published, views)
const FEATURED: &[(&str, &str, &str, &str)] = &[
    ("StYahCW6pYc", "Featured commentary video from mattyballz", "2024-01-20T00:00:00Z", "3500000"),
    ("WN1PErGVefY", "Latest commentary video from mattyballz", "2024-01-15T00:00:00Z", "2500000"),
    ("j3OveJwcDwQ", "Commentary content from mattyballz", "2024-01-10T00:00:00Z", "1800000"),
];

fn featured_videos() -> Vec<Video> {
    FEATURED
        .iter()
        .filter_map(|&(id, description, published, views)| {
            let published_at = match published.parse::<Timestamp>() {
                Ok(ts) => ts,
                Err(e) => {
                    tracing::error!(id, %e, "bundled publication date does not parse");
                    return None;
                }
            };
            Some(Video {
                id: id.to_string(),
                title: "I GOT BANNED FROM YOUTUBE".to_string(),
                description: description.to_string(),
                published_at,
                thumbnails: Thumbnails::ytimg(id, true),
                channel_title: "mattyballz".to_string(),
                view_count: Some(views.to_string()),
                duration: None,
            })
        })
        .collect()
}

/// Channel blurb shown next to the pre-rendered video wall.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChannelInfo {
    pub name: String,
    pub subscribers: String,
    pub category: String,
}

/// Everything the statically regenerated pages need, built without touching the network.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StaticSnapshot {
    pub featured_video: Option<Video>,
    pub all_videos: Vec<Video>,
    pub total_videos: usize,
    pub generated_at: Timestamp,
    pub channel_info: ChannelInfo,
}

/// Build the pre-rendering snapshot from the bundled data.
pub fn static_snapshot(generated_at: Timestamp) -> StaticSnapshot {
    let all_videos = featured_videos();
    StaticSnapshot {
        featured_video: all_videos.first().cloned(),
        total_videos: all_videos.len(),
        all_videos,
        generated_at,
        channel_info: ChannelInfo {
            name: "Cole The Cornstar".to_string(),
            subscribers: "10M+".to_string(),
            category: "Farming & Lifestyle".to_string(),
        },
    }
}
