//! Display helpers for video cards.

use crate::model::parse_iso_duration;
use jiff::Timestamp;

/// `PT1H2M3S` becomes `1:02:03`, `PT5M7S` becomes `5:07`. Anything unparsable is `0:00`.
pub fn format_duration(iso: &str) -> String {
    let secs = parse_iso_duration(iso).map_or(0, |d| d.as_secs().max(0));
    let (hours, minutes, seconds) = (secs / 3600, secs % 3600 / 60, secs % 60);
    if hours > 0 {
        format!("{hours}:{minutes:02}:{seconds:02}")
    } else {
        format!("{minutes}:{seconds:02}")
    }
}

/// `2100000` becomes `2.1M`, `1500` becomes `1.5K`.
///
/// Counts below a thousand are printed as-is; input that isn't a whole number is returned
/// unchanged.
pub fn format_view_count(views: &str) -> String {
    let Ok(count) = views.trim().parse::<u64>() else {
        return views.to_string();
    };
    if count >= 1_000_000 {
        format!("{:.1}M", count as f64 / 1_000_000.0)
    } else if count >= 1_000 {
        format!("{:.1}K", count as f64 / 1_000.0)
    } else {
        count.to_string()
    }
}

/// Coarse age of a video, such as `3 weeks ago`.
///
/// Partial days round up, so anything published in the last 24 hours is `1 day ago`.
pub fn format_relative_date(published: Timestamp, now: Timestamp) -> String {
    const DAY_MS: i128 = 24 * 60 * 60 * 1000;
    let elapsed_ms = now.duration_since(published).as_millis().abs();
    let days = (elapsed_ms + DAY_MS - 1) / DAY_MS;

    match days {
        1 => "1 day ago".to_string(),
        d if d < 7 => format!("{d} days ago"),
        d if d < 30 => format!("{} weeks ago", d / 7),
        d if d < 365 => format!("{} months ago", d / 30),
        d => format!("{} years ago", d / 365),
    }
}
