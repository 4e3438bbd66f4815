use chrono::{DateTime, FixedOffset, Utc};

use crate::models::LatLng;

/// Wall-clock time at `offset`, e.g. `08 April 2025, 15:54:38`.
pub fn format_timestamp(at: &DateTime<Utc>, offset: FixedOffset) -> String {
    at.with_timezone(&offset).format("%d %B %Y, %H:%M:%S").to_string()
}

/// Six decimal places, latitude first.
pub fn format_coordinates(position: LatLng) -> String {
    format!("{:.6}, {:.6}", position.latitude, position.longitude)
}

pub fn record_label(index: usize) -> String {
    format!("Location #{}", index + 1)
}

pub fn people_detected(count: u32) -> String {
    match count {
        1 => "1 person detected".to_string(),
        n => format!("{n} people detected"),
    }
}

/// Position counter for the mobile navigation controls, e.g. `3/5`.
pub fn position_counter(index: usize, total: usize) -> String {
    format!("{}/{}", index + 1, total)
}
