//! Detection times shown in the browser's timezone.

use chrono::{DateTime, FixedOffset, Offset, Utc};
use dronewatch_shared::format;
use wasm_bindgen::JsValue;

/// `Date.getTimezoneOffset` counts minutes behind UTC, so UTC+7 is `-420`.
fn offset_from_js_minutes(minutes: f64) -> FixedOffset {
    let seconds = (-minutes * 60.0).round() as i32;
    FixedOffset::east_opt(seconds).unwrap_or_else(|| Utc.fix())
}

/// Browser offset in effect at `at`, so DST is resolved per timestamp.
pub fn offset_at(at: &DateTime<Utc>) -> FixedOffset {
    let date = js_sys::Date::new(&JsValue::from_f64(at.timestamp_millis() as f64));
    offset_from_js_minutes(date.get_timezone_offset())
}

pub fn local_timestamp(at: &DateTime<Utc>) -> String {
    format::format_timestamp(at, offset_at(at))
}
