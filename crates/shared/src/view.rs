//! Map viewport and marker derivation.

use chrono::{DateTime, FixedOffset, Utc};

use crate::format;
use crate::models::{LatLng, Record};

/// Layout thresholds and zoom levels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ViewConfig {
    /// Viewports narrower than this (CSS px) use the mobile layout.
    pub mobile_breakpoint_px: f64,
    pub desktop_zoom: u8,
    pub mobile_zoom: u8,
}

impl Default for ViewConfig {
    fn default() -> Self {
        ViewConfig {
            mobile_breakpoint_px: 768.0,
            desktop_zoom: 10,
            mobile_zoom: 9,
        }
    }
}

impl ViewConfig {
    pub fn is_mobile(&self, viewport_width: f64) -> bool {
        viewport_width < self.mobile_breakpoint_px
    }

    pub fn zoom(&self, is_mobile: bool) -> u8 {
        if is_mobile {
            self.mobile_zoom
        } else {
            self.desktop_zoom
        }
    }

    /// Viewport for the current selection, if there is one.
    pub fn viewport(&self, selected: Option<&Record>, is_mobile: bool) -> Option<Viewport> {
        selected.map(|r| Viewport {
            center: r.position(),
            zoom: self.zoom(is_mobile),
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    pub center: LatLng,
    pub zoom: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MarkerVariant {
    Base,
    Record,
    SelectedRecord,
    User,
}

impl MarkerVariant {
    /// Icon colour in the marker sprite set.
    pub fn color(&self) -> &'static str {
        match self {
            MarkerVariant::Base => "blue",
            MarkerVariant::Record => "red",
            MarkerVariant::SelectedRecord => "gold",
            MarkerVariant::User => "green",
        }
    }

    /// Selected markers are drawn slightly larger.
    pub fn size(&self) -> (u32, u32) {
        match self {
            MarkerVariant::SelectedRecord => (30, 45),
            _ => (25, 41),
        }
    }

    /// Raises the selected marker above its siblings.
    pub fn z_offset(&self) -> i32 {
        match self {
            MarkerVariant::SelectedRecord => 1000,
            _ => 0,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PopupContent {
    pub title: String,
    pub lines: Vec<String>,
}

impl PopupContent {
    /// Escaped HTML fragment for the map library's popup.
    pub fn to_html(&self) -> String {
        let mut html = format!("<div class=\"popup\"><h3>{}</h3>", escape(&self.title));
        for line in &self.lines {
            html.push_str(&format!("<p>{}</p>", escape(line)));
        }
        html.push_str("</div>");
        html
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct MarkerSpec {
    pub position: LatLng,
    pub variant: MarkerVariant,
    /// Index to select when the marker is clicked.
    pub record_index: Option<usize>,
    pub popup: PopupContent,
}

/// Marker style for the record at `index`.
pub fn record_variant(index: usize, selected: Option<usize>) -> MarkerVariant {
    if selected == Some(index) {
        MarkerVariant::SelectedRecord
    } else {
        MarkerVariant::Record
    }
}

/// Record markers whose style changes when the selection moves from `prev`
/// to `next`. Every other marker is left untouched.
pub fn selection_restyle(prev: Option<usize>, next: Option<usize>) -> Vec<(usize, MarkerVariant)> {
    if prev == next {
        return Vec::new();
    }
    prev.map(|i| (i, MarkerVariant::Record))
        .into_iter()
        .chain(next.map(|i| (i, MarkerVariant::SelectedRecord)))
        .collect()
}

pub fn base_marker(base: LatLng) -> MarkerSpec {
    MarkerSpec {
        position: base,
        variant: MarkerVariant::Base,
        record_index: None,
        popup: PopupContent {
            title: "Base Station".to_string(),
            lines: vec!["Drone launch point".to_string()],
        },
    }
}

/// One marker per record, in record order. `local_offset` picks the
/// timezone each detection time is shown in.
pub fn record_markers(
    records: &[Record],
    selected: Option<usize>,
    local_offset: impl Fn(&DateTime<Utc>) -> FixedOffset,
) -> Vec<MarkerSpec> {
    records
        .iter()
        .enumerate()
        .map(|(i, record)| {
            let detected = format::format_timestamp(&record.detected_at, local_offset(&record.detected_at));
            MarkerSpec {
                position: record.position(),
                variant: record_variant(i, selected),
                record_index: Some(i),
                popup: PopupContent {
                    title: "Victims Detected".to_string(),
                    lines: vec![
                        format::record_label(i),
                        format!("Count: {} people", record.person_count),
                        format!("Time: {detected}"),
                    ],
                },
            }
        })
        .collect()
}

pub fn user_marker(user: LatLng) -> MarkerSpec {
    MarkerSpec {
        position: user,
        variant: MarkerVariant::User,
        record_index: None,
        popup: PopupContent {
            title: "Your Location".to_string(),
            lines: vec![format::format_coordinates(user)],
        },
    }
}

fn escape(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{fixtures, BASE_LOCATION};

    #[test]
    fn test_breakpoint_is_exclusive() {
        let cfg = ViewConfig::default();
        assert!(cfg.is_mobile(767.0));
        assert!(!cfg.is_mobile(768.0));
    }

    #[test]
    fn test_mobile_zoom_is_wider() {
        let cfg = ViewConfig::default();
        assert!(cfg.zoom(true) < cfg.zoom(false));
    }

    #[test]
    fn test_configurable_breakpoint() {
        let cfg = ViewConfig {
            mobile_breakpoint_px: 1024.0,
            ..ViewConfig::default()
        };
        assert!(cfg.is_mobile(900.0));
    }

    #[test]
    fn test_viewport_centers_on_selection() {
        let records = fixtures::records();
        let cfg = ViewConfig::default();
        let vp = cfg.viewport(records.get(2), true).unwrap();
        assert_eq!(vp.center, records[2].position());
        assert_eq!(vp.zoom, 9);
        assert!(cfg.viewport(None, false).is_none());
    }

    fn utc(_: &DateTime<Utc>) -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_markers_distinguish_selection() {
        let records = fixtures::records();
        let markers = record_markers(&records, Some(3), utc);
        assert_eq!(markers.len(), 5);

        let selected: Vec<_> = markers
            .iter()
            .filter(|m| m.variant == MarkerVariant::SelectedRecord)
            .collect();
        assert_eq!(selected.len(), 1);
        assert_eq!(selected[0].record_index, Some(3));
        assert!(selected[0].variant.z_offset() > MarkerVariant::Record.z_offset());
        assert_eq!(record_variant(3, Some(3)), MarkerVariant::SelectedRecord);
        assert_eq!(record_variant(2, Some(3)), MarkerVariant::Record);
        assert_eq!(record_variant(0, None), MarkerVariant::Record);
    }

    #[test]
    fn test_selection_restyle_touches_only_old_and_new() {
        assert!(selection_restyle(Some(2), Some(2)).is_empty());
        assert!(selection_restyle(None, None).is_empty());
        assert_eq!(
            selection_restyle(Some(1), Some(3)),
            vec![(1, MarkerVariant::Record), (3, MarkerVariant::SelectedRecord)]
        );
        assert_eq!(selection_restyle(None, Some(0)), vec![(0, MarkerVariant::SelectedRecord)]);
        assert_eq!(selection_restyle(Some(4), None), vec![(4, MarkerVariant::Record)]);
    }

    #[test]
    fn test_base_and_user_markers_are_not_clickable() {
        let base = base_marker(BASE_LOCATION);
        assert_eq!(base.variant, MarkerVariant::Base);
        assert_eq!(base.record_index, None);

        let user = user_marker(LatLng::new(-6.6, 106.8));
        assert_eq!(user.variant, MarkerVariant::User);
        assert_eq!(user.record_index, None);
        assert_eq!(user.popup.lines, vec!["-6.600000, 106.800000".to_string()]);
    }

    #[test]
    fn test_record_popup_content() {
        let records = fixtures::records();
        let markers = record_markers(&records, None, utc);
        let html = markers[4].popup.to_html();
        assert!(html.contains("Location #5"));
        assert!(html.contains("Count: 5 people"));
        assert!(html.contains("05 May 2025, 08:45:35"));
    }

    #[test]
    fn test_record_popup_time_is_local() {
        let records = fixtures::records();
        let markers = record_markers(&records, None, |_| FixedOffset::east_opt(7 * 3600).unwrap());
        assert!(markers[4].popup.to_html().contains("05 May 2025, 15:45:35"));
    }

    #[test]
    fn test_popup_escapes_html() {
        let popup = PopupContent {
            title: "<b>".to_string(),
            lines: vec!["a & b".to_string()],
        };
        assert_eq!(popup.to_html(), "<div class=\"popup\"><h3>&lt;b&gt;</h3><p>a &amp; b</p></div>");
    }
}
