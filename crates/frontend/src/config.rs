//! External resource locations used by the map view.

pub const LEAFLET_CSS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
pub const LEAFLET_JS: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";

pub const TILE_URL: &str = "https://{s}.tile.openstreetmap.org/{z}/{x}/{y}.png";
pub const TILE_ATTRIBUTION: &str =
    r#"&copy; <a href="https://www.openstreetmap.org/copyright">OpenStreetMap</a> contributors"#;

const MARKER_ICON_BASE: &str =
    "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img";
pub const MARKER_SHADOW_URL: &str =
    "https://cdnjs.cloudflare.com/ajax/libs/leaflet/0.7.7/images/marker-shadow.png";

pub fn marker_icon_url(color: &str) -> String {
    format!("{MARKER_ICON_BASE}/marker-icon-{color}.png")
}

/// Routing plugin and the directions service it calls.
#[derive(Debug, Clone, PartialEq)]
pub struct RoutingConfig {
    pub service_url: String,
    pub plugin_js: &'static str,
    pub plugin_css: &'static str,
}

impl Default for RoutingConfig {
    fn default() -> Self {
        RoutingConfig {
            service_url: "https://router.project-osrm.org/route/v1".to_string(),
            plugin_js: "https://unpkg.com/leaflet-routing-machine@3.2.12/dist/leaflet-routing-machine.js",
            plugin_css: "https://unpkg.com/leaflet-routing-machine@3.2.12/dist/leaflet-routing-machine.css",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_icon_url() {
        assert_eq!(
            marker_icon_url("gold"),
            "https://raw.githubusercontent.com/pointhi/leaflet-color-markers/master/img/marker-icon-gold.png"
        );
    }
}
