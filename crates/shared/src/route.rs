//! User location lookup and route display state.

use serde::{Deserialize, Serialize};

use crate::error::GeolocationError;
use crate::models::LatLng;
use crate::overlay::OverlayKey;

/// Routing profile passed to the directions service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportMode {
    #[default]
    Driving,
    Cycling,
    Walking,
}

impl TransportMode {
    pub const ALL: [TransportMode; 3] = [
        TransportMode::Driving,
        TransportMode::Cycling,
        TransportMode::Walking,
    ];

    /// OSRM profile name.
    pub fn profile(&self) -> &'static str {
        match self {
            TransportMode::Driving => "driving",
            TransportMode::Cycling => "cycling",
            TransportMode::Walking => "walking",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            TransportMode::Driving => "Car",
            TransportMode::Cycling => "Bicycle",
            TransportMode::Walking => "On foot",
        }
    }
}

impl std::fmt::Display for TransportMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.profile())
    }
}

/// Options for a position request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GeolocationOptions {
    pub high_accuracy: bool,
    pub timeout_ms: u32,
    pub max_cached_age_ms: u32,
}

/// Every lookup asks for a fresh, high-accuracy fix within ten seconds.
pub const GEOLOCATION_OPTIONS: GeolocationOptions = GeolocationOptions {
    high_accuracy: true,
    timeout_ms: 10_000,
    max_cached_age_ms: 0,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoutePhase {
    Idle,
    Locating,
    RouteVisible,
    RouteHidden,
}

/// What the caller must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteEffect {
    None,
    /// Invoke the geolocation collaborator with [`GEOLOCATION_OPTIONS`].
    RequestLocation,
}

/// Route display state.
///
/// Invariants held after every transition: `route_visible` implies a known
/// user location, and `locating` and `route_visible` are never both set.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct RouteState {
    user_location: Option<LatLng>,
    locating: bool,
    route_visible: bool,
    transport_mode: TransportMode,
    location_error: Option<GeolocationError>,
}

impl RouteState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn user_location(&self) -> Option<LatLng> {
        self.user_location
    }

    pub fn is_locating(&self) -> bool {
        self.locating
    }

    pub fn is_route_visible(&self) -> bool {
        self.route_visible
    }

    pub fn transport_mode(&self) -> TransportMode {
        self.transport_mode
    }

    pub fn location_error(&self) -> Option<GeolocationError> {
        self.location_error
    }

    pub fn phase(&self) -> RoutePhase {
        match (self.locating, self.route_visible, self.user_location.is_some()) {
            (true, _, _) => RoutePhase::Locating,
            (false, true, _) => RoutePhase::RouteVisible,
            (false, false, true) => RoutePhase::RouteHidden,
            (false, false, false) => RoutePhase::Idle,
        }
    }

    /// Start a location lookup. A lookup already in flight is not duplicated.
    pub fn request_location(&mut self) -> RouteEffect {
        if self.locating {
            return RouteEffect::None;
        }
        self.locating = true;
        self.route_visible = false;
        self.location_error = None;
        RouteEffect::RequestLocation
    }

    /// Lookup succeeded: remember the fix and show the route.
    pub fn location_found(&mut self, location: LatLng) {
        self.user_location = Some(location);
        self.locating = false;
        self.route_visible = true;
        self.location_error = None;
    }

    /// Lookup failed. A location from an earlier lookup is kept, hidden.
    pub fn location_failed(&mut self, error: GeolocationError) {
        self.locating = false;
        self.route_visible = false;
        self.location_error = Some(error);
    }

    /// Show or hide the route; without a location, look one up instead.
    pub fn toggle_route(&mut self) -> RouteEffect {
        if self.locating {
            return RouteEffect::None;
        }
        if self.user_location.is_none() {
            return self.request_location();
        }
        self.route_visible = !self.route_visible;
        RouteEffect::None
    }

    /// Returns true when the mode changed.
    pub fn set_transport_mode(&mut self, mode: TransportMode) -> bool {
        let changed = self.transport_mode != mode;
        self.transport_mode = mode;
        changed
    }

    pub fn dismiss_error(&mut self) {
        self.location_error = None;
    }

    /// The mode selector is only offered while a route is on screen.
    pub fn mode_selector_visible(&self) -> bool {
        self.route_visible && self.user_location.is_some()
    }

    /// Key of the overlay that should currently exist, if any.
    pub fn overlay_key(&self, destination: Option<LatLng>) -> Option<OverlayKey> {
        if !self.route_visible {
            return None;
        }
        Some(OverlayKey {
            origin: self.user_location?,
            destination: destination?,
            mode: self.transport_mode,
        })
    }
}
