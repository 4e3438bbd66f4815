use thiserror::Error;

/// Failure to obtain the record collection from the data endpoint.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DataFetchError {
    #[error("network error: {0}")]
    Network(String),
    #[error("data endpoint returned HTTP {0}")]
    Status(u16),
    #[error("malformed response: {0}")]
    Decode(String),
}

/// Failure reported by the geolocation collaborator.
///
/// The `Display` text is the message shown to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum GeolocationError {
    #[error("Location permission denied. Please enable location access in your browser.")]
    PermissionDenied,
    #[error("Location information is unavailable. Please try again.")]
    PositionUnavailable,
    #[error("The location request timed out. Please try again.")]
    Timeout,
    #[error("Geolocation is not supported by your browser.")]
    Unsupported,
    #[error("Failed to get your location.")]
    Unknown,
}

impl GeolocationError {
    /// Map a W3C `GeolocationPositionError.code` to an error.
    pub fn from_code(code: u16) -> Self {
        match code {
            1 => GeolocationError::PermissionDenied,
            2 => GeolocationError::PositionUnavailable,
            3 => GeolocationError::Timeout,
            _ => GeolocationError::Unknown,
        }
    }
}

/// Failure while loading, building or removing the routing overlay.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum OverlayError {
    #[error("Failed to load the routing module. Please reload the page.")]
    PluginLoad(String),
    #[error("Failed to build the route. Please try again.")]
    Create(String),
    #[error("Failed to remove the previous route.")]
    Destroy(String),
}

impl OverlayError {
    /// Underlying cause, for logs.
    pub fn detail(&self) -> &str {
        match self {
            OverlayError::PluginLoad(d) | OverlayError::Create(d) | OverlayError::Destroy(d) => d,
        }
    }
}
