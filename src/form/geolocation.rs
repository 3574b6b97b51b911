use crate::config::ObservingLocation;
use crate::util::Degrees;

/// A position as reported by the platform's location service
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct GeoPosition {
    pub latitude: Degrees,
    pub longitude: Degrees,
    /// Meters above sea level, when the platform knows it
    pub altitude: Option<f64>,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GeolocationError {
    #[error("location service is not available")]
    Unavailable,
    #[error("permission to read the location was denied")]
    PermissionDenied,
}

pub trait Geolocator {
    fn current_position(&self) -> Result<GeoPosition, GeolocationError>;
}

/// Reports the observing location from the configuration file
pub struct ConfiguredLocation(pub Option<ObservingLocation>);

impl Geolocator for ConfiguredLocation {
    fn current_position(&self) -> Result<GeoPosition, GeolocationError> {
        match self.0 {
            Some(location) if !location.shared => Err(GeolocationError::PermissionDenied),
            Some(location) => Ok(GeoPosition {
                latitude: location.latitude,
                longitude: location.longitude,
                altitude: Some(location.elevation),
            }),
            None => Err(GeolocationError::Unavailable),
        }
    }
}
