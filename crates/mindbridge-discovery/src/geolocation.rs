//! Geolocation capability and fallback resolution.
//!
//! The core never asks the platform for a location directly. Callers inject
//! a [`GeolocationProvider`]; [`resolve_origin`] turns any failure into the
//! configured fallback coordinate.

use mindbridge_core::types::Coordinate;
use serde::Serialize;
use tracing::{debug, warn};

/// Why a provider could not supply a coordinate.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum LocationError {
    #[error("location permission denied")]
    Denied,
    #[error("location unavailable: {0}")]
    Unavailable(String),
}

/// Source of the user's current position.
pub trait GeolocationProvider: Send + Sync {
    fn current_coordinate(&self) -> Result<Coordinate, LocationError>;
}

/// Provider that always reports the same position.
#[derive(Debug, Clone, Copy)]
pub struct FixedLocation(pub Coordinate);

impl GeolocationProvider for FixedLocation {
    fn current_coordinate(&self) -> Result<Coordinate, LocationError> {
        Ok(self.0)
    }
}

/// Provider for hosts with no location source at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoLocation;

impl GeolocationProvider for NoLocation {
    fn current_coordinate(&self) -> Result<Coordinate, LocationError> {
        Err(LocationError::Unavailable(
            "no geolocation source configured".to_string(),
        ))
    }
}

/// Whether the origin came from the provider or the fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LocationStatus {
    Granted,
    Denied,
}

/// Origin coordinate for queries, with its provenance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ResolvedLocation {
    pub coordinate: Coordinate,
    pub status: LocationStatus,
}

/// Ask `provider` for a coordinate, substituting `fallback` on any failure.
///
/// Never fails: denial, unavailability and out-of-range readings all resolve
/// to the fallback with [`LocationStatus::Denied`].
pub fn resolve_origin(provider: &dyn GeolocationProvider, fallback: Coordinate) -> ResolvedLocation {
    let reading = provider.current_coordinate().and_then(|c| {
        c.validate()
            .map(|_| c)
            .map_err(|e| LocationError::Unavailable(e.to_string()))
    });

    match reading {
        Ok(coordinate) => {
            debug!(%coordinate, "Geolocation granted");
            ResolvedLocation {
                coordinate,
                status: LocationStatus::Granted,
            }
        }
        Err(e) => {
            warn!(error = %e, %fallback, "Geolocation failed, using fallback coordinate");
            ResolvedLocation {
                coordinate: fallback,
                status: LocationStatus::Denied,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct DeniedLocation;

    impl GeolocationProvider for DeniedLocation {
        fn current_coordinate(&self) -> Result<Coordinate, LocationError> {
            Err(LocationError::Denied)
        }
    }

    fn ottawa() -> Coordinate {
        Coordinate {
            latitude: 45.4215,
            longitude: -75.6972,
        }
    }

    #[test]
    fn test_fixed_location_is_granted() {
        let resolved = resolve_origin(&FixedLocation(ottawa()), Coordinate::DOWNTOWN_TORONTO);
        assert_eq!(resolved.coordinate, ottawa());
        assert_eq!(resolved.status, LocationStatus::Granted);
    }

    #[test]
    fn test_denied_uses_fallback() {
        let resolved = resolve_origin(&DeniedLocation, Coordinate::DOWNTOWN_TORONTO);
        assert_eq!(resolved.coordinate, Coordinate::DOWNTOWN_TORONTO);
        assert_eq!(resolved.status, LocationStatus::Denied);
    }

    #[test]
    fn test_unavailable_uses_fallback() {
        let resolved = resolve_origin(&NoLocation, ottawa());
        assert_eq!(resolved.coordinate, ottawa());
        assert_eq!(resolved.status, LocationStatus::Denied);
    }

    #[test]
    fn test_out_of_range_reading_uses_fallback() {
        let bogus = FixedLocation(Coordinate {
            latitude: 200.0,
            longitude: 0.0,
        });
        let resolved = resolve_origin(&bogus, Coordinate::DOWNTOWN_TORONTO);
        assert_eq!(resolved.coordinate, Coordinate::DOWNTOWN_TORONTO);
        assert_eq!(resolved.status, LocationStatus::Denied);
    }

    #[test]
    fn test_location_error_display() {
        assert_eq!(LocationError::Denied.to_string(), "location permission denied");
        assert_eq!(
            LocationError::Unavailable("timeout".to_string()).to_string(),
            "location unavailable: timeout"
        );
    }
}
