use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{MindbridgeError, Result};

// =============================================================================
// Geography
// =============================================================================

/// A WGS84 latitude/longitude pair in decimal degrees.
///
/// Invariant: latitude in [-90, 90], longitude in [-180, 180]. Values coming
/// from configuration or catalog files go through [`Coordinate::try_new`] or
/// [`Coordinate::validate`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Downtown Toronto, used whenever the user's location is unknown.
    pub const DOWNTOWN_TORONTO: Coordinate = Coordinate {
        latitude: 43.6532,
        longitude: -79.3832,
    };

    /// Build a coordinate, rejecting out-of-range or non-finite values.
    pub fn try_new(latitude: f64, longitude: f64) -> Result<Self> {
        let coordinate = Self {
            latitude,
            longitude,
        };
        coordinate.validate()?;
        Ok(coordinate)
    }

    pub fn validate(&self) -> Result<()> {
        let lat_ok = self.latitude.is_finite() && (-90.0..=90.0).contains(&self.latitude);
        let lng_ok = self.longitude.is_finite() && (-180.0..=180.0).contains(&self.longitude);
        if lat_ok && lng_ok {
            Ok(())
        } else {
            Err(MindbridgeError::InvalidCoordinate {
                latitude: self.latitude,
                longitude: self.longitude,
            })
        }
    }
}

impl fmt::Display for Coordinate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({:.4}, {:.4})", self.latitude, self.longitude)
    }
}

// =============================================================================
// Support resources
// =============================================================================

/// Kind of support a provider offers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceCategory {
    /// 24/7 crisis lines and crisis centres.
    Crisis,
    /// Individual or family counselling.
    Counseling,
    /// Facilitated support groups.
    Group,
    /// Peer mentorship and drop-in centres.
    Peer,
}

impl ResourceCategory {
    pub fn label(&self) -> &'static str {
        match self {
            ResourceCategory::Crisis => "crisis",
            ResourceCategory::Counseling => "counseling",
            ResourceCategory::Group => "group",
            ResourceCategory::Peer => "peer",
        }
    }
}

impl fmt::Display for ResourceCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Wait time shown for providers that take people straight away.
pub const WAIT_TIME_IMMEDIATE: &str = "Immediate";

/// Wait time shown for drop-in providers.
pub const WAIT_TIME_WALK_IN: &str = "Walk-in";

/// Unique identifier of a catalog entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ResourceId(pub u32);

impl fmt::Display for ResourceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A mental-health support provider.
///
/// Reference data: created when the catalog is built and never mutated.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SupportResource {
    pub id: ResourceId,
    pub name: String,
    pub category: ResourceCategory,
    pub address: String,
    pub phone: String,
    pub hours: String,
    /// Spoken languages, most prominent first. Never empty.
    pub languages: Vec<String>,
    /// Service features in display order.
    pub features: Vec<String>,
    pub coordinate: Coordinate,
    /// Free-form wait time; see [`WAIT_TIME_IMMEDIATE`] and [`WAIT_TIME_WALK_IN`].
    pub wait_time: String,
    pub cost: String,
    /// Average rating, 0.0 to 5.0.
    pub rating: f32,
}

impl SupportResource {
    /// Check the record invariants that deserialization cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.name.trim().is_empty() {
            return Err(MindbridgeError::Catalog(format!(
                "resource {} has an empty name",
                self.id
            )));
        }
        if self.languages.is_empty() {
            return Err(MindbridgeError::Catalog(format!(
                "resource {} lists no languages",
                self.id
            )));
        }
        if !(0.0..=5.0).contains(&self.rating) {
            return Err(MindbridgeError::Catalog(format!(
                "resource {} has rating {} outside 0-5",
                self.id, self.rating
            )));
        }
        self.coordinate.validate()
    }

    /// Whether the provider takes people without an appointment.
    pub fn is_walk_in(&self) -> bool {
        self.wait_time == WAIT_TIME_WALK_IN
    }
}
