//! Support resource discovery for MindBridge.
//!
//! Holds the resource catalog, the distance calculation, the shared query
//! engine used by every resource finder, and the geolocation seam that
//! supplies the query origin.

pub mod catalog;
pub mod distance;
pub mod geolocation;
pub mod query;

pub use catalog::ResourceCatalog;
pub use distance::distance_km;
pub use geolocation::{
    resolve_origin, FixedLocation, GeolocationProvider, LocationError, LocationStatus, NoLocation,
    ResolvedLocation,
};
pub use query::{
    query, CategoryFilter, QueryFilter, QueryResult, RankedResource, ResourceQueryEngine,
    DEFAULT_NEARBY_RADIUS_KM,
};
