//! Resource query engine.
//!
//! Filters the catalog by free-text search and a category filter, annotating
//! each match with its distance from the query origin. Results keep catalog
//! order; nothing is re-sorted by distance or rating.

use std::fmt;
use std::str::FromStr;

use mindbridge_core::config::DiscoveryConfig;
use mindbridge_core::types::{Coordinate, ResourceCategory, SupportResource};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::catalog::ResourceCatalog;
use crate::distance::distance_km;

/// Default radius for [`CategoryFilter::Nearby`], in kilometers.
pub const DEFAULT_NEARBY_RADIUS_KM: f64 = 2.0;

// =============================================================================
// Query types
// =============================================================================

/// Category filter chosen in the resource finder.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CategoryFilter {
    /// Every resource.
    #[default]
    All,
    /// Crisis providers and walk-in providers.
    Immediate,
    /// Providers within the nearby radius of the origin.
    Nearby,
}

impl CategoryFilter {
    pub fn label(&self) -> &'static str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Immediate => "immediate",
            CategoryFilter::Nearby => "nearby",
        }
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for CategoryFilter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(CategoryFilter::All),
            "immediate" => Ok(CategoryFilter::Immediate),
            "nearby" => Ok(CategoryFilter::Nearby),
            other => Err(format!(
                "unknown filter '{}', expected all, immediate or nearby",
                other
            )),
        }
    }
}

/// One query against the catalog.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct QueryFilter {
    pub search_text: String,
    pub category: CategoryFilter,
    pub origin: Coordinate,
}

impl QueryFilter {
    /// Unfiltered query from `origin`.
    pub fn new(origin: Coordinate) -> Self {
        Self {
            search_text: String::new(),
            category: CategoryFilter::All,
            origin,
        }
    }

    pub fn with_search(mut self, search_text: impl Into<String>) -> Self {
        self.search_text = search_text.into();
        self
    }

    pub fn with_category(mut self, category: CategoryFilter) -> Self {
        self.category = category;
        self
    }

    /// Whether the filter narrows the catalog at all.
    pub fn is_filtered(&self) -> bool {
        !self.search_text.is_empty() || self.category != CategoryFilter::All
    }
}

/// A catalog entry annotated with its distance from the query origin.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedResource {
    #[serde(flatten)]
    pub resource: SupportResource,
    pub distance_km: f64,
}

impl RankedResource {
    /// Distance formatted for display, e.g. `"1.2 km"`.
    pub fn distance_label(&self) -> String {
        format!("{:.1} km", self.distance_km)
    }
}

/// Output of a query.
///
/// `count == 0` with `filtered == true` is the "no matches" state; an empty
/// catalog queried without filters reports `filtered == false`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct QueryResult {
    pub resources: Vec<RankedResource>,
    pub count: usize,
    pub filtered: bool,
}

impl QueryResult {
    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

// =============================================================================
// ResourceQueryEngine
// =============================================================================

/// Shared query engine over a [`ResourceCatalog`].
///
/// Pure: the same filter against the same catalog always yields the same
/// result, so it is safe to call on every keystroke.
#[derive(Debug, Clone)]
pub struct ResourceQueryEngine {
    catalog: ResourceCatalog,
    nearby_radius_km: f64,
}

impl ResourceQueryEngine {
    pub fn new(catalog: ResourceCatalog) -> Self {
        Self {
            catalog,
            nearby_radius_km: DEFAULT_NEARBY_RADIUS_KM,
        }
    }

    pub fn from_config(catalog: ResourceCatalog, config: &DiscoveryConfig) -> Self {
        Self::new(catalog).with_nearby_radius(config.nearby_radius_km)
    }

    pub fn with_nearby_radius(mut self, radius_km: f64) -> Self {
        self.nearby_radius_km = radius_km;
        self
    }

    pub fn catalog(&self) -> &ResourceCatalog {
        &self.catalog
    }

    pub fn nearby_radius_km(&self) -> f64 {
        self.nearby_radius_km
    }

    /// Run a query, returning matches in catalog order.
    pub fn query(&self, filter: &QueryFilter) -> QueryResult {
        let needle = filter.search_text.to_lowercase();

        let resources: Vec<RankedResource> = self
            .catalog
            .iter()
            .map(|resource| RankedResource {
                distance_km: distance_km(filter.origin, resource.coordinate),
                resource: resource.clone(),
            })
            .filter(|ranked| {
                matches_text(&ranked.resource, &needle)
                    && self.matches_category(ranked, filter.category)
            })
            .collect();

        let count = resources.len();
        debug!(
            search = %filter.search_text,
            category = %filter.category,
            origin = %filter.origin,
            count,
            "Resource query"
        );

        QueryResult {
            resources,
            count,
            filtered: filter.is_filtered(),
        }
    }

    fn matches_category(&self, ranked: &RankedResource, category: CategoryFilter) -> bool {
        match category {
            CategoryFilter::All => true,
            CategoryFilter::Immediate => {
                ranked.resource.category == ResourceCategory::Crisis || ranked.resource.is_walk_in()
            }
            CategoryFilter::Nearby => ranked.distance_km <= self.nearby_radius_km,
        }
    }
}

/// Run `filter` against `catalog` with the default nearby radius.
pub fn query(catalog: &ResourceCatalog, filter: &QueryFilter) -> QueryResult {
    ResourceQueryEngine::new(catalog.clone()).query(filter)
}

/// `needle` must already be lower-cased.
fn matches_text(resource: &SupportResource, needle: &str) -> bool {
    needle.is_empty()
        || resource.name.to_lowercase().contains(needle)
        || resource
            .features
            .iter()
            .any(|feature| feature.to_lowercase().contains(needle))
}

// =============================================================================
// Tests
// =============================================================================
