//! In-memory catalog of support resources.
//!
//! The catalog is built once at startup, either from the built-in seed data
//! or from a JSON file, and is shared read-only by every query.

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use mindbridge_core::error::{MindbridgeError, Result};
use mindbridge_core::types::{
    Coordinate, ResourceCategory, ResourceId, SupportResource, WAIT_TIME_IMMEDIATE,
    WAIT_TIME_WALK_IN,
};
use tracing::info;

/// Immutable, cheaply clonable collection of support resources.
///
/// Entry order is the curated display order and is preserved by queries.
#[derive(Debug, Clone)]
pub struct ResourceCatalog {
    resources: Arc<[SupportResource]>,
}

impl ResourceCatalog {
    /// Build a catalog, validating every record and rejecting duplicate ids.
    pub fn from_resources(resources: Vec<SupportResource>) -> Result<Self> {
        let mut seen = HashSet::with_capacity(resources.len());
        for resource in &resources {
            resource.validate()?;
            if !seen.insert(resource.id) {
                return Err(MindbridgeError::Catalog(format!(
                    "duplicate resource id {}",
                    resource.id
                )));
            }
        }
        Ok(Self {
            resources: resources.into(),
        })
    }

    /// Parse a JSON array of resources.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let resources: Vec<SupportResource> = serde_json::from_str(json)?;
        Self::from_resources(resources)
    }

    /// Load a catalog from a JSON file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let catalog = Self::from_json_str(&content)?;
        info!(
            resources = catalog.len(),
            "Resource catalog loaded from {}",
            path.display()
        );
        Ok(catalog)
    }

    /// The built-in Toronto catalog.
    pub fn seed() -> Self {
        Self {
            resources: seed_resources().into(),
        }
    }

    pub fn resources(&self) -> &[SupportResource] {
        &self.resources
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SupportResource> {
        self.resources.iter()
    }

    pub fn get(&self, id: ResourceId) -> Option<&SupportResource> {
        self.resources.iter().find(|r| r.id == id)
    }

    pub fn len(&self) -> usize {
        self.resources.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resources.is_empty()
    }
}

impl Default for ResourceCatalog {
    fn default() -> Self {
        Self::seed()
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn seed_resources() -> Vec<SupportResource> {
    vec![
        SupportResource {
            id: ResourceId(1),
            name: "Newcomer Women's Crisis Center".to_string(),
            category: ResourceCategory::Crisis,
            address: "245 Main St, Toronto ON".to_string(),
            phone: "416-555-0123".to_string(),
            hours: "24/7".to_string(),
            languages: strings(&["English", "Somali", "Arabic", "French"]),
            features: strings(&[
                "24/7 Crisis Support",
                "Childcare Available",
                "Cultural Counselors",
            ]),
            coordinate: Coordinate {
                latitude: 43.6532,
                longitude: -79.3832,
            },
            wait_time: WAIT_TIME_IMMEDIATE.to_string(),
            cost: "Free".to_string(),
            rating: 4.9,
        },
        SupportResource {
            id: ResourceId(2),
            name: "Somali Women's Mental Health Circle".to_string(),
            category: ResourceCategory::Group,
            address: "156 Dundas St W, Toronto ON".to_string(),
            phone: "416-555-0456".to_string(),
            hours: "Mon-Fri 6-9 PM".to_string(),
            languages: strings(&["Somali", "English"]),
            features: strings(&["Group Therapy", "Childcare", "Evening Sessions"]),
            coordinate: Coordinate {
                latitude: 43.6566,
                longitude: -79.3859,
            },
            wait_time: "2-3 days".to_string(),
            cost: "Free".to_string(),
            rating: 4.8,
        },
        SupportResource {
            id: ResourceId(3),
            name: "Multicultural Family Counseling".to_string(),
            category: ResourceCategory::Counseling,
            address: "789 Queen St E, Toronto ON".to_string(),
            phone: "416-555-0789".to_string(),
            hours: "Mon-Sat 9 AM-6 PM".to_string(),
            languages: strings(&["English", "Arabic", "French", "Spanish"]),
            features: strings(&[
                "Individual Therapy",
                "Family Sessions",
                "Sliding Scale Fees",
            ]),
            coordinate: Coordinate {
                latitude: 43.6572,
                longitude: -79.3521,
            },
            wait_time: "1-2 weeks".to_string(),
            cost: "Sliding Scale".to_string(),
            rating: 4.6,
        },
        SupportResource {
            id: ResourceId(4),
            name: "New Canadians Peer Support".to_string(),
            category: ResourceCategory::Peer,
            address: "321 College St, Toronto ON".to_string(),
            phone: "416-555-0321".to_string(),
            hours: "Daily 2-8 PM".to_string(),
            languages: strings(&["Multiple Languages"]),
            features: strings(&[
                "Peer Mentorship",
                "Drop-in Center",
                "Resource Navigation",
            ]),
            coordinate: Coordinate {
                latitude: 43.6577,
                longitude: -79.4103,
            },
            wait_time: WAIT_TIME_WALK_IN.to_string(),
            cost: "Free".to_string(),
            rating: 4.7,
        },
    ]
}
